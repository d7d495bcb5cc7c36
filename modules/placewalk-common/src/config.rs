use anyhow::Result;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
/// Secrets only; discovery tuning lives in the TOML [`crate::FileConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Narrative generation. Absent disables the story stage.
    pub openai_api_key: Option<String>,

    /// Speech synthesis. Absent disables the audio stage.
    pub elevenlabs_api_key: Option<String>,

    /// Optional path to a placewalk.toml overriding the built-in defaults.
    pub config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|v| !v.is_empty()),
            elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            config_path: std::env::var("PLACEWALK_CONFIG").ok().map(PathBuf::from),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.len().min(5);
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  OPENAI_API_KEY: {}", preview(&self.openai_api_key));
        tracing::info!("  ELEVENLABS_API_KEY: {}", preview(&self.elevenlabs_api_key));
        tracing::info!(
            "  PLACEWALK_CONFIG: {}",
            self.config_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<built-in defaults>".to_string())
        );
    }
}
