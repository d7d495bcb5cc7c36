use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nominatim_client::NominatimClient;
use overpass_client::OverpassClient;
use placewalk_common::{Config, Coordinate, FileConfig, LocationContext};
use placewalk_discovery::{DiscoveryPipeline, ReverseGeocoder};
use placewalk_narrator::{SpeechClient, StoryComposer};
use wikipedia_client::WikipediaClient;

#[derive(Parser)]
// allow_negative_numbers so a western longitude like -0.1281 is not
// mistaken for a flag.
#[command(
    name = "placewalk",
    about = "Discover and narrate storied places near a coordinate",
    allow_negative_numbers = true
)]
struct Cli {
    /// Latitude of the query center (WGS84)
    lat: f64,

    /// Longitude of the query center (WGS84)
    lon: f64,

    /// Search radius in meters; defaults to the configured radius
    radius_m: Option<u32>,
}

impl Cli {
    fn center(&self) -> Result<Coordinate> {
        let center = Coordinate::new(self.lat, self.lon);
        if !center.is_valid() {
            bail!("Coordinate out of range: {center}");
        }
        Ok(center)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("placewalk=info".parse()?))
        .init();

    info!("Placewalk starting...");

    // Load config
    let config = Config::from_env()?;
    let file_config = match &config.config_path {
        Some(path) => placewalk_common::load_config(path)?,
        None => FileConfig::default(),
    };

    let cli = Cli::parse();
    let center = cli.center()?;
    let radius_m = cli.radius_m.unwrap_or(file_config.discovery.radius_m);

    let geocoder = NominatimClient::new(&file_config.endpoints.nominatim);
    let pipeline = DiscoveryPipeline::new(
        OverpassClient::new(&file_config.endpoints.overpass),
        NominatimClient::new(&file_config.endpoints.nominatim),
        WikipediaClient::new(&file_config.endpoints.wikipedia),
        file_config.discovery.clone(),
    );

    let stories = pipeline.discover_with_stories(center, radius_m).await?;
    if stories.is_empty() {
        println!("No storied places found within {radius_m}m of {center}.");
        return Ok(());
    }

    println!("Storied places near {center}:");
    for (i, (place, article)) in stories.iter().enumerate() {
        println!(
            "{:2}. {} ({}, {:.0}m) — {}",
            i + 1,
            place.name,
            place.kind,
            place.distance_m,
            article.url
        );
    }

    // Narrate the nearest place when a story key is available
    let Some(openai_key) = &config.openai_api_key else {
        info!("OPENAI_API_KEY not set, skipping narration");
        return Ok(());
    };

    let (place, article) = &stories[0];
    let ctx = match ReverseGeocoder::reverse(&geocoder, place.location).await {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = %e, "Reverse geocoding failed, narrating without location context");
            LocationContext::default()
        }
    };

    let composer = StoryComposer::new(
        openai_key,
        &file_config.endpoints.openai,
        &file_config.narration,
    );
    let story = match composer.compose(Some(place), article, &ctx).await {
        Ok(story) => story,
        Err(e) => {
            warn!(place = place.name.as_str(), error = %e, "Narration failed");
            return Ok(());
        }
    };

    println!("\n--- {} ---\n", place.name);
    println!("{story}");

    // And read it aloud when a speech key is available
    let Some(elevenlabs_key) = &config.elevenlabs_api_key else {
        info!("ELEVENLABS_API_KEY not set, skipping audio");
        return Ok(());
    };

    let speech = SpeechClient::new(
        elevenlabs_key,
        &file_config.endpoints.elevenlabs,
        &file_config.narration,
    );
    let audio = match speech.synthesize(&story).await {
        Ok(audio) => audio,
        Err(e) => {
            warn!(place = place.name.as_str(), error = %e, "Speech synthesis failed");
            return Ok(());
        }
    };

    let out_path = "story.mp3";
    std::fs::write(out_path, &audio)
        .with_context(|| format!("Failed to write {out_path}"))?;
    info!(bytes = audio.len(), out_path, "Audio written");
    println!("\nAudio saved to {out_path}");

    Ok(())
}
