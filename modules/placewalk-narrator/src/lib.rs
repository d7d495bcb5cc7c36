pub mod error;
pub mod prompt;
pub mod speech;
pub mod story;

pub use error::{NarrateError, Result};
pub use speech::SpeechClient;
pub use story::StoryComposer;
