//! HTTP Handlers

mod index;
mod ping;
mod tts;
mod voices;

pub use index::*;
pub use ping::*;
pub use tts::*;
pub use voices::*;
