//! Player Adapter - 服务端播放

mod process_player;

pub use process_player::{ProcessAudioPlayer, ProcessPlayerConfig};
