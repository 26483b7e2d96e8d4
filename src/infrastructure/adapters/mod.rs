//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod codec;
pub mod model;
pub mod player;

pub use codec::*;
pub use model::*;
pub use player::*;
