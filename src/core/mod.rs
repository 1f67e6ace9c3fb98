pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::EditorConfig;
pub use error::{Result, TownError};
pub use types::{Uid, Vec2};
