pub mod config;
pub mod error;
pub mod models;

pub use config::NoteConfig;
pub use error::ConfigError;
pub use models::NoteParameters;
