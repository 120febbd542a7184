pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod metadata;
pub mod organizer;
pub mod progress;
pub mod scanner;

pub use config::AppConfig;
pub use engine::{RunResult, SortEngine};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
