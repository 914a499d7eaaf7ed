pub mod astronomy;
pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use types::{Countdown, Language, LocalPhase, MoonPhase, SubPhase};
