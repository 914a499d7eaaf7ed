pub mod orchestrator;

pub use orchestrator::MoonPhaseEngine;
