pub mod client;

pub use client::{AstronomyClient, PhaseSource, RemotePhase};
