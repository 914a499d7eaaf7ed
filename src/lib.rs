//! Lunaria - moon-phase engine with remote astronomy data and local fallback

pub mod core;
pub mod display;
pub mod engine;
pub mod phases;
pub mod remote;
