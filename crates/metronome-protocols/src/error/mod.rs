//! Error types for the Metronome protocol layer.

mod client;
mod resource;

pub use client::*;
pub use resource::*;
