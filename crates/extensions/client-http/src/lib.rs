//! REST client for the Metronome jobs API.

mod client;

pub use client::MetronomeClient;
