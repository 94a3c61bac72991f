//! Dispute resolution and reputation logic for the Bandhan marketplace.

pub mod services;

pub use services::*;
