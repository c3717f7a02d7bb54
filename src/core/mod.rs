//! Core engine support: deterministic RNG and error types.

mod error;
mod rng;

pub use error::PlayError;
pub use rng::GameRng;
