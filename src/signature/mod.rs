//! Evaluates signatures and log-signatures of a tick path.
pub mod engine;

pub use engine::SignatureEngine;
