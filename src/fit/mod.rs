//! Curve fitting.
//!
//! Responsibilities:
//!
//! - heuristic starting point for the optimizer (`guess`)
//! - damped least-squares refinement and failure handling (`engine`)

pub mod engine;
pub mod guess;

pub use engine::*;
pub use guess::*;
