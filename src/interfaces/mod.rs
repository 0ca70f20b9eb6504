//! Input and output adapters around the engine.

pub mod json;
