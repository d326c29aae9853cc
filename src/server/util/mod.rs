//! Small runtime helpers shared across layers.

pub mod shutdown;
