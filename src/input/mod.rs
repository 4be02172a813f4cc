//! Input sources feeding decoded data points into devices.

pub mod replay;

pub use replay::{ReplaySummary, parse_line, replay};
