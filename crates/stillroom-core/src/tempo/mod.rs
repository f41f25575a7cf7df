mod grid;
mod session;

pub use grid::{grid_secs, quantize, quantize_pattern};
pub use session::{SegmentChange, TempoSession, SEGMENT_CAPS};
