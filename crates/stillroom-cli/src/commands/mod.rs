pub mod breath;
pub mod config;
pub mod phase;
pub mod quantize;
pub mod tempo;
