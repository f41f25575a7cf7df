mod benchmark;
mod progression;

pub use benchmark::Benchmark;
pub use progression::{multiplier, CapacityProgression, EffectivePattern};
