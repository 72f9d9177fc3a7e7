pub mod generator;
pub mod metrics;

pub use generator::{AvatarGenerator, FixedSource, GenerationOutcome, RandomSource, ThreadRngSource};
