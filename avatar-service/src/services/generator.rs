//! Simulated avatar generation.
//!
//! There is no real image pipeline behind this service yet. Each call waits
//! for the configured delay and then rolls a single uniform draw to decide
//! between the placeholder avatar and a simulated transient failure.

use crate::config::GenerationConfig;
use rand::Rng;
use std::sync::Arc;

/// Source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Always returns the same draw. Lets tests pin either branch.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Result of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Ready { avatar_url: String },
    SimulatedFailure { message: String },
}

impl GenerationOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationOutcome::Ready { .. } => "ready",
            GenerationOutcome::SimulatedFailure { .. } => "simulated_failure",
        }
    }
}

#[derive(Clone)]
pub struct AvatarGenerator {
    settings: GenerationConfig,
    source: Arc<dyn RandomSource>,
}

impl AvatarGenerator {
    pub fn new(settings: GenerationConfig, source: Arc<dyn RandomSource>) -> Self {
        Self { settings, source }
    }

    /// Wait out the simulated processing time, then pick an outcome.
    ///
    /// The wait is a timer yield, so concurrent calls overlap instead of
    /// queueing behind each other.
    pub async fn generate(&self) -> GenerationOutcome {
        let delay = self.settings.delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        self.roll()
    }

    fn roll(&self) -> GenerationOutcome {
        if self.source.next_unit() < self.settings.failure_rate {
            GenerationOutcome::SimulatedFailure {
                message: self.settings.failure_message.clone(),
            }
        } else {
            GenerationOutcome::Ready {
                avatar_url: self.settings.placeholder_url.clone(),
            }
        }
    }
}
