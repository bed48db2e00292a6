use std::env;

use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct BatchConfig {
    /// Concurrent image workers; 0 means use the available parallelism.
    pub jobs: usize,
}

impl BatchConfig {
    pub fn new() -> Self {
        let jobs = env::var("RESTAMP_JOBS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        Self { jobs }
    }
}
