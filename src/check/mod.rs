//! Differential verification against brute-force enumeration.

pub mod assignment;
pub mod brute_force;
pub mod differential;
pub mod generate;

use anyhow::{Result, bail};
use serde::Serialize;

use crate::check::brute_force::BRUTE_FORCE_MAX_VARS;
use crate::check::generate::GenConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarnessConfig {
    pub limits: GenConfig,
    pub rounds: u64,
    pub seed: u64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            limits: GenConfig::default(),
            rounds: 10_000,
            seed: 0,
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        self.limits.validate()?;
        if self.limits.max_vars as usize > BRUTE_FORCE_MAX_VARS {
            bail!(
                "max_vars={} is beyond what brute force can check (limit {})",
                self.limits.max_vars,
                BRUTE_FORCE_MAX_VARS
            );
        }
        Ok(())
    }
}
