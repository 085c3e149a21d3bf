use anyhow::{Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Upper bounds for random instances. All three are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenConfig {
    pub max_vars: u32,
    pub max_clauses: usize,
    pub max_lits: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_vars: 10,
            max_clauses: 10,
            max_lits: 10,
        }
    }
}

impl GenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_vars == 0 {
            bail!("max_vars must be >= 1");
        }
        if self.max_vars > i32::MAX as u32 {
            bail!("max_vars must fit a DIMACS literal, got {}", self.max_vars);
        }
        if self.max_lits == 0 {
            bail!("max_lits must be >= 1");
        }
        Ok(())
    }
}

/// Generator for instance `round` of a run seeded with `seed`.
///
/// The round lands in the high half of the seed so that neighbouring seeds
/// do not replay each other's instances shifted by one round.
pub fn instance_rng(seed: u64, round: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ round.rotate_left(32))
}

/// One random CNF instance.
///
/// The variable count is drawn from `1..=max_vars`, the clause count from
/// `0..=max_clauses` and each clause length from `1..=max_lits`. Literals pick
/// their variable with replacement and a fair sign, so duplicates and
/// tautologies occur.
pub fn random_clauses(cfg: &GenConfig, rng: &mut ChaCha8Rng) -> Result<Vec<Vec<i32>>> {
    cfg.validate()?;
    let n_vars = rng.random_range(1..=cfg.max_vars) as i32;
    let n_clauses = rng.random_range(0..=cfg.max_clauses);

    let mut out = Vec::with_capacity(n_clauses);
    for _ in 0..n_clauses {
        let len = rng.random_range(1..=cfg.max_lits);
        let clause = (0..len)
            .map(|_| {
                let var = rng.random_range(1..=n_vars);
                if rng.random::<bool>() { var } else { -var }
            })
            .collect::<Vec<_>>();
        out.push(clause);
    }
    Ok(out)
}
