//! src/random.rs
//!
//! Randomness for volume transforms.
//!
//! Two pieces live here:
//! - [`RandomVariables`]: the call-scoped store a transform fills in
//!   `build_random_variables` and reads back in `volume_function`.
//! - A thread-local worker RNG. When a worker seeds it with
//!   [`init_worker_rng`], transforms on that thread draw from a reproducible
//!   stream. Otherwise they draw from `rand::rng()`, which is seeded from the OS.

use crate::error::VolumeError;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    /// Thread-local RNG for reproducible transforms in workers.
    static WORKER_RNG: RefCell<Option<StdRng>> = const { RefCell::new(None) };
}

/// Initialize the thread's RNG based on worker_id, epoch, and base seed.
/// Seed formula: base_seed + (epoch << 32) + worker_id
///
/// The seeded stream stays on the thread until [`reset_worker_rng`] is called,
/// so a pooled thread keeps drawing deterministically after the seeded job
/// ends. Call `reset_worker_rng` when the job finishes, or pass a seeded RNG to
/// [`invoke_with_rng`](crate::transforms::volume::invoke_with_rng) to keep the
/// determinism scoped to one call.
pub fn init_worker_rng(worker_id: usize, epoch: usize, base_seed: u64) {
    let seed = base_seed
        .wrapping_add((epoch as u64) << 32)
        .wrapping_add(worker_id as u64);
    tracing::debug!(worker_id, epoch, seed, "seeding worker rng");
    WORKER_RNG.with(|rng| *rng.borrow_mut() = Some(StdRng::seed_from_u64(seed)));
}

/// Drops the thread's seeded RNG so later draws come from OS-seeded randomness.
pub fn reset_worker_rng() {
    WORKER_RNG.with(|rng| *rng.borrow_mut() = None);
}

/// Runs `f` with the thread's active random source.
///
/// The seeded worker RNG is used when present; its stream advances across
/// calls, so no seed is replayed.
pub fn with_worker_rng<R>(f: impl FnOnce(&mut dyn RngCore) -> R) -> R {
    WORKER_RNG.with(|rng| {
        let mut rng_ref = rng.borrow_mut();
        match rng_ref.as_mut() {
            Some(rng) => f(rng),
            None => f(&mut rand::rng()),
        }
    })
}

// ============================================================================
// RandomVariables
// ============================================================================

/// Named random decisions drawn for a single transform call.
///
/// Every call owns a fresh store, so one transform instance can be used from
/// several threads at once.
#[derive(Debug, Default, Clone)]
pub struct RandomVariables {
    values: HashMap<String, bool>,
}

impl RandomVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a decision. Each name can be set once per call.
    pub fn set_random_variable(&mut self, name: impl Into<String>, value: bool) -> Result<()> {
        let name = name.into();
        if self.values.contains_key(&name) {
            return Err(VolumeError::RandomVariableRedefined(name).into());
        }
        self.values.insert(name, value);
        Ok(())
    }

    pub fn get_random_variable(&self, name: &str) -> Result<bool> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| VolumeError::MissingRandomVariable(name.to_string()).into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
