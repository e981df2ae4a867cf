//! Generic driver that repeatedly advances a stale entity until it is current.

use tracing::{debug, warn};

use crate::CoreError;

/// Iteration bound used when the caller does not configure one.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// Result of a catch-up run: the current entity and how many single steps it took.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchUp<T> {
    pub value: T,
    pub steps: usize,
}

impl<T> CatchUp<T> {
    pub fn advanced(&self) -> bool {
        self.steps > 0
    }
}

/// Applies `advance_once` while `is_current` is false.
///
/// Each step must strictly increase `progress`: a step that does not fails with
/// [`CoreError::Stalled`], and more than `max_steps` steps fail with
/// [`CoreError::CatchUpLimit`]. The entity is moved through each step, so a
/// step may update it in place.
pub fn catch_up<T, K, C, P, A>(
    entity: T,
    mut is_current: C,
    mut progress: P,
    mut advance_once: A,
    max_steps: usize,
) -> Result<CatchUp<T>, CoreError>
where
    K: PartialOrd,
    C: FnMut(&T) -> bool,
    P: FnMut(&T) -> K,
    A: FnMut(T) -> Result<T, CoreError>,
{
    let mut value = entity;
    let mut steps = 0usize;
    while !is_current(&value) {
        if steps >= max_steps {
            warn!(steps, "catch-up reached its iteration bound");
            return Err(CoreError::CatchUpLimit { steps });
        }
        let before = progress(&value);
        value = advance_once(value)?;
        if progress(&value) <= before {
            warn!(steps, "catch-up step made no progress");
            return Err(CoreError::Stalled { steps });
        }
        steps += 1;
    }
    if steps > 0 {
        debug!(steps, "catch-up complete");
    }
    Ok(CatchUp { value, steps })
}
