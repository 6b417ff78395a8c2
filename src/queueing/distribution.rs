//! Builders for the `{n, pn, cumulativePn}` tables attached to solver results.
//!
//! Infinite-capacity models have an unbounded support, so their tables come
//! from a lazy term sequence cut off by a [`Truncation`] policy. Finite models
//! emit every state `0..=N` exactly.

use log::warn;

use crate::numeric::clamp_probability;
use crate::state::ProbabilityEntry;

/// When to stop emitting terms of an infinite distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Truncation {
    /// Terms with `pn` below this are negligible.
    pub threshold: f64,
    /// Hard cap on the number of emitted terms.
    pub max_terms: usize,
    /// Keep emitting while `n <= mean + mean_margin`, even past the threshold.
    pub mean_margin: f64,
}

impl Default for Truncation {
    fn default() -> Self {
        Self {
            threshold: 1e-6,
            max_terms: 100,
            mean_margin: 5.0,
        }
    }
}

/// Lazy `(n, pn)` sequence for an infinite-capacity model.
pub struct ProbabilityTerms<F> {
    pn: F,
    mean: f64,
    policy: Truncation,
    next: u32,
    done: bool,
}

impl<F> ProbabilityTerms<F>
where
    F: FnMut(u32) -> f64,
{
    pub fn new(pn: F, mean: f64, policy: Truncation) -> Self {
        Self {
            pn,
            mean,
            policy,
            next: 0,
            done: false,
        }
    }
}

impl<F> Iterator for ProbabilityTerms<F>
where
    F: FnMut(u32) -> f64,
{
    type Item = (u32, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.next as usize >= self.policy.max_terms {
            return None;
        }
        let n = self.next;
        let pn = (self.pn)(n);
        let covers_mean = n as f64 > self.mean + self.policy.mean_margin;
        // Always emit n = 0 so the table is never empty.
        if n > 0 && pn < self.policy.threshold && covers_mean {
            self.done = true;
            return None;
        }
        self.next += 1;
        Some((n, pn))
    }
}

/// Collects a truncated sequence into a table whose final cumulative value is
/// pinned to 1.0.
pub fn truncated_table<F>(pn: F, mean: f64, policy: Truncation) -> Vec<ProbabilityEntry>
where
    F: FnMut(u32) -> f64,
{
    let entries = accumulate(ProbabilityTerms::new(pn, mean, policy));
    if entries.len() >= policy.max_terms {
        if let Some(last) = entries.last() {
            warn!(
                "probability table hit the {}-term cap with residual mass {:.3e}",
                policy.max_terms,
                1.0 - last.cumulative_pn
            );
        }
    }
    pin_final(entries)
}

/// Table over exactly `n = 0..pns.len()`.
pub fn finite_table(pns: &[f64]) -> Vec<ProbabilityEntry> {
    let entries = accumulate(pns.iter().copied().enumerate().map(|(n, pn)| (n as u32, pn)));
    pin_final(entries)
}

fn accumulate<I>(terms: I) -> Vec<ProbabilityEntry>
where
    I: Iterator<Item = (u32, f64)>,
{
    let mut cumulative = 0.0;
    terms
        .map(|(n, pn)| {
            cumulative += pn;
            ProbabilityEntry {
                n,
                pn,
                cumulative_pn: clamp_probability(cumulative),
            }
        })
        .collect()
}

fn pin_final(mut entries: Vec<ProbabilityEntry>) -> Vec<ProbabilityEntry> {
    if let Some(last) = entries.last_mut() {
        last.cumulative_pn = 1.0;
    }
    entries
}
