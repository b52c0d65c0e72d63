//! Wait mechanisms.
//!
//! Every wait in the harness carries an explicit bound and a polling
//! interval. The one non-obvious strategy here is [`StableSampler`]: the
//! sidebar filter exposes no "filtering complete" signal, so instead of a
//! flat settle delay the harness polls the visible-result count until two
//! consecutive samples agree.

use std::time::Duration;

use crate::config::{DEFAULT_ACTION_TIMEOUT, DEFAULT_POLL_INTERVAL};

/// Options for a bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total bound for the wait
    pub timeout: Duration,
    /// Interval between polls
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_ACTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Detects when a sampled count has settled.
///
/// `observe` returns `true` once two consecutive samples are equal. The
/// caller owns the polling loop and its bound.
#[derive(Debug, Default)]
pub struct StableSampler {
    last: Option<usize>,
}

impl StableSampler {
    /// Create a sampler with no observations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample; returns `true` when it matches the previous one.
    pub fn observe(&mut self, sample: usize) -> bool {
        let stable = self.last == Some(sample);
        self.last = Some(sample);
        stable
    }

    /// The most recent sample, if any.
    #[must_use]
    pub const fn last(&self) -> Option<usize> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_suite_budget() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout, DEFAULT_ACTION_TIMEOUT);
        assert_eq!(opts.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_sampler_requires_two_equal_samples() {
        let mut sampler = StableSampler::new();
        assert!(!sampler.observe(12));
        assert!(!sampler.observe(3));
        assert!(sampler.observe(3));
        assert_eq!(sampler.last(), Some(3));
    }

    #[test]
    fn test_sampler_stabilizes_at_zero() {
        // Zero results is a legitimate settled state (no-match search).
        let mut sampler = StableSampler::new();
        assert!(!sampler.observe(0));
        assert!(sampler.observe(0));
    }

    #[test]
    fn test_sampler_resets_on_change() {
        let mut sampler = StableSampler::new();
        assert!(!sampler.observe(5));
        assert!(sampler.observe(5));
        assert!(!sampler.observe(4));
        assert!(sampler.observe(4));
    }
}
