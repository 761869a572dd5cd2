//! Randomness port for simulated workload and requestor behaviour.

/// Source of the random draws the lifecycle engine makes.
///
/// Implementations must be deterministic for a given seed or script so that
/// hosts and tests can pin outcomes.
pub trait RandomSource: Send {
    /// Returns a uniformly distributed value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a uniformly distributed value in `[0, upper)`.
    ///
    /// Returns `0` when `upper` is `0`.
    fn below(&mut self, upper: u64) -> u64;

    /// Returns a uniformly distributed value in `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    fn between(&mut self, low: u64, high: u64) -> u64 {
        low.saturating_add(self.below(high.saturating_sub(low)))
    }

    /// Returns `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }
}
