use crate::models::{Comparison, ProbabilityQuery};
use crate::numeric::clamp_probability;
use crate::state::QueueModelResults;

impl QueueModelResults {
    /// Evaluates `P(n <op> k)` against the result's probability table.
    pub fn probability(&self, comparison: Comparison, k: i64) -> f64 {
        let value = match comparison {
            Comparison::Eq => self.point(k),
            Comparison::Lte => self.cumulative(k),
            Comparison::Lt => self.cumulative(k - 1),
            Comparison::Gte => 1.0 - self.cumulative(k - 1),
            Comparison::Gt => 1.0 - self.cumulative(k),
        };
        clamp_probability(value)
    }

    pub fn evaluate(&self, query: &ProbabilityQuery) -> f64 {
        self.probability(query.comparison, query.k)
    }

    fn point(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        self.probabilities
            .iter()
            .find(|entry| entry.n as i64 == k)
            .map(|entry| entry.pn)
            .unwrap_or(0.0)
    }

    fn cumulative(&self, k: i64) -> f64 {
        if k < 0 {
            return 0.0;
        }
        let last = match self.probabilities.last() {
            Some(last) => last,
            None => return 0.0,
        };
        if k >= last.n as i64 {
            // Finite tables end at N; truncated tables end pinned at 1.0.
            return if self.model_type.is_finite() {
                1.0
            } else {
                last.cumulative_pn
            };
        }
        self.probabilities
            .iter()
            .find(|entry| entry.n as i64 == k)
            .map(|entry| entry.cumulative_pn)
            .unwrap_or(last.cumulative_pn)
    }
}
