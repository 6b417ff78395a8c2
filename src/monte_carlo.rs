//! Random-variate generation from a uniform(0, 1) source.
//!
//! Exponential draws use the inverse transform `-ln(1 - u) / lambda`; Poisson
//! draws use Knuth's product method. Each variate reports the uniform draw it
//! is tabulated against: the only draw for exponential, the first of several
//! for Poisson.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::models::{Distribution, MonteCarloParams};
use crate::state::{MonteCarloResults, MonteCarloStats, SimulationRow};

/// Stand-in for a uniform draw of exactly 1.0, which would make `ln(1 - u)`
/// diverge.
const BELOW_ONE: f64 = 0.999_999_99;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variate {
    pub value: f64,
    pub u: f64,
}

pub fn exponential_variate<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> Variate {
    let u: f64 = rng.gen();
    let u = if u >= 1.0 { BELOW_ONE } else { u };
    Variate {
        value: -(1.0 - u).ln() / lambda,
        u,
    }
}

pub fn poisson_variate<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> Variate {
    let limit = (-lambda).exp();
    let mut count = 0u64;
    let mut product = 1.0;
    let mut first_u = None;
    loop {
        count += 1;
        let u: f64 = rng.gen();
        first_u.get_or_insert(u);
        product *= u;
        if product <= limit {
            break;
        }
    }
    Variate {
        value: (count - 1) as f64,
        u: first_u.unwrap_or_default(),
    }
}

/// Exponential waiting time for a Poisson process of `rate` events per unit.
/// A non-positive rate never fires.
pub fn exponential_time<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    if rate <= 0.0 {
        return f64::INFINITY;
    }
    exponential_variate(rng, rate).value
}

pub fn validate_params(params: &MonteCarloParams) -> Result<()> {
    if !params.lambda.is_finite() || params.lambda <= 0.0 {
        return Err(Error::InvalidRate {
            name: "lambda",
            value: params.lambda,
        });
    }
    if params.n_variables == 0 {
        return Err(Error::InvalidVariables);
    }
    if params.n_observations == 0 {
        return Err(Error::InvalidObservations);
    }
    Ok(())
}

/// Runs with a generator seeded from `params.seed`, or from OS entropy when no
/// seed is set.
pub fn run_monte_carlo(params: &MonteCarloParams) -> Result<MonteCarloResults> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_monte_carlo_with(params, &mut rng)
}

pub fn run_monte_carlo_with<R: Rng + ?Sized>(
    params: &MonteCarloParams,
    rng: &mut R,
) -> Result<MonteCarloResults> {
    validate_params(params)?;

    let columns = params.n_variables;
    let mut accumulators = vec![ColumnAccumulator::default(); columns];
    let mut data = Vec::with_capacity(params.n_observations);

    for idx in 0..params.n_observations {
        let mut random_values = Vec::with_capacity(columns);
        let mut simulated_values = Vec::with_capacity(columns);
        for acc in accumulators.iter_mut() {
            let variate = match params.distribution {
                Distribution::Exponential => exponential_variate(rng, params.lambda),
                Distribution::Poisson => poisson_variate(rng, params.lambda),
            };
            acc.push(variate.value);
            random_values.push(variate.u);
            simulated_values.push(variate.value);
        }
        data.push(SimulationRow {
            observation_index: idx + 1,
            random_values,
            simulated_values,
        });
    }

    let n = params.n_observations as f64;
    let statistics = MonteCarloStats {
        mean: accumulators.iter().map(|acc| acc.mean(n)).collect(),
        std_dev: accumulators.iter().map(|acc| acc.std_dev(n)).collect(),
        min: accumulators.iter().map(|acc| acc.min).collect(),
        max: accumulators.iter().map(|acc| acc.max).collect(),
    };
    debug!(
        "monte carlo {} (lambda={}): {} x {} draws, means {:?}",
        params.distribution, params.lambda, params.n_observations, columns, statistics.mean
    );

    Ok(MonteCarloResults {
        params: params.clone(),
        data,
        statistics,
    })
}

#[derive(Clone, Debug)]
struct ColumnAccumulator {
    sum: f64,
    sum_sq: f64,
    min: f64,
    max: f64,
}

impl Default for ColumnAccumulator {
    fn default() -> Self {
        Self {
            sum: 0.0,
            sum_sq: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl ColumnAccumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.sum_sq += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn mean(&self, n: f64) -> f64 {
        self.sum / n
    }

    /// Population standard deviation via `E[X^2] - E[X]^2`.
    fn std_dev(&self, n: f64) -> f64 {
        let mean = self.mean(n);
        let variance = self.sum_sq / n - mean * mean;
        crate::numeric::clamp_non_negative(variance).sqrt()
    }
}
