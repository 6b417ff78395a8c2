mod distribution;
mod mm1;
mod mm1n;
mod mmc;
mod mmcn;
mod query;

use log::debug;

use crate::error::{Error, Result};
use crate::models::{ModelType, QueueModelParams};
use crate::state::QueueModelResults;

pub use distribution::{finite_table, truncated_table, ProbabilityTerms, Truncation};
pub use mm1::{solve_mm1, solve_mm1_with, Mm1Model};
pub use mm1n::{solve_mm1n, Mm1nModel};
pub use mmc::{solve_mmc, solve_mmc_with, MmcModel};
pub use mmcn::{solve_mmcn, MmcnModel};

pub trait QueueModel {
    fn model_type(&self) -> ModelType;
    fn solve(&self, params: &QueueModelParams) -> Result<QueueModelResults>;
}

pub fn build_model(model: ModelType) -> Box<dyn QueueModel> {
    match model {
        ModelType::Mm1 => Box::new(Mm1Model::default()),
        ModelType::Mm1n => Box::new(Mm1nModel),
        ModelType::Mmc => Box::new(MmcModel::default()),
        ModelType::Mmcn => Box::new(MmcnModel),
    }
}

/// Solves `params` with the variant named by `model`.
pub fn solve(model: ModelType, params: &QueueModelParams) -> Result<QueueModelResults> {
    let results = build_model(model).solve(params)?;
    debug!(
        "solved {} (lambda={}, mu={}): rho={:.6} p0={:.6} ls={:.6} lq={:.6} terms={}",
        model.label(),
        params.lambda,
        params.mu,
        results.rho,
        results.p0,
        results.ls,
        results.lq,
        results.probabilities.len()
    );
    Ok(results)
}

fn validate_rates(lambda: f64, mu: f64) -> Result<()> {
    if !lambda.is_finite() || lambda <= 0.0 {
        return Err(Error::InvalidRate {
            name: "arrival rate (lambda)",
            value: lambda,
        });
    }
    if !mu.is_finite() || mu <= 0.0 {
        return Err(Error::InvalidRate {
            name: "service rate (mu)",
            value: mu,
        });
    }
    Ok(())
}

fn required_servers(params: &QueueModelParams, model: ModelType) -> Result<u32> {
    params.servers.ok_or(Error::MissingServers(model.label()))
}

fn required_capacity(params: &QueueModelParams, model: ModelType) -> Result<u32> {
    params.capacity.ok_or(Error::MissingCapacity(model.label()))
}

/// Little's-law bookkeeping shared by the finite-capacity variants.
struct FiniteFlow {
    lambda_eff: f64,
    lambda_lost: f64,
    lq: f64,
    ws: f64,
    wq: f64,
}

fn finite_flow(lambda: f64, mu: f64, ls: f64, p_full: f64) -> FiniteFlow {
    let lambda_eff = lambda * (1.0 - p_full);
    let lq = crate::numeric::clamp_non_negative(ls - lambda_eff / mu);
    let (ws, wq) = if lambda_eff == 0.0 {
        (0.0, 0.0)
    } else {
        (ls / lambda_eff, lq / lambda_eff)
    };
    FiniteFlow {
        lambda_eff,
        lambda_lost: lambda - lambda_eff,
        lq,
        ws,
        wq,
    }
}
