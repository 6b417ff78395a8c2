use crate::error::{Error, Result};
use crate::models::{ModelType, QueueModelParams};
use crate::numeric::{erlang_log_terms, scaled_weights};
use crate::queueing::{
    finite_flow, finite_table, required_capacity, required_servers, validate_rates, QueueModel,
};
use crate::state::QueueModelResults;

/// `c` parallel servers, at most `N` customers in the system.
pub struct MmcnModel;

impl QueueModel for MmcnModel {
    fn model_type(&self) -> ModelType {
        ModelType::Mmcn
    }

    fn solve(&self, params: &QueueModelParams) -> Result<QueueModelResults> {
        let servers = required_servers(params, ModelType::Mmcn)?;
        let capacity = required_capacity(params, ModelType::Mmcn)?;
        solve_mmcn(params.lambda, params.mu, servers, capacity)
    }
}

pub fn solve_mmcn(lambda: f64, mu: f64, servers: u32, capacity: u32) -> Result<QueueModelResults> {
    validate_rates(lambda, mu)?;
    if servers < 1 {
        return Err(Error::InvalidServers {
            min: 1,
            got: servers,
        });
    }
    if capacity < servers {
        return Err(Error::CapacityBelowServers { capacity, servers });
    }

    let a = lambda / mu;
    let rho = a / servers as f64;
    let erlang = erlang_log_terms(a, servers);
    let at_c = erlang[servers as usize];
    let ln_rho = rho.ln();
    let log_weights: Vec<f64> = (0..=capacity)
        .map(|n| {
            if n <= servers {
                erlang[n as usize]
            } else {
                at_c + (n - servers) as f64 * ln_rho
            }
        })
        .collect();
    let weights = scaled_weights(&log_weights);
    let total: f64 = weights.iter().sum();
    let pns: Vec<f64> = weights.iter().map(|weight| weight / total).collect();
    let p0 = pns[0];

    let ls: f64 = pns.iter().enumerate().map(|(n, pn)| n as f64 * pn).sum();
    let idle: f64 = pns
        .iter()
        .take(servers as usize)
        .enumerate()
        .map(|(n, pn)| (servers as usize - n) as f64 * pn)
        .sum();
    let flow = finite_flow(lambda, mu, ls, pns[capacity as usize]);

    Ok(QueueModelResults {
        rho,
        p0,
        ls,
        lq: flow.lq,
        ws: flow.ws,
        wq: flow.wq,
        c_barra: Some(idle),
        lambda_eff: Some(flow.lambda_eff),
        lambda_perdida: Some(flow.lambda_lost),
        probabilities: finite_table(&pns),
        model_type: ModelType::Mmcn,
        params: QueueModelParams::new(lambda, mu)
            .with_servers(servers)
            .with_capacity(capacity),
    })
}
