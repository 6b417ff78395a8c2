use crate::error::{Error, Result};
use crate::models::{ModelType, QueueModelParams};
use crate::numeric::{erlang_log_terms, scaled_weights};
use crate::queueing::{
    required_servers, truncated_table, validate_rates, QueueModel, Truncation,
};
use crate::state::QueueModelResults;

/// `c` parallel servers, unbounded capacity.
#[derive(Default)]
pub struct MmcModel {
    pub truncation: Truncation,
}

impl QueueModel for MmcModel {
    fn model_type(&self) -> ModelType {
        ModelType::Mmc
    }

    fn solve(&self, params: &QueueModelParams) -> Result<QueueModelResults> {
        let servers = required_servers(params, ModelType::Mmc)?;
        solve_mmc_with(params.lambda, params.mu, servers, self.truncation)
    }
}

pub fn solve_mmc(lambda: f64, mu: f64, servers: u32) -> Result<QueueModelResults> {
    solve_mmc_with(lambda, mu, servers, Truncation::default())
}

/// Single-server systems go through [`solve_mm1`](crate::queueing::solve_mm1);
/// `servers` must be at least 2.
pub fn solve_mmc_with(
    lambda: f64,
    mu: f64,
    servers: u32,
    truncation: Truncation,
) -> Result<QueueModelResults> {
    validate_rates(lambda, mu)?;
    if servers < 2 {
        return Err(Error::InvalidServers {
            min: 2,
            got: servers,
        });
    }
    let c = servers as f64;
    if lambda >= c * mu {
        return Err(Error::Unstable {
            lambda,
            capacity: c * mu,
        });
    }

    let a = lambda / mu;
    let rho = a / c;
    let weights = scaled_weights(&erlang_log_terms(a, servers));
    let (head, tail) = weights.split_at(servers as usize);
    let at_c = tail[0];
    let total = head.iter().sum::<f64>() + at_c / (1.0 - rho);
    let head: Vec<f64> = head.iter().map(|weight| weight / total).collect();
    let p0 = head[0];
    let p_c = at_c / total;

    let pn = |n: u32| -> f64 {
        if n < servers {
            head[n as usize]
        } else {
            p_c * rho.powi((n - servers) as i32)
        }
    };

    let lq = p_c * rho / ((1.0 - rho) * (1.0 - rho));
    let ls = lq + a;
    let wq = lq / lambda;
    let ws = wq + 1.0 / mu;
    let idle: f64 = (0..servers).map(|n| (servers - n) as f64 * pn(n)).sum();

    Ok(QueueModelResults {
        rho,
        p0,
        ls,
        lq,
        ws,
        wq,
        c_barra: Some(idle),
        lambda_eff: None,
        lambda_perdida: None,
        probabilities: truncated_table(pn, ls, truncation),
        model_type: ModelType::Mmc,
        params: QueueModelParams::new(lambda, mu).with_servers(servers),
    })
}
