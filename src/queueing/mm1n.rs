use crate::error::{Error, Result};
use crate::models::{ModelType, QueueModelParams};
use crate::numeric::is_unit;
use crate::queueing::{finite_flow, finite_table, required_capacity, validate_rates, QueueModel};
use crate::state::QueueModelResults;

/// Single server, at most `N` customers in the system.
pub struct Mm1nModel;

impl QueueModel for Mm1nModel {
    fn model_type(&self) -> ModelType {
        ModelType::Mm1n
    }

    fn solve(&self, params: &QueueModelParams) -> Result<QueueModelResults> {
        let capacity = required_capacity(params, ModelType::Mm1n)?;
        solve_mm1n(params.lambda, params.mu, capacity)
    }
}

/// Always stable: blocked arrivals bound the population at `capacity`.
pub fn solve_mm1n(lambda: f64, mu: f64, capacity: u32) -> Result<QueueModelResults> {
    validate_rates(lambda, mu)?;
    if capacity < 1 {
        return Err(Error::InvalidCapacity(capacity));
    }

    let rho = lambda / mu;
    let states = capacity as usize + 1;
    let pns: Vec<f64> = if is_unit(rho) {
        vec![1.0 / states as f64; states]
    } else {
        let p0 = (1.0 - rho) / (1.0 - rho.powi(capacity as i32 + 1));
        (0..states).map(|n| p0 * rho.powi(n as i32)).collect()
    };

    let ls: f64 = pns.iter().enumerate().map(|(n, pn)| n as f64 * pn).sum();
    let p0 = pns[0];
    let flow = finite_flow(lambda, mu, ls, pns[capacity as usize]);

    Ok(QueueModelResults {
        rho,
        p0,
        ls,
        lq: flow.lq,
        ws: flow.ws,
        wq: flow.wq,
        c_barra: Some(p0),
        lambda_eff: Some(flow.lambda_eff),
        lambda_perdida: Some(flow.lambda_lost),
        probabilities: finite_table(&pns),
        model_type: ModelType::Mm1n,
        params: QueueModelParams::new(lambda, mu).with_capacity(capacity),
    })
}
