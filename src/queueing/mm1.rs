use crate::error::{Error, Result};
use crate::models::{ModelType, QueueModelParams};
use crate::queueing::{truncated_table, validate_rates, QueueModel, Truncation};
use crate::state::QueueModelResults;

/// Single server, unbounded capacity.
#[derive(Default)]
pub struct Mm1Model {
    pub truncation: Truncation,
}

impl QueueModel for Mm1Model {
    fn model_type(&self) -> ModelType {
        ModelType::Mm1
    }

    fn solve(&self, params: &QueueModelParams) -> Result<QueueModelResults> {
        solve_mm1_with(params.lambda, params.mu, self.truncation)
    }
}

pub fn solve_mm1(lambda: f64, mu: f64) -> Result<QueueModelResults> {
    solve_mm1_with(lambda, mu, Truncation::default())
}

pub fn solve_mm1_with(lambda: f64, mu: f64, truncation: Truncation) -> Result<QueueModelResults> {
    validate_rates(lambda, mu)?;
    if lambda >= mu {
        return Err(Error::Unstable {
            lambda,
            capacity: mu,
        });
    }

    let rho = lambda / mu;
    let p0 = 1.0 - rho;
    let ls = rho / (1.0 - rho);
    let lq = rho * rho / (1.0 - rho);
    let probabilities = truncated_table(|n| p0 * rho.powi(n as i32), ls, truncation);

    Ok(QueueModelResults {
        rho,
        p0,
        ls,
        lq,
        ws: ls / lambda,
        wq: lq / lambda,
        c_barra: Some(1.0 - rho),
        lambda_eff: None,
        lambda_perdida: None,
        probabilities,
        model_type: ModelType::Mm1,
        params: QueueModelParams::new(lambda, mu),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn textbook_example() {
        let results = solve_mm1(4.0, 6.0).expect("stable system should solve");
        assert_close(results.rho, 0.6667, 1e-3);
        assert_close(results.p0, 0.3333, 1e-3);
        assert_close(results.ls, 2.0, 1e-3);
        assert_close(results.lq, 1.3333, 1e-3);
        assert_close(results.ws, 0.5, 1e-3);
        assert_close(results.wq, 0.3333, 1e-3);
        assert_close(results.c_barra.unwrap(), 0.3333, 1e-3);
        assert_eq!(results.model_type, ModelType::Mm1);
        assert_eq!(results.lambda_eff, None);
    }

    #[test]
    fn littles_law_identities_hold() {
        for (lambda, mu) in [(1.0, 2.0), (3.0, 3.5), (0.1, 10.0), (9.0, 10.0)] {
            let results = solve_mm1(lambda, mu).expect("stable system should solve");
            assert_close(results.ls, results.lq + results.rho, 1e-9);
            assert_close(results.ws, results.ls / lambda, 1e-12);
            assert_close(results.wq, results.lq / lambda, 1e-12);
        }
    }

    #[test]
    fn truncated_table_carries_almost_all_mass() {
        for (lambda, mu) in [(1.0, 2.0), (4.0, 6.0), (9.0, 10.0)] {
            let results = solve_mm1(lambda, mu).expect("stable system should solve");
            let total: f64 = results.probabilities.iter().map(|entry| entry.pn).sum();
            assert_close(total, 1.0, 1e-4);
            assert_eq!(results.probabilities[0].pn, results.p0);
            let last = results.probabilities.last().unwrap();
            assert_eq!(last.cumulative_pn, 1.0);
            assert!(last.n as f64 > results.ls + 5.0);
        }
    }

    #[test]
    fn table_is_capped_near_saturation() {
        let results = solve_mm1(99.0, 100.0).expect("stable system should solve");
        assert_eq!(results.probabilities.len(), 100);
        assert_eq!(results.probabilities[99].cumulative_pn, 1.0);
    }

    #[test]
    fn rejects_unstable_and_non_positive_rates() {
        let err = solve_mm1(6.0, 6.0).unwrap_err();
        assert!(err.is_instability());
        assert!(solve_mm1(7.0, 6.0).unwrap_err().is_instability());
        assert!(matches!(
            solve_mm1(0.0, 6.0).unwrap_err(),
            Error::InvalidRate { .. }
        ));
        assert!(matches!(
            solve_mm1(1.0, -2.0).unwrap_err(),
            Error::InvalidRate { .. }
        ));
    }
}
