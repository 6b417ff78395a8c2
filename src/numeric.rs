//! Small numeric helpers shared by the solvers and the Monte Carlo
//! generator.

/// Tolerance used when deciding that a load factor is exactly one.
pub const UNIT_TOLERANCE: f64 = 1e-12;

/// `ln(a^n / n!)` for `n = 0..=last`, built from the recurrence
/// `t_n = t_{n-1} * a / n` so neither side of the quotient is ever formed.
pub fn erlang_log_terms(a: f64, last: u32) -> Vec<f64> {
    let ln_a = a.ln();
    let mut terms = Vec::with_capacity(last as usize + 1);
    let mut acc = 0.0;
    terms.push(acc);
    for n in 1..=last {
        acc += ln_a - (n as f64).ln();
        terms.push(acc);
    }
    terms
}

/// Exponentiates log-weights relative to their maximum, so the largest weight
/// is exactly 1 and none of them can overflow.
pub fn scaled_weights(log_weights: &[f64]) -> Vec<f64> {
    let peak = log_weights
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    log_weights
        .iter()
        .map(|weight| (weight - peak).exp())
        .collect()
}

pub fn is_unit(value: f64) -> bool {
    (value - 1.0).abs() <= UNIT_TOLERANCE
}

/// Pulls floating-point drift back into `[lower, upper]`.
///
/// Every "can't be negative" or "can't exceed one" correction in the crate
/// goes through here so all model variants round the same way.
pub fn clamp_drift(value: f64, lower: f64, upper: f64) -> f64 {
    if value < lower {
        lower
    } else if value > upper {
        upper
    } else {
        value
    }
}

pub fn clamp_non_negative(value: f64) -> f64 {
    clamp_drift(value, 0.0, f64::INFINITY)
}

pub fn clamp_probability(value: f64) -> f64 {
    clamp_drift(value, 0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erlang_terms_match_the_closed_form() {
        let terms = erlang_log_terms(3.0, 4);
        assert_eq!(terms.len(), 5);
        assert_eq!(terms[0], 0.0);
        assert!((terms[4].exp() - 81.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn erlang_terms_stay_finite_past_factorial_overflow() {
        let terms = erlang_log_terms(800.0, 900);
        assert!(terms.iter().all(|term| term.is_finite()));
        // a^n / n! peaks at n = a - 1 and n = a, which tie.
        let peak = terms
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (n, &term)| {
                if term > best.1 {
                    (n, term)
                } else {
                    best
                }
            });
        assert!(peak.0 == 799 || peak.0 == 800);
    }

    #[test]
    fn scaled_weights_peak_at_one() {
        let weights = scaled_weights(&[-2000.0, 1500.0, 1499.0]);
        assert_eq!(weights[1], 1.0);
        assert_eq!(weights[0], 0.0);
        assert!((weights[2] - (-1.0_f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn clamps_pull_drift_back_into_range() {
        assert_eq!(clamp_non_negative(-1e-17), 0.0);
        assert_eq!(clamp_non_negative(2.5), 2.5);
        assert_eq!(clamp_probability(1.000_000_000_1), 1.0);
        assert_eq!(clamp_probability(-0.0001), 0.0);
    }

    #[test]
    fn unit_check_tolerates_rounding() {
        assert!(is_unit(1.0));
        assert!(is_unit(3.0 / 3.0));
        assert!(!is_unit(0.999));
    }
}
