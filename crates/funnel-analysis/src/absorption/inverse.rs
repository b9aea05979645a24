//! Inversion of `I - Q` under the configured singular-matrix policy.

use nalgebra::DMatrix;

use funnel_core::config::{SingularPolicy, SolverConfig};
use funnel_core::errors::SolverError;

use super::types::Provenance;

/// Invert `a`, falling back per `config.singular_policy` when it is singular
/// or its reciprocal condition number is below `config.singular_tolerance`.
pub fn invert(
    a: &DMatrix<f64>,
    config: &SolverConfig,
) -> Result<(DMatrix<f64>, Provenance), SolverError> {
    let n = a.nrows();
    if n == 0 {
        return Ok((DMatrix::zeros(0, 0), Provenance::Exact));
    }

    let (rcond, max_sv) = reciprocal_condition(a);
    if rcond >= config.singular_tolerance {
        if let Some(inv) = a.clone().try_inverse().filter(all_finite) {
            return Ok((inv, Provenance::Exact));
        }
    }

    tracing::warn!(
        size = n,
        rcond,
        policy = %config.singular_policy,
        "I - Q is singular"
    );

    match config.singular_policy {
        SingularPolicy::Skip => Err(SolverError::Singular {
            size: n,
            rcond,
            policy: config.singular_policy,
        }),
        SingularPolicy::PseudoInverse => {
            let cutoff = config.singular_tolerance * max_sv;
            a.clone()
                .pseudo_inverse(cutoff)
                .map_err(|reason| SolverError::PseudoInverseFailed {
                    reason: reason.to_string(),
                })
                .and_then(|pinv| {
                    if all_finite(&pinv) {
                        Ok((pinv, Provenance::PseudoInverse))
                    } else {
                        Err(SolverError::PseudoInverseFailed {
                            reason: "non-finite entries".to_string(),
                        })
                    }
                })
        }
        SingularPolicy::Regularize => {
            let epsilon = config.epsilon;
            let shifted = a + DMatrix::<f64>::identity(n, n) * epsilon;
            shifted
                .try_inverse()
                .filter(all_finite)
                .map(|inv| (inv, Provenance::Regularized { epsilon }))
                .ok_or(SolverError::RegularizationFailed { epsilon })
        }
    }
}

/// `(min_sv / max_sv, max_sv)`; 0 for the zero matrix.
fn reciprocal_condition(a: &DMatrix<f64>) -> (f64, f64) {
    let sv = a.singular_values();
    let max = sv.iter().copied().fold(0.0_f64, f64::max);
    let min = sv.iter().copied().fold(f64::INFINITY, f64::min);
    if max > 0.0 && min.is_finite() {
        (min / max, max)
    } else {
        (0.0, max)
    }
}

fn all_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}
