use crate::error::PnlError;

/// Compounds `strategy` returns into a value path starting at 1.0.
///
/// The output has the same length as the input. NaN and infinities are not
/// filtered; once one enters the running product every later value carries it.
///
/// # Example
///
/// ```rust
/// use pnl::compute_pnl_series;
///
/// let pnl = compute_pnl_series(&[0.0, 0.10, 0.10]);
/// assert_eq!(pnl.len(), 3);
/// assert_eq!(pnl[0], 1.0);
/// assert!((pnl[2] - 1.21).abs() < 1e-12);
/// ```
pub fn compute_pnl_series(strategy: &[f64]) -> Vec<f64> {
    let mut result = vec![0.0; strategy.len()];
    fill(strategy, &mut result);
    result
}

/// Writes the first `n` compounded values into `result`.
///
/// Both slices must hold at least `n` values. The check happens before any
/// write, so on `Err` the output buffer is left exactly as it was.
pub fn compute_pnl_series_into(
    strategy: &[f64],
    n: usize,
    result: &mut [f64],
) -> Result<(), PnlError> {
    if strategy.len() < n {
        return Err(PnlError::OutOfRange {
            buffer: "strategy",
            len: strategy.len(),
            n,
        });
    }
    if result.len() < n {
        return Err(PnlError::OutOfRange {
            buffer: "result",
            len: result.len(),
            n,
        });
    }

    fill(&strategy[..n], &mut result[..n]);
    Ok(())
}

/// The recurrence itself. Callers guarantee `strategy.len() == result.len()`.
#[inline]
pub(crate) fn fill(strategy: &[f64], result: &mut [f64]) {
    debug_assert_eq!(strategy.len(), result.len());

    let Some(first) = result.first_mut() else {
        return;
    };
    *first = 1.0;

    let mut value = 1.0;
    for (out, &r) in result[1..].iter_mut().zip(&strategy[1..]) {
        value *= 1.0 + r;
        *out = value;
    }
}
