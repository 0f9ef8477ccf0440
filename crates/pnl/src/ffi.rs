//! C ABI entry point, loadable from the `cdylib` build of this crate.

use crate::error::PnlError;
use crate::series::fill;
use std::os::raw::c_int;

/// Status returned when the call completed.
pub const PNL_OK: c_int = 0;
/// Status returned when `n` is negative or a required pointer is null.
pub const PNL_OUT_OF_RANGE: c_int = -1;

/// Compounds `n` returns from `strategy` into `result`.
///
/// Returns [`PNL_OK`] on success. A negative `n`, or a null pointer with
/// `n > 0`, returns [`PNL_OUT_OF_RANGE`] without touching `result`. `n == 0`
/// succeeds without reading or writing either pointer.
///
/// # Safety
///
/// For `n > 0`, `strategy` must point to `n` readable `f64`s and `result` to
/// `n` writable `f64`s, and the two regions must not overlap.
#[allow(non_snake_case)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn computePnLSeries(
    strategy: *const f64,
    n: c_int,
    result: *mut f64,
) -> c_int {
    match checked_len(strategy, n, result) {
        Ok(0) => PNL_OK,
        Ok(len) => {
            // SAFETY: pointers are non-null and the caller guarantees `len`
            // valid, non-overlapping elements behind each.
            let (input, output) = unsafe {
                (
                    std::slice::from_raw_parts(strategy, len),
                    std::slice::from_raw_parts_mut(result, len),
                )
            };
            fill(input, output);
            PNL_OK
        }
        Err(e) => {
            tracing::warn!("computePnLSeries rejected call: {}", e);
            PNL_OUT_OF_RANGE
        }
    }
}

fn checked_len(strategy: *const f64, n: c_int, result: *mut f64) -> Result<usize, PnlError> {
    let len = usize::try_from(n).map_err(|_| PnlError::NegativeLength(i64::from(n)))?;
    if len == 0 {
        return Ok(0);
    }
    if strategy.is_null() {
        return Err(PnlError::OutOfRange {
            buffer: "strategy",
            len: 0,
            n: len,
        });
    }
    if result.is_null() {
        return Err(PnlError::OutOfRange {
            buffer: "result",
            len: 0,
            n: len,
        });
    }
    Ok(len)
}
