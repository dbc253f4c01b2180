//! Text rendering for complex amplitudes.
//!
//! Evaluated amplitudes are written back into the input fields (and from there
//! into history snapshots) as plain text such as `3 - 2.01i`.

use thiserror::Error;

/// Magnitudes outside `[1e-6, 1e21)` switch to exponent notation.
const EXP_LOWER: f64 = 1e-6;
const EXP_UPPER: f64 = 1e21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Error in formatting. NaN or infinity")]
pub struct NonFiniteError;

/// Format a complex value as `re`, `re + im i` or `re - |im|i`.
///
/// Components use the shortest representation that round-trips, with
/// exponent notation for very small or very large magnitudes (`1e-26`).
pub fn format_complex(re: f64, im: f64) -> Result<String, NonFiniteError> {
    if !re.is_finite() || !im.is_finite() {
        return Err(NonFiniteError);
    }

    let real = format_component(re);
    if im == 0.0 {
        return Ok(real);
    }

    let sign = if im > 0.0 { '+' } else { '-' };
    Ok(format!("{real} {sign} {}i", format_component(im.abs())))
}

fn format_component(value: f64) -> String {
    // Adding zero folds -0.0 into 0.0.
    let value = value + 0.0;
    let magnitude = value.abs();
    if magnitude != 0.0 && !(EXP_LOWER..EXP_UPPER).contains(&magnitude) {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => formatted,
        };
    }
    format!("{value}")
}
