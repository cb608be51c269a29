//! Text rendering of evaluation outcomes.
//!
//! Values are printed the way C's `%.15g` conversion prints them, so a result
//! file can be compared byte for byte with the ones produced by earlier tools.

use crate::{syntax::Evaluation, CalcNumber};

/// Significant digits kept when printing a value.
pub const PRECISION: usize = 15;

/// Renders an outcome as a single line: the value, or `ERROR:<offset>`.
pub fn render(outcome: &Evaluation) -> String {
    match outcome {
        Ok(value) => format!("{}\n", format_number(*value)),
        Err(error) => format!("ERROR:{}\n", error.offset()),
    }
}

/// Formats a value with [`PRECISION`] significant digits, dropping trailing zeros
/// and switching to exponent notation for very large or very small magnitudes.
pub fn format_number(value: CalcNumber) -> String {
    if value.is_nan() {
        return if value.is_sign_negative() { "-nan" } else { "nan" }.to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-inf" } else { "inf" }.to_owned();
    }

    // The exponent has to be taken after rounding to the target precision
    let scientific = format!("{:.*e}", PRECISION - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
