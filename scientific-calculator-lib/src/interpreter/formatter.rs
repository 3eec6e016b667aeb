/// Magnitudes below this are shown as plain decimals instead of collapsing to
/// exponential form.
const SMALL_MAGNITUDE: f64 = 1e-6;
/// Magnitudes above this switch to exponential form.
const LARGE_MAGNITUDE: f64 = 1e10;
/// Plain decimal renderings longer than this are retried with fewer digits.
const MAX_PLAIN_LENGTH: usize = 15;

/// Renders a finite result as the shortest human-scale decimal string.
///
/// Whole numbers lose their decimal point, very large magnitudes use
/// exponential notation (`1.2346E+10`) and everything else is rendered with up
/// to ten decimals, trailing zeros stripped.
///
/// # Examples
///
/// ```
/// use scientific_calculator::interpreter::formatter::format_result;
///
/// assert_eq!(format_result(4.0), "4");
/// assert_eq!(format_result(0.1 + 0.2), "0.3");
/// assert_eq!(format_result(12345678901.5), "1.2346E+10");
/// ```
pub fn format_result(value: f64) -> String {
    // `as` saturates, so 2^63 prints as i64::MAX.
    if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
        return format!("{}", value as i64);
    }

    let magnitude = value.abs();
    if magnitude < SMALL_MAGNITUDE {
        return strip_trailing_zeros(format!("{:.10}", value));
    }
    if magnitude > LARGE_MAGNITUDE {
        return format_exponential(value);
    }

    let formatted = strip_trailing_zeros(format!("{:.10}", value));
    if formatted.len() > MAX_PLAIN_LENGTH {
        strip_trailing_zeros(format!("{:.6}", value))
    } else {
        formatted
    }
}

fn strip_trailing_zeros(formatted: String) -> String {
    if !formatted.contains('.') {
        return formatted;
    }
    let stripped = formatted.trim_end_matches('0').trim_end_matches('.');
    match stripped {
        "-0" => "0".to_string(),
        stripped => stripped.to_string(),
    }
}

/// Four fractional mantissa digits and a signed exponent of at least two digits.
fn format_exponential(value: f64) -> String {
    let formatted = format!("{:.4e}", value);
    let (mantissa, exponent) = match formatted.split_once('e') {
        Some(parts) => parts,
        None => return formatted,
    };
    match exponent.parse::<i32>() {
        Ok(exponent) => {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        Err(_) => formatted,
    }
}
