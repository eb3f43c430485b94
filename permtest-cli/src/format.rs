//! Numeric output formatting.

/// Format `x` with `precision` significant digits, C `%g` style.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `precision`; trailing zeros are dropped either way.
pub fn format_general(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

/// Format `x` with the fewest digits that read back exactly, `%g` style.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least 6.
pub fn format_shortest(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    let sci = format!("{:e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= 6 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        x.to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation() {
        assert_eq!(format_general(0.1, 3), "0.1");
        assert_eq!(format_general(0.05, 3), "0.05");
        assert_eq!(format_general(1.0, 3), "1");
        assert_eq!(format_general(0.123456, 3), "0.123");
        assert_eq!(format_general(0.000123456, 3), "0.000123");
        assert_eq!(format_general(12.5, 3), "12.5");
    }

    #[test]
    fn rounding_carries_into_next_digit() {
        assert_eq!(format_general(0.09996, 3), "0.1");
        assert_eq!(format_general(999.7, 3), "1e+03");
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(format_general(1.23456e-5, 3), "1.23e-05");
        assert_eq!(format_general(2.0e-7, 3), "2e-07");
        assert_eq!(format_general(123456.0, 3), "1.23e+05");
    }

    #[test]
    fn shortest_notation() {
        assert_eq!(format_shortest(2.5), "2.5");
        assert_eq!(format_shortest(7.0), "7");
        assert_eq!(format_shortest(123456.0), "123456");
        assert_eq!(format_shortest(1234567.0), "1.234567e+06");
        assert_eq!(format_shortest(0.0001), "0.0001");
        assert_eq!(format_shortest(0.0000001), "1e-07");
        assert_eq!(format_shortest(-3.25e-9), "-3.25e-09");
        assert_eq!(format_shortest(0.0), "0");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_general(0.0, 3), "0");
        assert_eq!(format_general(f64::NAN, 3), "NaN");
        assert_eq!(format_general(-0.25, 3), "-0.25");
    }
}
