//! Number formatting for tooltip and axis labels.
//!
//! Prices get auto-detected decimal places with thousands separators;
//! market cap and volume use compact suffixes (`K`, `M`, `B`, `T`).

const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Trims trailing fractional zeros and inserts thousands separators.
pub fn group_thousands(formatted: &str) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    // "-0" after trimming reads oddly in a tooltip.
    let sign = if grouped == "0" && frac_part.is_none() { "" } else { sign };

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn decimal_places(value: f64) -> usize {
    let abs = value.abs();
    if abs >= 100.0 {
        0
    } else if abs >= 1.0 || abs == 0.0 {
        2
    } else {
        let exponent = abs.log10().floor().abs() as usize;
        (exponent + 2).min(8)
    }
}

/// Format with auto-detected decimal places.
pub fn display(value: f64) -> String {
    display_with_decimals(value, decimal_places(value))
}

/// Format with explicit decimal places.
pub fn display_with_decimals(value: f64, decimals: usize) -> String {
    group_thousands(&format!("{:.1$}", value, decimals))
}

/// Dollar-prefixed [`display`].
pub fn usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${}", display(-value))
    } else {
        format!("${}", display(value))
    }
}

/// Compact form for large magnitudes: `1.23B`, `45.6M`.
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    for (scale, suffix) in SUFFIXES {
        if abs >= scale {
            return format!("{}{}", display_with_decimals(value / scale, 2), suffix);
        }
    }
    display(value)
}
