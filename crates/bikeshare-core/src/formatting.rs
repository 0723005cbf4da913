/// Round `value` to `decimals` decimal places (half away from zero).
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::round_to;
///
/// assert_eq!(round_to(0.123_456, 2), 0.12);
/// assert_eq!(round_to(1.5, 0), 2.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Format a floating-point number with thousands separators and a fixed
/// number of decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// assert_eq!(format_number(0.1, 2), "0.10");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let rounded = round_to(value.abs(), decimals);

    let grouped = group_thousands(&(rounded.trunc() as u64).to_string());
    let body = if decimals == 0 {
        grouped
    } else {
        // `{:.N}` of the fractional part yields "0.xx"; keep ".xx".
        let frac = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        format!("{}{}", grouped, &frac[1..])
    };

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a trip count with thousands separators, e.g. `"12,345"`.
pub fn format_count(count: usize) -> String {
    group_thousands(&count.to_string())
}

/// `(part / whole) * 100` rounded to `decimals`; `0.0` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::percentage;
///
/// assert_eq!(percentage(1, 4, 1), 25.0);
/// assert_eq!(percentage(3, 0, 2), 0.0);
/// ```
pub fn percentage(part: usize, whole: usize, decimals: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round_to(part as f64 / whole as f64 * 100.0, decimals)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of a digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
