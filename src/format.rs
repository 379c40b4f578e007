use chrono::NaiveDate;

/// `1234567` -> `"1,234,567"`, `-1500` -> `"-1,500"`.
pub fn thousands<N: Into<i128>>(n: N) -> String {
    let n = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed two decimals, ties rounded away from zero (`0.125` -> `"0.13"`).
///
/// Non-finite values are not guarded; they print as `Infinity`, `-Infinity`
/// or `NaN` rather than Rust's `inf` spelling.
pub fn percent(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// `YYYY-MM-DD`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
