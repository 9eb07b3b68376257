/// Parses calendar figure strings like "10.5K", "1.2%", "-5" into raw numbers.
///
/// Thousands separators are stripped. A trailing K/M/B (case-insensitive)
/// scales the value; a trailing `%` is stripped WITHOUT scaling, because the
/// surprise magnitude compares percent figures at face value. Placeholder
/// strings ("", "-", "N/A") come back as `None`, never as an error.
pub fn parse_magnitude(raw: &str) -> Option<f64> {
    let clean = raw.trim().replace(',', "");
    if clean.is_empty() {
        return None;
    }

    let last = clean.chars().last()?;
    let (body, multiplier) = match last.to_ascii_uppercase() {
        'K' => (&clean[..clean.len() - 1], 1_000.0),
        'M' => (&clean[..clean.len() - 1], 1_000_000.0),
        'B' => (&clean[..clean.len() - 1], 1_000_000_000.0),
        '%' => (&clean[..clean.len() - 1], 1.0),
        _ => (clean.as_str(), 1.0),
    };

    let num: f64 = body.parse().ok()?;
    // "inf"/"nan" technically parse; a calendar cell never means that.
    if !num.is_finite() {
        return None;
    }
    Some(num * multiplier)
}
