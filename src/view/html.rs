//! HTML text helpers

/// Escape text for use in element content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Width style for a bar filled to `ratio` (0 - 1)
pub fn bar_width(ratio: f64) -> String {
    format!("width: {:.1}%", (ratio * 100.0).clamp(0.0, 100.0))
}

/// Whole-number display of a stored amount
pub fn amount(value: f64) -> String {
    format!("{}", value.floor() as i64)
}

/// Per-second rate, fractions kept (`0.5`, `10`)
pub fn rate(value: f64) -> String {
    format!("{}", value)
}
