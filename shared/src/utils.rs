// Small formatting helpers shared by the engine and the chart renderer.

/// Upper-cases the first character and lower-cases the rest ("bitcoin" -> "Bitcoin").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Formats a price for axis labels, using fewer decimals as the magnitude grows.
pub fn format_price(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1000.0 {
        group_thousands(value.round() as i64)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else if abs == 0.0 {
        "0".to_string()
    } else {
        format!("{:.4}", value)
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}
