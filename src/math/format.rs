//! Rounding and display formatting for calculator output

/// Round to `decimals` places
///
/// Halfway cases round away from zero (`f64::round`).
pub fn round(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to cents
pub fn round2(value: f64) -> f64 {
    round(value, 2)
}

/// Format as US dollars: `$12,345.67`, `-$80.00`
pub fn format_currency(value: f64) -> String {
    let body = format_number(value.abs(), 2);
    if value < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Format as a percentage with trailing zeros dropped: `5.25%`, `5%`
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{}%", round(value, decimals))
}

/// Format with thousands separators and a fixed number of decimals: `1,234,567`
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
