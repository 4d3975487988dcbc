pub mod sequence;
pub mod table;

pub use sequence::{RequestSequencer, RequestTicket};
pub use table::Table;

/// Money as "$1,234.56"
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

/// Percentage with one decimal, "12.5%"
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// An optional number, or "--" when missing
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "--".to_string())
}
