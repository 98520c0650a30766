//! Display formatting helpers for report output.
//!
//! Pure functions only; nothing here feeds back into the aggregation or
//! pagination math.

/// Formats an integer with id-ID thousands grouping (`1234567` →
/// `"1.234.567"`).
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }

    out
}

/// Share of `value` in `total` as a one-decimal percentage string.
/// A zero total yields `"0%"`.
pub fn format_percentage(value: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", value as f64 / total as f64 * 100.0)
}

/// Shift label with its operating hours.
pub fn format_shift(shift: u8) -> String {
    match shift {
        1 => "Shift 1 (00:00-08:00)".to_string(),
        2 => "Shift 2 (08:00-16:00)".to_string(),
        3 => "Shift 3 (16:00-24:00)".to_string(),
        other => format!("Shift {other}"),
    }
}

/// Vehicle-class label (`1` → `"Gol I"`).
pub fn format_golongan(golongan: u8) -> String {
    match golongan {
        1 => "Gol I".to_string(),
        2 => "Gol II".to_string(),
        3 => "Gol III".to_string(),
        4 => "Gol IV".to_string(),
        5 => "Gol V".to_string(),
        other => format!("Gol {other}"),
    }
}

/// Combined "gate - segment" display name; falls back to whichever part
/// is present, or `-` when both are empty.
pub fn format_gerbang_name(nama_gerbang: &str, nama_cabang: &str) -> String {
    match (nama_gerbang.is_empty(), nama_cabang.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => nama_gerbang.to_string(),
        (true, false) => nama_cabang.to_string(),
        (false, false) => format!("{nama_gerbang} - {nama_cabang}"),
    }
}
