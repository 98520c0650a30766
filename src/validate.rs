//! Field-level validation for master-data forms.
//!
//! Each check returns a message or `None`; form validators collect the
//! messages into a map keyed by field name, which the caller renders
//! next to the offending inputs. Validation never reaches the
//! aggregation or pagination core.

use std::collections::BTreeMap;

use crate::services::gerbang::GerbangForm;

/// Validation messages keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Rejects empty or whitespace-only values.
pub fn validate_required(value: &str, field: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{field} wajib diisi"));
    }
    None
}

/// Enforces an upper bound on the character count.
pub fn validate_max_length(value: &str, field: &str, max: usize) -> Option<String> {
    if value.chars().count() > max {
        return Some(format!("{field} maksimal {max} karakter"));
    }
    None
}

/// Rejects zero; ids are 1-based.
pub fn validate_positive(value: u32, field: &str) -> Option<String> {
    if value == 0 {
        return Some(format!("{field} harus lebih dari 0"));
    }
    None
}

/// Maximum length accepted by the backend for gate and segment names.
const NAME_MAX: usize = 100;

/// Validates a gate create/update payload, collecting one message per
/// offending field.
pub fn validate_gerbang_form(form: &GerbangForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(message) = validate_required(&form.nama_gerbang, "Nama Gerbang")
        .or_else(|| validate_max_length(&form.nama_gerbang, "Nama Gerbang", NAME_MAX))
    {
        errors.insert("NamaGerbang", message);
    }

    if let Some(message) = validate_required(&form.nama_cabang, "Nama Cabang")
        .or_else(|| validate_max_length(&form.nama_cabang, "Nama Cabang", NAME_MAX))
    {
        errors.insert("NamaCabang", message);
    }

    if let Some(message) = validate_positive(form.id_cabang, "ID Cabang") {
        errors.insert("IdCabang", message);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_passes() {
        let form = form("Gerbang Cililitan", "Jagorawi", 1);
        assert!(validate_gerbang_form(&form).is_ok());
    }

    #[test]
    fn test_empty_names_are_rejected_per_field() {
        let errors = validate_gerbang_form(&form("", "  ", 1)).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors["NamaGerbang"], "Nama Gerbang wajib diisi");
        assert_eq!(errors["NamaCabang"], "Nama Cabang wajib diisi");
    }

    #[test]
    fn test_zero_id_cabang_is_rejected() {
        let errors = validate_gerbang_form(&form("Gerbang A", "Ruas 1", 0)).unwrap_err();
        assert_eq!(errors["IdCabang"], "ID Cabang harus lebih dari 0");
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        let errors =
            validate_gerbang_form(&form(&"x".repeat(101), "Ruas 1", 1)).unwrap_err();
        assert!(errors["NamaGerbang"].contains("maksimal"));
    }

    fn form(nama_gerbang: &str, nama_cabang: &str, id_cabang: u32) -> GerbangForm {
        GerbangForm {
            nama_gerbang: nama_gerbang.to_string(),
            nama_cabang: nama_cabang.to_string(),
            id_cabang,
        }
    }
}
