//! CSV export of lalin record lists.
//!
//! The column set is the fixed 20-column layout downstream spreadsheets
//! expect; absent booth/origin ids become empty fields.

use anyhow::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::records::LalinRecord;

/// Column order of the export format. Do not reorder.
const EXPORT_HEADER: [&str; 20] = [
    "ID",
    "ID Cabang",
    "ID Gerbang",
    "Tanggal",
    "Shift",
    "ID Gardu",
    "Golongan",
    "ID Asal Gerbang",
    "Tunai",
    "Dinas Opr",
    "Dinas Mitra",
    "Dinas Kary",
    "e-Mandiri",
    "e-BRI",
    "e-BNI",
    "e-BCA",
    "e-Nobu",
    "e-DKI",
    "e-Mega",
    "e-Flo",
];

fn record_row(record: &LalinRecord) -> [String; 20] {
    let optional = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();

    [
        record.id.to_string(),
        record.id_cabang.to_string(),
        record.id_gerbang.to_string(),
        record.tanggal.to_string(),
        record.shift.to_string(),
        optional(record.id_gardu),
        record.golongan.to_string(),
        optional(record.id_asal_gerbang),
        record.tunai.to_string(),
        record.dinas_opr.to_string(),
        record.dinas_mitra.to_string(),
        record.dinas_kary.to_string(),
        record.e_mandiri.to_string(),
        record.e_bri.to_string(),
        record.e_bni.to_string(),
        record.e_bca.to_string(),
        record.e_nobu.to_string(),
        record.e_dki.to_string(),
        record.e_mega.to_string(),
        record.e_flo.to_string(),
    ]
}

/// Serializes `records` to CSV text, header included.
pub fn to_csv(records: &[LalinRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(EXPORT_HEADER)?;
    for record in records {
        writer.write_record(record_row(record))?;
    }
    writer.flush()?;

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Writes `records` as CSV to `path`, creating or truncating the file.
pub fn write_csv(path: &Path, records: &[LalinRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(EXPORT_HEADER)?;
    for record in records {
        writer.write_record(record_row(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// Replaces everything outside `[a-z0-9]` with `_` and lowercases, so a
/// date or search string can be embedded in a filename.
pub fn sanitize_filename(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<sanitized prefix>_<yyyymmdd_hhmmss>.csv`
pub fn export_filename(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.csv", sanitize_filename(prefix), timestamp)
}

/// Writes the export artifact into `dir` under a timestamped name and
/// returns the full path. The directory is created if missing.
pub fn export_records(dir: &Path, prefix: &str, records: &[LalinRecord]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(export_filename(prefix));
    write_csv(&path, records)?;

    info!(path = %path.display(), rows = records.len(), "Export written");
    Ok(path)
}
