//! Record schema for toll-gate traffic ("lalin") rows.
//!
//! Field names mirror the backend JSON exactly. Payment channels default
//! to zero when absent, so incomplete rows are normalized at the
//! transport boundary and never reach the aggregation layer as errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A named payment channel on a lalin row.
///
/// `Tunai` is the cash lane; the seven bank-branded channels plus `EFlo`
/// are the electronic lanes. The internal "dinas" (staff) channels are
/// not payment methods and are only reachable through [`LalinRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Tunai,
    EMandiri,
    EBri,
    EBni,
    EBca,
    ENobu,
    EDki,
    EMega,
    EFlo,
}

impl PaymentMethod {
    /// The backend's field name for this channel (note `eDKI`'s casing).
    pub fn wire_name(self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::EMandiri => "eMandiri",
            PaymentMethod::EBri => "eBri",
            PaymentMethod::EBni => "eBni",
            PaymentMethod::EBca => "eBca",
            PaymentMethod::ENobu => "eNobu",
            PaymentMethod::EDki => "eDKI",
            PaymentMethod::EMega => "eMega",
            PaymentMethod::EFlo => "eFlo",
        }
    }

    /// Display label for charts and tables.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Tunai => "Tunai",
            PaymentMethod::EMandiri => "e-Mandiri",
            PaymentMethod::EBri => "e-BRI",
            PaymentMethod::EBni => "e-BNI",
            PaymentMethod::EBca => "e-BCA",
            PaymentMethod::ENobu => "e-Nobu",
            PaymentMethod::EDki => "e-DKI",
            PaymentMethod::EMega => "e-Mega",
            PaymentMethod::EFlo => "e-Flo",
        }
    }
}

/// The 8 electronic channels in the order the payment-method chart lists
/// them. Cash is deliberately absent.
pub const ELECTRONIC_METHODS: [PaymentMethod; 8] = [
    PaymentMethod::EMandiri,
    PaymentMethod::EBri,
    PaymentMethod::EBni,
    PaymentMethod::EBca,
    PaymentMethod::ENobu,
    PaymentMethod::EDki,
    PaymentMethod::EMega,
    PaymentMethod::EFlo,
];

/// The 7 bank-branded channels that make up the e-toll total. Flo is
/// billed separately and excluded here.
pub const ETOLL_METHODS: [PaymentMethod; 7] = [
    PaymentMethod::EMandiri,
    PaymentMethod::EBri,
    PaymentMethod::EBni,
    PaymentMethod::EBca,
    PaymentMethod::ENobu,
    PaymentMethod::EDki,
    PaymentMethod::EMega,
];

/// One traffic row: the per-channel amounts recorded for a single
/// (gate, date, shift, vehicle class) tuple.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LalinRecord {
    pub id: u64,

    /// Road segment ("cabang"/"ruas") the gate belongs to.
    #[serde(rename = "IdCabang")]
    pub id_cabang: u32,

    #[serde(rename = "IdGerbang")]
    pub id_gerbang: u32,

    #[serde(rename = "Tanggal")]
    pub tanggal: NaiveDate,

    /// Operating shift, 1..=3.
    #[serde(rename = "Shift")]
    pub shift: u8,

    #[serde(rename = "IdGardu", default)]
    pub id_gardu: Option<u32>,

    /// Vehicle class, 1..=5.
    #[serde(rename = "Golongan")]
    pub golongan: u8,

    #[serde(rename = "IdAsalGerbang", default)]
    pub id_asal_gerbang: Option<u32>,

    // cash and staff channels
    #[serde(rename = "Tunai", default)]
    pub tunai: u64,
    #[serde(rename = "DinasOpr", default)]
    pub dinas_opr: u64,
    #[serde(rename = "DinasMitra", default)]
    pub dinas_mitra: u64,
    #[serde(rename = "DinasKary", default)]
    pub dinas_kary: u64,

    // electronic channels
    #[serde(rename = "eMandiri", default)]
    pub e_mandiri: u64,
    #[serde(rename = "eBri", default)]
    pub e_bri: u64,
    #[serde(rename = "eBni", default)]
    pub e_bni: u64,
    #[serde(rename = "eBca", default)]
    pub e_bca: u64,
    #[serde(rename = "eNobu", default)]
    pub e_nobu: u64,
    #[serde(rename = "eDKI", default)]
    pub e_dki: u64,
    #[serde(rename = "eMega", default)]
    pub e_mega: u64,
    #[serde(rename = "eFlo", default)]
    pub e_flo: u64,
}

impl LalinRecord {
    /// Amount recorded on a single named channel.
    pub fn amount(&self, method: PaymentMethod) -> u64 {
        match method {
            PaymentMethod::Tunai => self.tunai,
            PaymentMethod::EMandiri => self.e_mandiri,
            PaymentMethod::EBri => self.e_bri,
            PaymentMethod::EBni => self.e_bni,
            PaymentMethod::EBca => self.e_bca,
            PaymentMethod::ENobu => self.e_nobu,
            PaymentMethod::EDki => self.e_dki,
            PaymentMethod::EMega => self.e_mega,
            PaymentMethod::EFlo => self.e_flo,
        }
    }

    /// Sum of the 7 bank-branded electronic channels.
    pub fn etoll_amount(&self) -> u64 {
        ETOLL_METHODS.iter().map(|&m| self.amount(m)).sum()
    }

    /// Sum of the 3 internal staff channels.
    pub fn dinas_amount(&self) -> u64 {
        self.dinas_opr + self.dinas_mitra + self.dinas_kary
    }

    /// Total traffic for display groupings: cash plus all 8 electronic
    /// channels. Staff channels are excluded here but counted by the
    /// payment-totals roll-up.
    pub fn traffic_total(&self) -> u64 {
        self.tunai + ELECTRONIC_METHODS.iter().map(|&m| self.amount(m)).sum::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_channels_default_to_zero() {
        let json = r#"{
            "id": 7,
            "IdCabang": 2,
            "IdGerbang": 3,
            "Tanggal": "2024-01-01",
            "Shift": 1,
            "Golongan": 4
        }"#;

        let record: LalinRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.tunai, 0);
        assert_eq!(record.e_flo, 0);
        assert_eq!(record.id_gardu, None);
        assert_eq!(record.id_asal_gerbang, None);
        assert_eq!(record.traffic_total(), 0);
    }

    #[test]
    fn test_edki_wire_casing() {
        let json = r#"{
            "id": 1,
            "IdCabang": 1,
            "IdGerbang": 1,
            "Tanggal": "2024-01-01",
            "Shift": 1,
            "Golongan": 1,
            "eDKI": 12
        }"#;

        let record: LalinRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.e_dki, 12);
        assert_eq!(record.amount(PaymentMethod::EDki), 12);
    }

    #[test]
    fn test_traffic_total_excludes_dinas() {
        let record = LalinRecord {
            tunai: 10,
            dinas_opr: 100,
            dinas_mitra: 100,
            dinas_kary: 100,
            e_mandiri: 5,
            e_flo: 2,
            ..Default::default()
        };

        assert_eq!(record.traffic_total(), 17);
        assert_eq!(record.dinas_amount(), 300);
        assert_eq!(record.etoll_amount(), 5);
    }
}
