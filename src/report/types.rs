//! Data types produced by the aggregation pipeline.

use serde::Serialize;

/// One entry of a grouped series: a stable key, a display label, and the
/// summed amount. Entries are rebuilt on every aggregation pass and feed
/// straight into a chart or table renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesEntry {
    pub key: String,
    pub label: String,
    pub value: u64,
}

/// Roll-up of per-channel totals over one record list. Field names on
/// the wire match the report envelope the dashboard consumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    /// Cash lane plus the three internal staff channels.
    pub total_tunai: u64,
    /// The seven bank-branded channels; Flo is tracked separately.
    pub total_e_toll: u64,
    pub total_flo: u64,
    /// Defined by the report envelope but never populated upstream; kept
    /// as an always-zero placeholder.
    #[serde(rename = "totalKTP")]
    pub total_ktp: u64,
    pub total_keseluruhan: u64,
    pub total_e_toll_tunai_flo: u64,
}

/// Everything the dashboard page renders for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub payment_methods: Vec<SeriesEntry>,
    pub gerbangs: Vec<SeriesEntry>,
    pub shifts: Vec<SeriesEntry>,
    pub ruas: Vec<SeriesEntry>,
    pub total_records: usize,
}
