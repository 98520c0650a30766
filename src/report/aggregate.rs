use std::collections::BTreeMap;

use crate::records::{ELECTRONIC_METHODS, LalinRecord};
use crate::report::types::{DashboardSummary, PaymentTotals, SeriesEntry};

/// Sums each of the 8 electronic channels across all records, in channel
/// declaration order. Channels with a zero total are omitted; cash is
/// not part of this grouping.
pub fn group_by_payment_method(records: &[LalinRecord]) -> Vec<SeriesEntry> {
    ELECTRONIC_METHODS
        .iter()
        .filter_map(|&method| {
            let total: u64 = records.iter().map(|r| r.amount(method)).sum();
            (total > 0).then(|| SeriesEntry {
                key: method.wire_name().to_string(),
                label: method.label().to_string(),
                value: total,
            })
        })
        .collect()
}

/// Buckets total traffic by gate, sorted descending by value. Ties come
/// out ascending by gate id.
pub fn group_by_gerbang(records: &[LalinRecord]) -> Vec<SeriesEntry> {
    let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.id_gerbang).or_default() += record.traffic_total();
    }

    let mut entries: Vec<SeriesEntry> = buckets
        .into_iter()
        .map(|(id, value)| SeriesEntry {
            key: id.to_string(),
            label: format!("Gerbang {id}"),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

/// Buckets total traffic by shift, sorted ascending by shift number.
pub fn group_by_shift(records: &[LalinRecord]) -> Vec<SeriesEntry> {
    let mut buckets: BTreeMap<u8, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.shift).or_default() += record.traffic_total();
    }

    buckets
        .into_iter()
        .map(|(shift, value)| SeriesEntry {
            key: shift.to_string(),
            label: format!("Shift {shift}"),
            value,
        })
        .collect()
}

/// Buckets total traffic by road segment, sorted descending by value.
pub fn group_by_ruas(records: &[LalinRecord]) -> Vec<SeriesEntry> {
    let mut buckets: BTreeMap<u32, u64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.id_cabang).or_default() += record.traffic_total();
    }

    let mut entries: Vec<SeriesEntry> = buckets
        .into_iter()
        .map(|(id, value)| SeriesEntry {
            key: id.to_string(),
            label: format!("Ruas {id}"),
            value,
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

/// Single pass accumulating the payment roll-up used by the summary
/// tiles and the report footer. `total_ktp` stays zero; the envelope
/// defines it but nothing feeds it.
pub fn payment_totals(records: &[LalinRecord]) -> PaymentTotals {
    let mut totals = PaymentTotals::default();

    for record in records {
        let tunai = record.tunai + record.dinas_amount();
        let etoll = record.etoll_amount();

        totals.total_tunai += tunai;
        totals.total_e_toll += etoll;
        totals.total_flo += record.e_flo;
        totals.total_keseluruhan += tunai + etoll + record.e_flo;
        totals.total_e_toll_tunai_flo += etoll + tunai + record.e_flo;
    }

    totals
}

/// Runs all four groupings over one day's records. Each grouping is its
/// own linear pass; the lists are small enough that clarity wins over a
/// fused multi-key scan.
pub fn dashboard_summary(records: &[LalinRecord]) -> DashboardSummary {
    DashboardSummary {
        payment_methods: group_by_payment_method(records),
        gerbangs: group_by_gerbang(records),
        shifts: group_by_shift(records),
        ruas: group_by_ruas(records),
        total_records: records.len(),
    }
}
