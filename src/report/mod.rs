//! Client-side aggregation of lalin records into chart-ready series and
//! payment totals.

mod aggregate;
mod types;

pub use aggregate::{
    dashboard_summary, group_by_gerbang, group_by_payment_method, group_by_ruas, group_by_shift,
    payment_totals,
};
pub use types::{DashboardSummary, PaymentTotals, SeriesEntry};
