//! Contract for the lalin (traffic) backend collaborator.

use anyhow::Result;
use chrono::NaiveDate;

use crate::records::LalinRecord;
use crate::report::{self, DashboardSummary};

/// Page size used to pull "all records for the day" in one request when
/// building dashboard charts.
pub const DASHBOARD_FETCH_LIMIT: u32 = 1000;

/// Query parameters for the paginated lalin listing. Absent fields are
/// left to the backend's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LalinQuery {
    pub tanggal: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl LalinQuery {
    pub fn for_date(tanggal: NaiveDate) -> Self {
        Self {
            tanggal: Some(tanggal),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// One page of records plus the server's pagination metadata.
#[derive(Debug, Clone, Default)]
pub struct LalinPage {
    pub rows: Vec<LalinRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub count: u64,
}

/// Abstraction over the lalin backend.
#[async_trait::async_trait]
pub trait LalinApi {
    /// Fetches one page of traffic records matching `query`.
    async fn fetch_lalins(&self, query: &LalinQuery) -> Result<LalinPage>;
}

/// Fetches every record for `tanggal` as a single oversized page and
/// aggregates it into the chart-ready dashboard summary.
pub async fn dashboard_summary_for_date<A: LalinApi>(
    api: &A,
    tanggal: NaiveDate,
) -> Result<DashboardSummary> {
    let query = LalinQuery::for_date(tanggal)
        .with_page(1)
        .with_limit(DASHBOARD_FETCH_LIMIT);

    let page = api.fetch_lalins(&query).await?;
    Ok(report::dashboard_summary(&page.rows))
}
