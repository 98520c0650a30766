//! Server-driven pagination: the pager wired to an async record source.
//!
//! Navigation mutates the local pager first, then issues a fetch whose
//! `total_pages`/`count` are merged back in. Each fetch carries a
//! generation number and a response is only applied while its generation
//! is still current, so a slow response cannot overwrite the state of a
//! later request. (The original UI let the last-arriving response win;
//! rejecting stale responses here is a deliberate change.)

use anyhow::Result;
use tracing::debug;

use crate::pagination::{PageToken, PageUpdate, PagerView, Pagination};
use crate::records::LalinRecord;
use crate::services::lalin::{LalinApi, LalinPage, LalinQuery};

/// Load state of the most recent fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Identifies one issued fetch. A completion is applied only if no newer
/// fetch was issued after its ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// A [`Pagination`] engine bound to a [`LalinApi`] source.
#[derive(Debug)]
pub struct PagedLalin<A> {
    api: A,
    pager: Pagination,
    state: LoadState,
    error: Option<String>,
    generation: u64,
}

impl<A> PagedLalin<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            pager: Pagination::new(),
            state: LoadState::Idle,
            error: None,
            generation: 0,
        }
    }

    pub fn view(&self) -> PagerView {
        self.pager.view()
    }

    pub fn page_numbers(&self) -> Vec<PageToken> {
        self.pager.page_numbers()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Restores the pager and load state to their defaults. Does not
    /// invalidate an in-flight fetch; the next issued one does.
    pub fn reset(&mut self) {
        self.pager.reset();
        self.state = LoadState::Idle;
        self.error = None;
    }

    /// Marks a fetch as issued and returns its ticket. Any earlier
    /// ticket becomes stale from this point on.
    pub fn issue(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.error = None;
        FetchTicket(self.generation)
    }

    /// Records the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and leaves the pager untouched when a newer fetch
    /// was issued after `ticket`.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: &Result<LalinPage>) -> bool {
        if ticket.0 != self.generation {
            debug!(
                issued = ticket.0,
                current = self.generation,
                "Dropping stale page response"
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                self.pager.apply(PageUpdate {
                    total_pages: Some(page.total_pages),
                    count: Some(page.count),
                    ..Default::default()
                });
                self.state = LoadState::Success;
            }
            Err(err) => {
                self.state = LoadState::Error;
                self.error = Some(err.to_string());
            }
        }

        true
    }
}

impl<A: LalinApi> PagedLalin<A> {
    /// Fetches the current page. The query's own `page`/`limit` are
    /// overridden by the pager state, which is always mutated before the
    /// request goes out.
    pub async fn fetch(&mut self, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        let view = self.pager.view();
        let query = query
            .clone()
            .with_page(view.current_page)
            .with_limit(view.page_size);

        let ticket = self.issue();
        let outcome = self.api.fetch_lalins(&query).await;
        self.complete(ticket, &outcome);

        Ok(outcome?.rows)
    }

    pub async fn go_to_page(&mut self, page: u32, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        self.pager.go_to_page(page);
        self.fetch(query).await
    }

    pub async fn go_to_first_page(&mut self, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        self.pager.go_to_first_page();
        self.fetch(query).await
    }

    pub async fn go_to_last_page(&mut self, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        self.pager.go_to_last_page();
        self.fetch(query).await
    }

    pub async fn go_to_next_page(&mut self, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        self.pager.go_to_next_page();
        self.fetch(query).await
    }

    pub async fn go_to_prev_page(&mut self, query: &LalinQuery) -> Result<Vec<LalinRecord>> {
        self.pager.go_to_prev_page();
        self.fetch(query).await
    }

    pub async fn change_page_size(
        &mut self,
        limit: u32,
        query: &LalinQuery,
    ) -> Result<Vec<LalinRecord>> {
        self.pager.change_page_size(limit);
        self.fetch(query).await
    }
}
