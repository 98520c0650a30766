//! Pagination state for the table views.
//!
//! [`Pagination`] is an explicitly owned state container: page, page
//! size, and the server-reported totals, with derived display values and
//! the ellipsis-compressed page-number window for a pager UI. All
//! operations are infallible; out-of-range input is clamped or ignored
//! so callers never handle errors from pagination math.

mod paged;

pub use paged::{FetchTicket, LoadState, PagedLalin};

/// Width of the visible page-number window.
const MAX_VISIBLE_PAGES: u32 = 5;

/// Raw pagination state. `total_pages` and `count` are supplied by the
/// fetch collaborator after each server round trip, never computed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub count: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total_pages: 0,
            count: 0,
        }
    }
}

/// Partial update merged into [`PageConfig`], field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageUpdate {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total_pages: Option<u32>,
    pub count: Option<u64>,
}

/// One token of the pager row: a clickable page number or the
/// non-clickable ellipsis between the window and a boundary page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

/// Derived display quantities, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerView {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
    /// 1-based index of the first row on the current page.
    pub start_index: u64,
    /// 1-based index of the last row on the current page, capped at the
    /// total count. Below `start_index` when the result set is empty.
    pub end_index: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    config: PageConfig,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PageConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PageConfig {
        self.config
    }

    /// Moves to `page` if it lies in `1..=total_pages`; otherwise a
    /// no-op. The only mutator that changes `page` within bounds.
    pub fn go_to_page(&mut self, page: u32) {
        if page >= 1 && page <= self.config.total_pages {
            self.config.page = page;
        }
    }

    pub fn go_to_first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn go_to_last_page(&mut self) {
        self.go_to_page(self.config.total_pages);
    }

    pub fn go_to_next_page(&mut self) {
        self.go_to_page(self.config.page.saturating_add(1));
    }

    pub fn go_to_prev_page(&mut self) {
        self.go_to_page(self.config.page.saturating_sub(1));
    }

    /// Replaces the page size and resets to page 1: a size change
    /// invalidates the current offset. A zero limit is clamped to 1.
    pub fn change_page_size(&mut self, limit: u32) {
        self.config.limit = limit.max(1);
        self.config.page = 1;
    }

    /// Merges a partial update, typically the `total_pages`/`count`
    /// reported by a fetch result. Does not clamp.
    pub fn apply(&mut self, update: PageUpdate) {
        if let Some(page) = update.page {
            self.config.page = page;
        }
        if let Some(limit) = update.limit {
            self.config.limit = limit;
        }
        if let Some(total_pages) = update.total_pages {
            self.config.total_pages = total_pages;
        }
        if let Some(count) = update.count {
            self.config.count = count;
        }
    }

    pub fn reset(&mut self) {
        self.config = PageConfig::default();
    }

    pub fn view(&self) -> PagerView {
        let PageConfig {
            page,
            limit,
            total_pages,
            count,
        } = self.config;

        PagerView {
            current_page: page,
            page_size: limit,
            total_pages,
            total_count: count,
            start_index: u64::from(page).saturating_sub(1) * u64::from(limit) + 1,
            end_index: (u64::from(page) * u64::from(limit)).min(count),
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }

    /// The page-number sequence for the pager row: a 5-wide window
    /// centered on the current page, with the first and last page (and
    /// ellipsis markers) added when the window does not reach them.
    pub fn page_numbers(&self) -> Vec<PageToken> {
        let PageConfig {
            page, total_pages, ..
        } = self.config;

        let mut tokens = Vec::new();

        if total_pages <= MAX_VISIBLE_PAGES {
            tokens.extend((1..=total_pages).map(PageToken::Page));
            return tokens;
        }

        let mut start = page.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
        let end = start.saturating_add(MAX_VISIBLE_PAGES - 1).min(total_pages);

        // window hit the right edge; slide it left to keep 5 visible
        if end.saturating_sub(start) < MAX_VISIBLE_PAGES - 1 {
            start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
        }

        if start > 1 {
            tokens.push(PageToken::Page(1));
            if start > 2 {
                tokens.push(PageToken::Ellipsis);
            }
        }

        tokens.extend((start..=end).map(PageToken::Page));

        if end < total_pages {
            if end < total_pages - 1 {
                tokens.push(PageToken::Ellipsis);
            }
            tokens.push(PageToken::Page(total_pages));
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let pager = Pagination::new();
        let config = pager.config();

        assert_eq!(config.page, 1);
        assert_eq!(config.limit, 10);
        assert_eq!(config.total_pages, 0);
        assert_eq!(config.count, 0);
    }

    #[test]
    fn test_go_to_page_out_of_range_is_noop() {
        let mut pager = pager_with(3, 10, 5, 42);

        pager.go_to_page(0);
        assert_eq!(pager.config().page, 3);

        pager.go_to_page(6);
        assert_eq!(pager.config().page, 3);

        pager.go_to_page(5);
        assert_eq!(pager.config().page, 5);
    }

    #[test]
    fn test_navigation_clamps_at_boundaries() {
        let mut pager = pager_with(1, 10, 3, 25);

        pager.go_to_prev_page();
        assert_eq!(pager.config().page, 1);

        pager.go_to_next_page();
        assert_eq!(pager.config().page, 2);

        pager.go_to_last_page();
        assert_eq!(pager.config().page, 3);

        pager.go_to_next_page();
        assert_eq!(pager.config().page, 3);

        pager.go_to_first_page();
        assert_eq!(pager.config().page, 1);
    }

    #[test]
    fn test_change_page_size_resets_to_first_page() {
        let mut pager = pager_with(4, 10, 8, 80);

        pager.change_page_size(20);
        assert_eq!(pager.config().page, 1);
        assert_eq!(pager.config().limit, 20);

        // zero limit is clamped, page still resets
        pager.go_to_page(3);
        pager.change_page_size(0);
        assert_eq!(pager.config().page, 1);
        assert_eq!(pager.config().limit, 1);
    }

    #[test]
    fn test_apply_merges_partial_update() {
        let mut pager = Pagination::new();

        pager.apply(PageUpdate {
            total_pages: Some(7),
            count: Some(63),
            ..Default::default()
        });

        let config = pager.config();
        assert_eq!(config.page, 1);
        assert_eq!(config.limit, 10);
        assert_eq!(config.total_pages, 7);
        assert_eq!(config.count, 63);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut pager = pager_with(4, 50, 9, 420);
        pager.reset();
        assert_eq!(pager, Pagination::new());
    }

    #[test]
    fn test_view_indices() {
        let pager = pager_with(3, 10, 5, 42);
        let view = pager.view();

        assert_eq!(view.start_index, 21);
        assert_eq!(view.end_index, 30);
        assert!(view.has_next_page);
        assert!(view.has_prev_page);

        // last, short page
        let view = pager_with(5, 10, 5, 42).view();
        assert_eq!(view.start_index, 41);
        assert_eq!(view.end_index, 42);
        assert!(!view.has_next_page);

        // start <= end whenever there are rows, end never exceeds count
        for page in 1..=5 {
            let view = pager_with(page, 10, 5, 42).view();
            assert!(view.start_index <= view.end_index);
            assert!(view.end_index <= view.total_count);
        }
    }

    #[test]
    fn test_page_numbers_few_pages_verbatim() {
        assert_eq!(
            pager_with(2, 10, 4, 31).page_numbers(),
            pages(&[1, 2, 3, 4])
        );
        assert!(pager_with(1, 10, 0, 0).page_numbers().is_empty());
    }

    #[test]
    fn test_page_numbers_centered_window() {
        let tokens = pager_with(10, 10, 20, 200).page_numbers();

        let mut expected = vec![PageToken::Page(1), PageToken::Ellipsis];
        expected.extend(pages(&[8, 9, 10, 11, 12]));
        expected.push(PageToken::Ellipsis);
        expected.push(PageToken::Page(20));

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_page_numbers_left_edge() {
        let tokens = pager_with(1, 10, 20, 200).page_numbers();

        let mut expected = pages(&[1, 2, 3, 4, 5]);
        expected.push(PageToken::Ellipsis);
        expected.push(PageToken::Page(20));

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_page_numbers_right_edge_slides_window() {
        let tokens = pager_with(20, 10, 20, 200).page_numbers();

        let mut expected = vec![PageToken::Page(1), PageToken::Ellipsis];
        expected.extend(pages(&[16, 17, 18, 19, 20]));

        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_page_numbers_survives_page_beyond_total() {
        // apply() does not clamp, so a shrunken total can leave the
        // current page past the end; the window must still render
        let tokens = pager_with(12, 10, 7, 70).page_numbers();

        assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
        assert_eq!(tokens.last(), Some(&PageToken::Page(7)));
    }

    #[test]
    fn test_page_numbers_bounds() {
        for total_pages in [6, 7, 10, 50, 100] {
            for page in 1..=total_pages {
                let tokens = pager_with(page, 10, total_pages, 1000).page_numbers();

                assert!(tokens.len() <= 9, "window too wide for page {page}");
                assert!(tokens.contains(&PageToken::Page(1)));
                assert!(tokens.contains(&PageToken::Page(total_pages)));
                assert!(tokens.contains(&PageToken::Page(page)));
            }
        }
    }

    fn pager_with(page: u32, limit: u32, total_pages: u32, count: u64) -> Pagination {
        Pagination::with_config(PageConfig {
            page,
            limit,
            total_pages,
            count,
        })
    }

    fn pages(numbers: &[u32]) -> Vec<PageToken> {
        numbers.iter().copied().map(PageToken::Page).collect()
    }
}
