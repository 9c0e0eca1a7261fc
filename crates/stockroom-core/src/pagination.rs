//! # Paginator
//!
//! Slices a filtered collection into fixed-size page windows and computes
//! the metadata the tables render around them.
//!
//! ## Page Window Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  23 filtered items, page size 10                                        │
//! │                                                                         │
//! │   page 1: [0..10)   "Showing 1 to 10 of 23"    « Prev disabled         │
//! │   page 2: [10..20)  "Showing 11 to 20 of 23"                           │
//! │   page 3: [20..23)  "Showing 21 to 23 of 23"   Next » disabled         │
//! │   page 4: []        out of range → empty slice, never an error         │
//! │                                                                         │
//! │   totalPages = max(1, ceil(23 / 10)) = 3                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages are 1-indexed everywhere. An empty collection still has one
//! selectable page so the controls always show a "1" button.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Dataset;

// =============================================================================
// Page Metadata
// =============================================================================

/// Number of pages for `total_items`, never less than 1.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Everything the table footer needs besides the rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Requested page (1-indexed), echoed back even when out of range.
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based position of the first row on this page. Never below 1.
    pub showing_start: usize,
    /// 1-based position of the last row on this page, capped at total_items.
    pub showing_end: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageMeta {
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_pages(total_items, page_size);

        PageMeta {
            page,
            page_size,
            total_items,
            total_pages,
            showing_start: page
                .saturating_sub(1)
                .saturating_mul(page_size)
                .saturating_add(1),
            showing_end: page.saturating_mul(page_size).min(total_items),
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }

    /// True when the requested page has no rows to show.
    pub fn is_empty(&self) -> bool {
        self.showing_end < self.showing_start
    }

    /// Footer text, e.g. `Showing 11 to 20 of 23`.
    pub fn label(&self) -> String {
        if self.total_items == 0 {
            return "No items".to_string();
        }
        format!(
            "Showing {} to {} of {}",
            self.showing_start, self.showing_end, self.total_items
        )
    }
}

// =============================================================================
// Page
// =============================================================================

/// One page window plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Converts the rows while keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// Returns the rows in `[(page-1)*page_size, page*page_size)`, clipped to
/// the collection. Page 0 or a page past the end gives an empty slice.
///
/// ## Example
/// ```rust
/// use stockroom_core::pagination::paginate;
///
/// let items: Vec<u32> = (1..=23).collect();
/// let last = paginate(&items, 3, 10);
/// assert_eq!(last.items, vec![21, 22, 23]);
/// assert_eq!(last.meta.total_pages, 3);
/// assert!(!last.meta.has_next);
/// ```
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let meta = PageMeta::new(page, page_size, items.len());

    let rows = if page == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(meta.page_size);
        let end = start.saturating_add(meta.page_size).min(items.len());
        items.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
    };

    Page { items: rows, meta }
}

// =============================================================================
// Page Controls
// =============================================================================

/// One numbered page button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageButton {
    pub page: usize,
    pub current: bool,
}

/// Previous / numbered / Next controls for a table footer.
///
/// `previous` and `next` hold the page they lead to, or `None` when the
/// control is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageControls {
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub buttons: Vec<PageButton>,
}

impl PageControls {
    /// One button per page `1..=total_pages`.
    pub fn for_meta(meta: &PageMeta) -> Self {
        let buttons = (1..=meta.total_pages)
            .map(|page| PageButton {
                page,
                current: page == meta.page,
            })
            .collect();

        PageControls {
            previous: meta.has_previous.then(|| meta.page - 1),
            next: meta.has_next.then(|| meta.page + 1),
            buttons,
        }
    }
}

// =============================================================================
// Page State
// =============================================================================

/// A page-control activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "page", rename_all = "snake_case")]
pub enum PageNav {
    /// A numbered button.
    To(usize),
    Next,
    Previous,
}

/// Current page of each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub products: usize,
    pub suppliers: usize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            products: 1,
            suppliers: 1,
        }
    }
}

impl PageState {
    pub fn current(&self, dataset: Dataset) -> usize {
        match dataset {
            Dataset::Products => self.products,
            Dataset::Suppliers => self.suppliers,
        }
    }

    fn slot(&mut self, dataset: Dataset) -> &mut usize {
        match dataset {
            Dataset::Products => &mut self.products,
            Dataset::Suppliers => &mut self.suppliers,
        }
    }

    pub fn reset(&mut self, dataset: Dataset) {
        *self.slot(dataset) = 1;
    }

    /// Applies a navigation request. Disabled controls (Previous on page 1,
    /// Next on the last page, a number outside `1..=total_pages`) leave the
    /// state alone and return `false`.
    pub fn apply(&mut self, dataset: Dataset, nav: PageNav, total_pages: usize) -> bool {
        let total_pages = total_pages.max(1);
        let slot = self.slot(dataset);

        let target = match nav {
            PageNav::To(page) if (1..=total_pages).contains(&page) => page,
            PageNav::Next if *slot < total_pages => *slot + 1,
            PageNav::Previous if *slot > 1 => *slot - 1,
            _ => return false,
        };

        let changed = *slot != target;
        *slot = target;
        changed
    }

    /// Pulls a stale page back into `1..=total_pages`, returning the result.
    pub fn clamp(&mut self, dataset: Dataset, total_pages: usize) -> usize {
        let slot = self.slot(dataset);
        *slot = (*slot).clamp(1, total_pages.max(1));
        *slot
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PAGE_SIZE;

    #[test]
    fn test_pages_reconstruct_collection() {
        for len in [0usize, 1, 9, 10, 11, 20, 23, 57] {
            let items: Vec<usize> = (0..len).collect();
            let total = total_pages(len, PAGE_SIZE);

            let rebuilt: Vec<usize> = (1..=total)
                .flat_map(|page| paginate(&items, page, PAGE_SIZE).items)
                .collect();
            assert_eq!(rebuilt, items, "len {}", len);
        }
    }

    #[test]
    fn test_last_page_holds_remainder() {
        for len in [1usize, 10, 11, 23, 30, 57] {
            let items: Vec<usize> = (0..len).collect();
            let page = paginate(&items, total_pages(len, PAGE_SIZE), PAGE_SIZE);
            let expected = len - (page.meta.total_pages - 1) * PAGE_SIZE;
            assert_eq!(page.items.len(), expected);
            assert!(page.items.len() <= PAGE_SIZE);
        }
    }

    #[test]
    fn test_meta_middle_page() {
        let items: Vec<u8> = vec![0; 23];
        let meta = paginate(&items, 2, 10).meta;
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.showing_start, 11);
        assert_eq!(meta.showing_end, 20);
        assert!(meta.has_previous);
        assert!(meta.has_next);
        assert_eq!(meta.label(), "Showing 11 to 20 of 23");
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.meta.total_pages, 1);
        assert_eq!(page.meta.showing_start, 1);
        assert_eq!(page.meta.showing_end, 0);
        assert!(!page.meta.has_previous);
        assert!(!page.meta.has_next);
        assert!(page.meta.is_empty());
        assert_eq!(page.meta.label(), "No items");

        let controls = PageControls::for_meta(&page.meta);
        assert_eq!(controls.buttons.len(), 1);
        assert_eq!(controls.previous, None);
        assert_eq!(controls.next, None);
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let items: Vec<u8> = vec![0; 5];
        assert!(paginate(&items, 2, 10).items.is_empty());
        assert!(paginate(&items, 0, 10).items.is_empty());
        assert!(paginate(&items, usize::MAX, 10).items.is_empty());
        assert!(paginate(&items, 2, 10).meta.is_empty());
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let items: Vec<u8> = vec![0; 5];
        let page = paginate(&items, usize::MAX / 2, 10);
        assert!(page.items.is_empty());
        assert!(page.meta.is_empty());
        assert_eq!(page.meta.showing_end, 5);
        assert!(page.meta.showing_start > 5);
        assert_eq!(page.meta.total_pages, 1);
        assert!(!page.meta.has_next);

        let meta = PageMeta::new(usize::MAX, 10, 5);
        assert_eq!(meta.showing_start, usize::MAX);
        assert_eq!(meta.showing_end, 5);
    }

    #[test]
    fn test_controls() {
        let meta = PageMeta::new(1, 10, 25);
        let controls = PageControls::for_meta(&meta);
        assert_eq!(controls.previous, None);
        assert_eq!(controls.next, Some(2));
        assert_eq!(
            controls.buttons.iter().map(|b| b.page).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!(controls.buttons[0].current);

        let last = PageControls::for_meta(&PageMeta::new(3, 10, 25));
        assert_eq!(last.previous, Some(2));
        assert_eq!(last.next, None);
    }

    #[test]
    fn test_page_state_navigation() {
        let mut state = PageState::default();
        assert_eq!(state.current(Dataset::Products), 1);

        assert!(!state.apply(Dataset::Products, PageNav::Previous, 3));
        assert!(state.apply(Dataset::Products, PageNav::Next, 3));
        assert!(state.apply(Dataset::Products, PageNav::To(3), 3));
        assert!(!state.apply(Dataset::Products, PageNav::Next, 3));
        assert!(!state.apply(Dataset::Products, PageNav::To(4), 3));
        assert_eq!(state.current(Dataset::Products), 3);

        // Datasets are independent
        assert_eq!(state.current(Dataset::Suppliers), 1);

        state.reset(Dataset::Products);
        assert_eq!(state.products, 1);
    }

    #[test]
    fn test_page_state_clamp() {
        let mut state = PageState {
            products: 5,
            suppliers: 0,
        };
        assert_eq!(state.clamp(Dataset::Products, 2), 2);
        assert_eq!(state.clamp(Dataset::Suppliers, 0), 1);
    }

    #[test]
    fn test_page_nav_json_shape() {
        let nav: PageNav =
            serde_json::from_value(serde_json::json!({ "action": "to", "page": 2 })).unwrap();
        assert_eq!(nav, PageNav::To(2));
        let nav: PageNav = serde_json::from_value(serde_json::json!({ "action": "next" })).unwrap();
        assert_eq!(nav, PageNav::Next);
    }
}
