//! Client-side pagination for the student table.
//!
//! The backend returns the whole student list in one response; the table
//! pages through it locally.
//!
//! # Page sizes
//!
//! Only the sizes in [`PAGE_SIZE_OPTIONS`] are offered. Any other requested
//! size snaps to the nearest option that is not smaller; sizes above the
//! largest option snap to the largest.
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::pagination::PageRequest;
//!
//! let request = PageRequest { per_page: Some(10), page: Some(2) };
//! let page = request.paginate(&students);
//!
//! assert_eq!(page.meta.page, 2);
//! assert!(page.items.len() <= 10);
//! ```

/// Page sizes offered by the table.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Snap a requested page size onto [`PAGE_SIZE_OPTIONS`].
#[must_use]
pub fn snap_page_size(requested: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .find(|option| *option >= requested)
        .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1])
}

/// Metadata about one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Total rows across all pages
    pub total: usize,
    /// Rows per page
    pub per_page: usize,
    /// Current page number (1-indexed, clamped to the last page)
    pub page: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    /// Whether there are more rows after this page
    pub has_more: bool,
}

/// Requested page, as chosen in the table footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Rows per page (snapped onto [`PAGE_SIZE_OPTIONS`], default 5)
    pub per_page: Option<usize>,
    /// Page number (1-indexed, default 1)
    pub page: Option<usize>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: Some(DEFAULT_PAGE_SIZE),
            page: Some(1),
        }
    }
}

/// One page of rows together with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub meta: PaginationMeta,
}

impl PageRequest {
    #[must_use]
    pub fn per_page(&self) -> usize {
        snap_page_size(self.per_page.unwrap_or(DEFAULT_PAGE_SIZE).max(1))
    }

    /// Requested page number, at least 1. Not yet clamped to the data.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn first_page(self) -> Self {
        Self {
            page: Some(1),
            ..self
        }
    }

    /// Slice `rows` to the requested page, clamping past-the-end pages to the last one.
    pub fn paginate<'a, T>(&self, rows: &'a [T]) -> Page<'a, T> {
        let per_page = self.per_page();
        let total = rows.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = self.page().min(total_pages);

        let start = ((page - 1) * per_page).min(total);
        let end = (start + per_page).min(total);

        Page {
            items: &rows[start..end],
            meta: PaginationMeta {
                total,
                per_page,
                page,
                total_pages,
                has_more: end < total,
            },
        }
    }
}
