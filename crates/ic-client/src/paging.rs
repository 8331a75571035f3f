//! Over-fetch-by-one pagination.
//!
//! The identity server does not reliably report totals, so a page of `N`
//! records is requested as `N + 1`. Getting exactly `N + 1` back means
//! another page exists; the extra record is dropped before display.

use serde::Serialize;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A requested page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Records to display.
    pub limit: usize,
    /// Zero-based offset of the first record.
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Number of records to ask the server for.
    #[must_use]
    pub const fn request_count(&self) -> usize {
        self.limit.saturating_add(1)
    }

    /// SCIM `startIndex` (1-based) of this window.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.offset.saturating_add(1)
    }

    /// The request for the following page.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }
}

/// A page of records ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Displayed records, at most `limit` of them.
    pub items: Vec<T>,
    /// Offset this page was requested at.
    pub offset: usize,
    /// Requested page size.
    pub limit: usize,
    /// Whether another page is available.
    pub has_next: bool,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
            has_next: false,
        }
    }
}

impl<T> Page<T> {
    /// An empty page for a request.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            offset: request.offset,
            limit: request.limit,
            has_next: false,
        }
    }

    /// Returns true when the page has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies `f` to every record, keeping the window.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            has_next: self.has_next,
        }
    }

    /// Keeps the records matching `keep`, leaving `has_next` untouched.
    #[must_use]
    pub fn retain(mut self, keep: impl FnMut(&T) -> bool) -> Self {
        self.items.retain(keep);
        self
    }
}

/// Moderates a server response fetched with [`PageRequest::request_count`].
///
/// The decision is made on the raw record count, before any filtering.
#[must_use]
pub fn moderate<T>(mut raw: Vec<T>, request: PageRequest) -> Page<T> {
    let has_next = raw.len() == request.request_count();
    if has_next {
        raw.pop();
    }
    Page {
        items: raw,
        offset: request.offset,
        limit: request.limit,
        has_next,
    }
}

/// Slices a complete list into a page.
#[must_use]
pub fn paginate_local<T>(list: Vec<T>, request: PageRequest) -> Page<T> {
    let total = list.len();
    let items: Vec<T> = list
        .into_iter()
        .skip(request.offset)
        .take(request.limit)
        .collect();
    Page {
        has_next: request.offset.saturating_add(request.limit) < total,
        items,
        offset: request.offset,
        limit: request.limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_trims_extra_record() {
        let page = moderate((0..11).collect(), PageRequest::new(10, 0));
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items.last(), Some(&9));
        assert!(page.has_next);
    }

    #[test]
    fn short_response_has_no_next() {
        let page = moderate((0..10).collect(), PageRequest::new(10, 20));
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_next);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn at_most_limit_displayed_for_every_size() {
        for limit in 0..8 {
            for returned in 0..=limit + 1 {
                let page = moderate(vec![(); returned], PageRequest::new(limit, 0));
                assert!(page.items.len() <= limit);
                assert_eq!(page.has_next, returned == limit + 1);
            }
        }
    }

    #[test]
    fn request_window() {
        let request = PageRequest::new(25, 50);
        assert_eq!(request.request_count(), 26);
        assert_eq!(request.start_index(), 51);
        assert_eq!(request.next(), PageRequest::new(25, 75));
    }

    #[test]
    fn window_saturates_at_the_top() {
        let request = PageRequest::new(usize::MAX, usize::MAX);
        assert_eq!(request.request_count(), usize::MAX);
        assert_eq!(request.start_index(), usize::MAX);
        assert_eq!(request.next().offset, usize::MAX);

        let page = moderate(vec![1, 2, 3], request);
        assert_eq!(page.items.len(), 3);
        assert!(!page.has_next);
    }

    #[test]
    fn local_pagination() {
        let page = paginate_local((0..25).collect::<Vec<_>>(), PageRequest::new(10, 10));
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert!(page.has_next);

        let last = paginate_local((0..25).collect::<Vec<_>>(), PageRequest::new(10, 20));
        assert_eq!(last.items.len(), 5);
        assert!(!last.has_next);

        let beyond = paginate_local((0..5).collect::<Vec<_>>(), PageRequest::new(10, 30));
        assert!(beyond.is_empty());
    }
}
