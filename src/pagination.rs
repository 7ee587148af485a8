//! Page links for catalog listings.

use serde::Serialize;

/// Pages always shown around the current one.
const WINDOW: usize = 2;

/// Page numbers to render in a pagination bar; `None` marks a gap.
///
/// The first and last page are always present; pages within [`WINDOW`] of
/// the current page are listed explicitly.
fn page_links(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }

    let start = current.saturating_sub(WINDOW).max(1);
    let end = (current + WINDOW).min(total_pages);

    let mut links = Vec::new();
    if start > 1 {
        links.push(Some(1));
        if start > 2 {
            links.push(None);
        }
    }
    links.extend((start..=end).map(Some));
    if end < total_pages {
        if end + 1 < total_pages {
            links.push(None);
        }
        links.push(Some(total_pages));
    }
    links
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total: usize, per_page: usize) -> Self {
        let total_pages = total.div_ceil(per_page.max(1));
        let page = current_page.clamp(1, total_pages.max(1));

        Self {
            items,
            pages: page_links(total_pages, page),
            page,
            total,
        }
    }
}
