// Page arithmetic for the result list. All functions are pure and work on
// 1-based page numbers.

pub const PAGE_SIZE: usize = 10;

// How many pages either side of the current one get a number button
pub const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

// Items shown on `page`. Out of range pages yield an empty slice.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE).min(items.len());
    let end = page.saturating_mul(PAGE_SIZE).min(items.len());
    &items[start..end]
}

pub fn previous_page(current: usize) -> usize {
    current.saturating_sub(1).max(1)
}

pub fn next_page(current: usize, total: usize) -> usize {
    (current + 1).min(total.max(1))
}

pub fn is_first_page(current: usize) -> bool {
    current <= 1
}

pub fn is_last_page(current: usize, total: usize) -> bool {
    current >= total
}

// Page numbers worth rendering: the first, the last and a window around the
// current page. Gaps between them collapse into a single ellipsis.
pub fn page_markers(current: usize, total: usize) -> Vec<PageMarker> {
    let low = current.saturating_sub(PAGE_WINDOW);
    let high = current + PAGE_WINDOW;

    let mut markers = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total {
        if page != 1 && page != total && (page < low || page > high) {
            continue;
        }
        if last_shown != 0 && page != last_shown + 1 {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(PageMarker::Page(page));
        last_shown = page;
    }
    markers
}

// A page can only be picked directly if it has a number button
pub fn is_selectable(page: usize, current: usize, total: usize) -> bool {
    page_markers(current, total).contains(&PageMarker::Page(page))
}
