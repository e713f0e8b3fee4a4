//! Client-Side Pagination

/// One page of a list that was fetched in full
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into range
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Slice out page `number` (1-based). Out-of-range numbers are clamped, and an
/// empty list still has one (empty) page.
pub fn paginate<T: Clone>(items: &[T], number: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let number = number.clamp(1, total_pages);
    let start = (number - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        number,
        total_pages,
        total_items: items.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=45).collect();
        let page = paginate(&items, 3, 20);
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_clamps_page_number() {
        let items: Vec<u32> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 2).number, 1);
        assert_eq!(paginate(&items, 99, 2).items, vec![5]);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = paginate::<u32>(&[], 4, 10);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }
}
