// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory pagination of fully fetched result lists.
//!
//! TheMealDB has no paging, so every list is fetched whole and sliced here.

use crate::error::AppError;
use serde::Serialize;
use std::ops::Range;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Fixed number of meals per page.
pub const PAGE_SIZE: usize = 12;

/// One page of a larger result list.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page number
    pub page: u32,
    pub per_page: u32,
    /// Length of the full result list
    pub total: u32,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Convert the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            has_prev: self.has_prev,
            has_next: self.has_next,
        }
    }
}

/// Number of pages needed for `total` items.
pub fn page_count(total: usize, size: usize) -> usize {
    total.div_ceil(size)
}

/// Index range of `page` within a list of `total` items.
///
/// Pages past the end produce an empty range.
pub fn page_bounds(page: u32, size: usize, total: usize) -> Result<Range<usize>, AppError> {
    if page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    if size == 0 {
        return Err(AppError::BadRequest(
            "Page size must be greater than 0".to_string(),
        ));
    }

    let start = (page as usize - 1)
        .checked_mul(size)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    if start >= total {
        return Ok(total..total);
    }

    let end = start.saturating_add(size).min(total);
    Ok(start..end)
}

/// Slice `items` into the requested page of `size` items.
pub fn paginate_with_size<T>(items: Vec<T>, page: u32, size: usize) -> Result<Page<T>, AppError> {
    let total = items.len();
    let bounds = page_bounds(page, size, total)?;
    let has_next = bounds.end < total;

    let items: Vec<T> = items
        .into_iter()
        .skip(bounds.start)
        .take(bounds.end - bounds.start)
        .collect();

    Ok(Page {
        items,
        page,
        per_page: size as u32,
        total: total as u32,
        total_pages: page_count(total, size) as u32,
        has_prev: page > 1,
        has_next,
    })
}

/// Slice `items` into the requested page of [`PAGE_SIZE`] items.
pub fn paginate<T>(items: Vec<T>, page: u32) -> Result<Page<T>, AppError> {
    paginate_with_size(items, page, PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, PAGE_SIZE), 0);
        assert_eq!(page_count(1, PAGE_SIZE), 1);
        assert_eq!(page_count(12, PAGE_SIZE), 1);
        assert_eq!(page_count(13, PAGE_SIZE), 2);
        assert_eq!(page_count(25, PAGE_SIZE), 3);
    }

    #[test]
    fn test_pages_reconstruct_original() {
        for len in [0usize, 1, 11, 12, 13, 24, 25, 100] {
            let items: Vec<usize> = (0..len).collect();
            let pages = page_count(len, PAGE_SIZE).max(1);

            let mut rebuilt = Vec::new();
            for page in 1..=pages as u32 {
                rebuilt.extend(paginate(items.clone(), page).unwrap().items);
            }

            assert_eq!(rebuilt, items, "length {len}");
        }
    }

    #[test]
    fn test_boundary_flags() {
        let items: Vec<u32> = (0..25).collect();

        let first = paginate(items.clone(), 1).unwrap();
        assert!(!first.has_prev);
        assert!(first.has_next);
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total_pages, 3);

        let last = paginate(items.clone(), 3).unwrap();
        assert!(last.has_prev);
        assert!(!last.has_next);
        assert_eq!(last.items, vec![24]);

        // Exactly one full page: next is disabled once page*size >= total
        let exact = paginate((0..12).collect::<Vec<u32>>(), 1).unwrap();
        assert!(!exact.has_next);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(vec![1, 2, 3], 5).unwrap();
        assert!(page.items.is_empty());
        assert!(!page.has_next);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(matches!(
            paginate(vec![1, 2, 3], 0),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_huge_page_rejected_or_empty() {
        // Must not panic on multiplication overflow
        let result = paginate_with_size(vec![1u8], u32::MAX, usize::MAX);
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let page = paginate(vec![1u8], u32::MAX).unwrap();
        assert!(page.items.is_empty());
    }
}
