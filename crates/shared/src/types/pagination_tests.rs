use proptest::prelude::*;
use rstest::rstest;

use super::*;

#[test]
fn test_page_request_default() {
    let request = PageRequest::default();
    assert_eq!(request.page, 1);
    assert_eq!(request.page_size, 10);
}

#[test]
fn test_page_request_offset() {
    assert_eq!(PageRequest::new(1, 20).offset(), 0);
    assert_eq!(PageRequest::new(2, 20).offset(), 20);
    assert_eq!(PageRequest::new(5, 3).offset(), 12);
}

#[rstest]
#[case(1, 1)]
#[case(1, 10)]
#[case(7, 100)]
fn test_page_request_validate_accepts(#[case] page: u32, #[case] page_size: u32) {
    assert!(PageRequest::new(page, page_size).validate().is_ok());
}

#[rstest]
#[case(0, 10, "page", "page must be greater than or equal to 1")]
#[case(1, 0, "page_size", "page_size must be greater than or equal to 1")]
#[case(1, 101, "page_size", "page_size must be less than or equal to 100")]
fn test_page_request_validate_rejects(
    #[case] page: u32,
    #[case] page_size: u32,
    #[case] expected_field: &str,
    #[case] expected_message: &str,
) {
    match PageRequest::new(page, page_size).validate() {
        Err(AppError::Validation { field, message }) => {
            assert_eq!(field, expected_field);
            assert_eq!(message, expected_message);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_paginate_first_page() {
    let page = paginate((1..=25).collect(), &PageRequest::new(1, 10));
    assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
    assert_eq!(page.meta.total_rows, 25);
    assert_eq!(page.meta.total_pages, 3);
}

#[test]
fn test_paginate_last_partial_page() {
    let page = paginate((1..=25).collect(), &PageRequest::new(3, 10));
    assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    assert_eq!(page.meta.page, 3);
}

#[test]
fn test_paginate_fewer_rows_than_page_size() {
    let page = paginate(vec!["a", "b"], &PageRequest::new(1, 5));
    assert_eq!(page.items, vec!["a", "b"]);
    assert_eq!(page.meta.total_pages, 1);
}

#[test]
fn test_paginate_beyond_last_page_is_empty() {
    let page = paginate(vec![1, 2, 3, 4], &PageRequest::new(9, 10));
    assert!(page.items.is_empty());
    assert_eq!(page.meta.page, 9);
    assert_eq!(page.meta.total_rows, 4);
    assert_eq!(page.meta.total_pages, 1);
}

#[test]
fn test_paginate_empty() {
    let page: Page<i32> = paginate(vec![], &PageRequest::default());
    assert!(page.items.is_empty());
    assert_eq!(page.meta.total_rows, 0);
    assert_eq!(page.meta.total_pages, 0);
}

proptest! {
    /// A page never holds more than `page_size` items, and is empty exactly
    /// when its offset is at or past the end.
    #[test]
    fn prop_page_is_bounded(
        total in 0usize..500,
        page in 1u32..60,
        page_size in 1u32..=100,
    ) {
        let request = PageRequest::new(page, page_size);
        let result = paginate((0..total).collect::<Vec<_>>(), &request);

        prop_assert!(result.items.len() <= page_size as usize);
        let offset = (page as usize - 1) * page_size as usize;
        prop_assert_eq!(result.items.is_empty(), offset >= total);
        if let Some(first) = result.items.first() {
            prop_assert_eq!(*first, offset);
        }
    }

    /// `total_pages` is the integer ceiling of rows over page size.
    #[test]
    fn prop_total_pages_is_ceiling(total in 0u64..10_000, page_size in 1u32..=100) {
        let pages = total_pages(total, page_size);
        let size = u64::from(page_size);
        prop_assert!(pages * size >= total);
        prop_assert!(pages == 0 || (pages - 1) * size < total);
    }
}
