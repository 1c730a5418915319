//! Data models for Bibliotheca

pub mod borrowing;
pub mod catalog;
pub mod member;

// Re-export commonly used types
pub use borrowing::{Borrowing, BorrowingDetails, BorrowingStatus, ItemRef};
pub use catalog::{Book, ResearchPaper};
pub use member::{Borrower, Librarian, MembershipStatus};

/// Normalize `page` / `per_page` query values into `(page, per_page, offset)`.
///
/// Pages past the addressable range saturate and simply come back empty.
pub fn paging(page: Option<i64>, per_page: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page, (page - 1).saturating_mul(per_page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults() {
        assert_eq!(paging(None, None), (1, 20, 0));
        assert_eq!(paging(Some(-4), Some(0)), (1, 1, 0));
    }

    #[test]
    fn test_paging_huge_page_saturates() {
        assert_eq!(paging(Some(i64::MAX), Some(100)), (i64::MAX, 100, i64::MAX));
        assert_eq!(paging(Some(i64::MAX), None).2, i64::MAX);
    }
}
