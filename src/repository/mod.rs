//! Repository layer for database operations

pub mod borrowings;
pub mod catalog;
pub mod members;

use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use borrowings::BorrowingStore;

/// Case-insensitive substring pattern for `LIKE`, with the user's own
/// wildcards escaped so they match literally
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub borrowings: borrowings::BorrowingsRepository,
    pub catalog: catalog::CatalogRepository,
    pub members: members::MembersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            borrowings: borrowings::BorrowingsRepository::new(pool.clone()),
            catalog: catalog::CatalogRepository::new(pool.clone()),
            members: members::MembersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip a trivial query to check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Dune"), "%dune%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern(r"c:\x"), r"%c:\\x%");
    }
}
