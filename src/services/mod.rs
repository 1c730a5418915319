//! Business logic services

pub mod borrowings;
pub mod catalog;
pub mod members;

use std::sync::Arc;

use crate::{config::LoanPolicy, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub borrowings: borrowings::BorrowingsService,
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository and loan policy
    pub fn new(repository: Repository, loan_policy: LoanPolicy) -> Self {
        Self {
            borrowings: borrowings::BorrowingsService::new(
                Arc::new(repository.borrowings.clone()),
                loan_policy,
            ),
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the datastore answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
