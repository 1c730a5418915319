//! Borrower and librarian management service

use validator::Validate;

use crate::{
    error::AppResult,
    models::member::{
        Borrower, CreateBorrower, CreateLibrarian, Librarian, MemberQuery, UpdateMembership,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search_borrowers(&self, query: &MemberQuery) -> AppResult<(Vec<Borrower>, i64)> {
        self.repository.members.search_borrowers(query).await
    }

    pub async fn get_borrower(&self, id: i32) -> AppResult<Borrower> {
        self.repository.members.get_borrower(id).await
    }

    /// Register a new borrower
    pub async fn create_borrower(&self, borrower: CreateBorrower) -> AppResult<Borrower> {
        borrower.validate()?;
        let created = self.repository.members.create_borrower(&borrower).await?;
        tracing::info!(borrower_id = created.id, "Borrower registered");
        Ok(created)
    }

    /// Change membership status or expiry, e.g. to freeze an account
    pub async fn update_membership(&self, id: i32, update: UpdateMembership) -> AppResult<Borrower> {
        let updated = self.repository.members.update_membership(id, &update).await?;
        tracing::info!(
            borrower_id = id,
            status = ?updated.membership_status,
            "Membership updated"
        );
        Ok(updated)
    }

    pub async fn search_librarians(&self, query: &MemberQuery) -> AppResult<(Vec<Librarian>, i64)> {
        self.repository.members.search_librarians(query).await
    }

    pub async fn get_librarian(&self, id: i32) -> AppResult<Librarian> {
        self.repository.members.get_librarian(id).await
    }

    pub async fn create_librarian(&self, librarian: CreateLibrarian) -> AppResult<Librarian> {
        librarian.validate()?;
        let created = self.repository.members.create_librarian(&librarian).await?;
        tracing::info!(librarian_id = created.id, "Librarian registered");
        Ok(created)
    }
}
