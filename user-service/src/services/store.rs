use async_trait::async_trait;
use service_core::error::AppError;

use crate::models::{NewUser, UpdateOutcome, User, UserId, UserPatch};

/// Single-collection persistence for user records.
///
/// Lookups are by identifier equality only. Each call touches one document.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError>;

    /// Returns `true` when a record was removed.
    async fn delete_by_id(&self, id: UserId) -> Result<bool, AppError>;

    async fn update_by_id(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<UpdateOutcome, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;

    /// Release pooled connections. The store must not be used afterwards.
    async fn shutdown(&self) {}
}
