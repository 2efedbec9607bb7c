use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::{Mutex, MutexGuard};

use crate::models::{NewUser, UpdateOutcome, User, UserId, UserPatch};
use crate::services::UserStore;

/// Process-local store with the same observable behaviour as `MongoUserStore`.
/// Records are kept in insertion order.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, AppError> {
        self.users.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("User store mutex poisoned: {}", e))
        })
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError> {
        let id = UserId::generate();
        self.users()?.push(user.into_user(id));
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users()?.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        Ok(self.users()?.iter().find(|u| u.id == id).cloned())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, AppError> {
        let mut users = self.users()?;
        match users.iter().position(|u| u.id == id) {
            Some(index) => {
                users.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_by_id(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<UpdateOutcome, AppError> {
        let mut users = self.users()?;
        let outcome = match users.iter_mut().find(|u| u.id == id) {
            Some(user) => UpdateOutcome {
                matched: true,
                modified: patch.apply_to(user),
            },
            None => UpdateOutcome::NOT_FOUND,
        };
        Ok(outcome)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.users().map(|_| ())
    }
}
