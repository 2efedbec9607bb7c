use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

use crate::models::{NewUser, UpdateOutcome, User, UserId, UserPatch};
use crate::services::UserStore;

#[derive(Clone)]
pub struct MongoUserStore {
    client: MongoClient,
    db: Database,
    users: Collection<User>,
}

impl MongoUserStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        let users = db.collection(collection);
        tracing::info!(
            database = %database,
            collection = %collection,
            "Successfully connected to MongoDB database"
        );
        Ok(Self { client, db, users })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError> {
        let user = user.into_user(UserId::generate());
        self.users.insert_one(&user, None).await.map_err(|e| {
            tracing::error!("Failed to insert user: {}", e);
            AppError::from(e)
        })?;
        Ok(user.id)
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users.find(doc! {}, None).await.map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            AppError::from(e)
        })?;

        let users: Vec<User> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect users: {}", e);
            AppError::from(e)
        })?;

        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        self.users
            .find_one(doc! { "_id": id.object_id() }, None)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, "Failed to find user: {}", e);
                AppError::from(e)
            })
    }

    async fn delete_by_id(&self, id: UserId) -> Result<bool, AppError> {
        let result = self
            .users
            .delete_one(doc! { "_id": id.object_id() }, None)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, "Failed to delete user: {}", e);
                AppError::from(e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn update_by_id(
        &self,
        id: UserId,
        patch: &UserPatch,
    ) -> Result<UpdateOutcome, AppError> {
        let Some(update) = patch.to_update_document() else {
            // Nothing to $set: only report whether the record exists.
            let exists = self.find_by_id(id).await?.is_some();
            return Ok(UpdateOutcome {
                matched: exists,
                modified: false,
            });
        };

        let result = self
            .users
            .update_one(doc! { "_id": id.object_id() }, update, None)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %id, "Failed to update user: {}", e);
                AppError::from(e)
            })?;

        Ok(UpdateOutcome {
            matched: result.matched_count > 0,
            modified: result.modified_count > 0,
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    async fn shutdown(&self) {
        tracing::info!("Closing MongoDB connection pool");
        self.client.clone().shutdown().await;
    }
}
