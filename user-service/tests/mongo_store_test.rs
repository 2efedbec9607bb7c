//! Runs `MongoUserStore` against a live server.
//!
//! Run with `TEST_MONGODB_URI` pointing at MongoDB and `cargo test -- --ignored`.

use user_service::models::{NewUser, UserId, UserPatch};
use user_service::services::{MongoUserStore, UserStore};

async fn connect() -> MongoUserStore {
    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database = format!("user_test_{}", uuid::Uuid::new_v4().simple());

    MongoUserStore::connect(&uri, &database, "user")
        .await
        .expect("Failed to connect to MongoDB")
}

async fn cleanup(store: MongoUserStore) {
    store.database().drop(None).await.ok();
}

fn ann() -> NewUser {
    NewUser {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
    }
}

#[tokio::test]
#[ignore = "Requires MongoDB at TEST_MONGODB_URI"]
async fn crud_round_trip() {
    let store = connect().await;
    store.health_check().await.expect("ping failed");

    let id = store.insert(ann()).await.unwrap();
    let users = store.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, id);
    assert_eq!(users[0].name, "Ann");

    let outcome = store
        .update_by_id(id, &UserPatch::new(None, Some("ann@y.com".to_string())))
        .await
        .unwrap();
    assert!(outcome.matched && outcome.modified);

    let user = store.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.name, "Ann");
    assert_eq!(user.email, "ann@y.com");

    assert!(store.delete_by_id(id).await.unwrap());
    assert!(store.find_by_id(id).await.unwrap().is_none());

    cleanup(store).await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at TEST_MONGODB_URI"]
async fn update_reports_match_and_modification_separately() {
    let store = connect().await;
    let id = store.insert(ann()).await.unwrap();

    let same = store
        .update_by_id(id, &UserPatch::new(Some("Ann".to_string()), None))
        .await
        .unwrap();
    assert!(same.matched);
    assert!(!same.modified);

    let empty = store.update_by_id(id, &UserPatch::default()).await.unwrap();
    assert!(empty.matched);
    assert!(!empty.modified);

    let missing = store
        .update_by_id(UserId::generate(), &UserPatch::new(Some("Bo".to_string()), None))
        .await
        .unwrap();
    assert!(!missing.matched);

    assert!(!store.delete_by_id(UserId::generate()).await.unwrap());

    cleanup(store).await;
}
