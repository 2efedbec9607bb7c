use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Store-assigned identifier of a user record.
///
/// Externally this is the 24-character hex form of a MongoDB `ObjectId`;
/// `FromStr` and `Display` convert between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(ObjectId);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid ObjectId")]
pub struct InvalidUserId(pub String);

impl UserId {
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidUserId(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,
}

/// Records written by other clients may hold numbers or null in string fields.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Bson::deserialize(deserializer)? {
        Bson::String(s) => s,
        Bson::Null | Bson::Undefined => String::new(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(n) => n.to_string(),
        Bson::Boolean(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// A user that passed presence checks and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

/// Partial update. Only fields that are present and non-empty are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    name: Option<String>,
    email: Option<String>,
}

impl UserPatch {
    pub fn new(name: Option<String>, email: Option<String>) -> Self {
        Self {
            name: name.filter(|s| !s.is_empty()),
            email: email.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// `$set` document for the present fields, or `None` for an empty patch.
    pub fn to_update_document(&self) -> Option<Document> {
        if self.is_empty() {
            return None;
        }

        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }

        Some(doc! { "$set": set })
    }

    /// Merge into `user`, returning whether any stored value changed.
    pub fn apply_to(&self, user: &mut User) -> bool {
        let mut modified = false;

        if let Some(name) = &self.name {
            if user.name != *name {
                user.name = name.clone();
                modified = true;
            }
        }
        if let Some(email) = &self.email {
            if user.email != *email {
                user.email = email.clone();
                modified = true;
            }
        }

        modified
    }
}

/// Result of an update keyed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: bool,
    pub modified: bool,
}

impl UpdateOutcome {
    pub const NOT_FOUND: Self = Self {
        matched: false,
        modified: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ann() -> User {
        User {
            id: UserId::generate(),
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
        }
    }

    #[test]
    fn test_user_id_round_trips_through_hex() {
        let id = UserId::generate();
        let hex = id.to_string();

        assert_eq!(hex.len(), 24);
        assert_eq!(hex.parse::<UserId>().unwrap(), id);
    }

    #[test]
    fn test_user_id_rejects_malformed_strings() {
        assert!("not-an-id".parse::<UserId>().is_err());
        assert!("".parse::<UserId>().is_err());
        // 23 hex chars
        assert!("65a1f0c2b3d4e5f6a7b8c9d".parse::<UserId>().is_err());
        // right length, not hex
        assert!("zzzzzzzzzzzzzzzzzzzzzzzz".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_serializes_id_as_object_id() {
        let user = ann();
        let document = mongodb::bson::to_document(&user).unwrap();

        assert_eq!(document.get_object_id("_id").unwrap(), user.id.object_id());
        assert_eq!(document.get_str("name").unwrap(), "Ann");
    }

    #[test]
    fn test_user_tolerates_missing_fields_in_store() {
        let oid = ObjectId::new();
        let user: User = mongodb::bson::from_document(doc! { "_id": oid }).unwrap();

        assert_eq!(user.id, UserId::from(oid));
        assert!(user.name.is_empty());
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_user_coerces_non_string_fields_in_store() {
        let oid = ObjectId::new();
        let user: User =
            mongodb::bson::from_document(doc! { "_id": oid, "name": 42, "email": Bson::Null })
                .unwrap();

        assert_eq!(user.id, UserId::from(oid));
        assert_eq!(user.name, "42");
        assert!(user.email.is_empty());
    }

    #[test]
    fn test_patch_drops_empty_strings() {
        let patch = UserPatch::new(Some(String::new()), Some("new@x.com".to_string()));

        assert_eq!(patch, UserPatch::new(None, Some("new@x.com".to_string())));
        assert_eq!(
            patch.to_update_document().unwrap(),
            doc! { "$set": { "email": "new@x.com" } }
        );
        assert!(UserPatch::new(Some(String::new()), None).is_empty());
    }

    #[test]
    fn test_patch_update_document_only_sets_present_fields() {
        let patch = UserPatch::new(None, Some("new@x.com".to_string()));
        let update = patch.to_update_document().unwrap();

        assert_eq!(update, doc! { "$set": { "email": "new@x.com" } });
        assert!(UserPatch::default().to_update_document().is_none());
    }

    #[test]
    fn test_patch_apply_reports_modification() {
        let mut user = ann();

        let same = UserPatch::new(Some("Ann".to_string()), None);
        assert!(!same.apply_to(&mut user));

        let email_only = UserPatch::new(None, Some("ann@y.com".to_string()));
        assert!(email_only.apply_to(&mut user));
        assert_eq!(user.name, "Ann");
        assert_eq!(user.email, "ann@y.com");
    }
}
