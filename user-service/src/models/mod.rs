pub mod user;

pub use user::{InvalidUserId, NewUser, UpdateOutcome, User, UserId, UserPatch};
