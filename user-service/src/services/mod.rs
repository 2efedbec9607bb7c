pub mod database;
pub mod memory;
pub mod store;

pub use database::MongoUserStore;
pub use memory::InMemoryUserStore;
pub use store::UserStore;
