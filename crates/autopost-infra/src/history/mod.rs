//! Post history: SQLite via SeaORM, with an in-memory fallback.

mod memory;

pub use memory::InMemoryHistoryStore;

#[cfg(feature = "sqlite")]
mod connection;
#[cfg(feature = "sqlite")]
pub mod entity;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use connection::{HistoryDbConfig, connect};
#[cfg(feature = "sqlite")]
pub use sqlite::SeaOrmHistoryStore;
