//! Touchline entity store
//!
//! Transactional persistence for the league entities, with an in-memory
//! backend for tests and local runs and a PostgreSQL backend for deployment.

pub mod access;
pub mod factory;
pub mod fixtures;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use factory::StoreFactory;
pub use fixtures::LeagueFixture;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{LeagueStore, LeagueTx, StoreResult};
