pub mod entities;
pub mod repository;
pub mod store;

pub use repository::LedgerRepository;
pub use store::{InMemoryLedger, LedgerSnapshot, StoreError};
