//! Client records backed by PostgreSQL: schema setup, client and phone
//! mutations, and optional-criteria client search.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;

pub use db::Database;
pub use error::StoreError;
pub use models::{Client, ClientPatch, Phone};
pub use search::{Combinator, FindOutcome, SearchCriteria};
