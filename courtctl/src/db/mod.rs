//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern: each entity has a repository in
//! [`handlers`] wrapping a `&mut PgConnection`, returning the record types
//! in [`models`], with errors classified by [`errors`].
//!
//! Repositories borrow a connection rather than a pool so that several of
//! them can compose inside one transaction. The booking orchestrator in
//! [`crate::booking`] relies on this: the conflict check, the capacity
//! checks and the final insert all run on the same transaction.
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut courts = Courts::new(&mut tx);
//! // ... operations ...
//! tx.commit().await?;
//! ```
//!
//! Migrations live in `migrations/` and are exposed through
//! [`crate::migrator`].

pub mod errors;
pub mod handlers;
pub mod models;
