//! Clipvault record store
//!
//! The [`VideoRepository`] trait and its two implementations: Postgres via
//! sqlx for deployments, and an in-memory map for development and tests.

pub mod db;

pub use db::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};
