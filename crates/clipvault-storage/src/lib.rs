//! Clipvault Storage Library
//!
//! Byte-level storage for uploads: the [`Storage`] trait with a local
//! filesystem and an S3 (object store) implementation, the scratch
//! [`StagingArea`] uploads pass through, and the storage key generator.
//!
//! Keys must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_local_storage, create_object_storage};
pub use keys::{extension_for, new_key, UnsupportedMediaType};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use staging::{StagedFile, StagingArea, StagingError};
pub use traits::{Storage, StorageError, StorageResult};
