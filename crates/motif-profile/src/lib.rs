//! # motif-profile
//!
//! Remote profile documents and the session/profile store for Motif.
//!
//! - [`DocumentStore`] is the seam to the hosted document database, with a
//!   Firestore REST implementation ([`FirestoreStore`]) and an in-process one
//!   ([`MemoryStore`]).
//! - [`ProfileRepo`] reads and writes the per-user profile document.
//! - [`SessionStore`] publishes the signed-in user and their saved
//!   collections, applying saves optimistically with rollback.

pub mod document;
pub mod error;
pub mod firestore;
pub mod memory;
pub mod profile;
pub mod repo;
pub mod sanitize;
pub mod session;
pub mod updates;

pub use document::DocumentStore;
pub use error::{ProfileError, StoreError};
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use profile::{TagRecord, UserDocument};
pub use repo::ProfileRepo;
pub use session::{SessionState, SessionStore};
