// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Durable client-side storage for the civic portal client.
//!
//! This crate provides:
//!
//! - **PreferenceStore trait**: a small async key-value interface with atomic
//!   multi-key writes
//! - **FileStore**: JSON file storage with restricted permissions and
//!   temp-file-then-rename writes
//! - **MemoryStore**: in-memory storage for tests
//! - Typed helpers for the two things the client persists: the
//!   `preferred-language` code and the session identity (`token`, `role`)
//!
//! # Example
//!
//! ```rust,no_run
//! use civic_client_store::{load_session_identity, save_session_identity, FileStore, SessionIdentity};
//! use civic_common_secret::SecretString;
//!
//! # async fn demo() -> Result<(), civic_client_store::StoreError> {
//! let store = FileStore::new("/tmp/civic/state.json");
//!
//! let identity = SessionIdentity::new(SecretString::from("abc"), "supervisor").unwrap();
//! save_session_identity(&store, &identity).await?;
//!
//! let loaded = load_session_identity(&store).await?;
//! assert_eq!(loaded.map(|i| i.role().to_string()).as_deref(), Some("supervisor"));
//! # Ok(())
//! # }
//! ```

mod error;
mod identity;
mod store;

pub use error::StoreError;
pub use identity::{
	clear_session_identity, load_preferred_locale, load_session_identity, save_preferred_locale,
	save_session_identity, SessionIdentity, PREFERRED_LANGUAGE_KEY, ROLE_KEY, TOKEN_KEY,
};
pub use store::{FileStore, MemoryStore, PersistedPreferences, PreferenceStore};
