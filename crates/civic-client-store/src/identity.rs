// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed access to the persisted session identity and locale preference.

use civic_common_secret::SecretString;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::PreferenceStore;

/// Key holding the user's chosen locale code.
pub const PREFERRED_LANGUAGE_KEY: &str = "preferred-language";
/// Key holding the opaque session token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the role issued with the token.
pub const ROLE_KEY: &str = "role";

/// The persisted "this client is authenticated as this role" pair.
///
/// Both halves are always present and non-blank; there is no way to build a
/// half identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
	token: SecretString,
	role: String,
}

impl SessionIdentity {
	/// Returns `None` when either half is blank.
	pub fn new(token: SecretString, role: impl Into<String>) -> Option<Self> {
		let role = role.into().trim().to_string();
		if token.is_blank() || role.is_empty() {
			return None;
		}
		Some(Self { token, role })
	}

	pub fn token(&self) -> &SecretString {
		&self.token
	}

	pub fn role(&self) -> &str {
		&self.role
	}
}

/// Load the session identity.
///
/// A token without a role, a role without a token, or a blank value is
/// treated as no session.
pub async fn load_session_identity<S>(store: &S) -> Result<Option<SessionIdentity>, StoreError>
where
	S: PreferenceStore + ?Sized,
{
	let mut values = store.get_many(&[TOKEN_KEY, ROLE_KEY]).await?.into_iter();
	let token = values.next().flatten();
	let role = values.next().flatten();

	match (token, role) {
		(Some(token), Some(role)) => {
			let identity = SessionIdentity::new(SecretString::new(token), role);
			if identity.is_none() {
				debug!("persisted session identity has a blank half, ignoring");
			}
			Ok(identity)
		}
		(None, None) => Ok(None),
		(token, role) => {
			warn!(
				has_token = token.is_some(),
				has_role = role.is_some(),
				"partial session identity in store, treating as no session"
			);
			Ok(None)
		}
	}
}

/// Persist both halves of the identity in one atomic write.
pub async fn save_session_identity<S>(store: &S, identity: &SessionIdentity) -> Result<(), StoreError>
where
	S: PreferenceStore + ?Sized,
{
	store
		.set_many(&[
			(TOKEN_KEY, identity.token.expose().as_str()),
			(ROLE_KEY, identity.role.as_str()),
		])
		.await?;
	debug!(role = %identity.role, "session identity saved");
	Ok(())
}

/// Remove both halves of the identity in one atomic write.
pub async fn clear_session_identity<S>(store: &S) -> Result<(), StoreError>
where
	S: PreferenceStore + ?Sized,
{
	store.remove_many(&[TOKEN_KEY, ROLE_KEY]).await
}

pub async fn load_preferred_locale<S>(store: &S) -> Result<Option<String>, StoreError>
where
	S: PreferenceStore + ?Sized,
{
	Ok(store
		.get(PREFERRED_LANGUAGE_KEY)
		.await?
		.filter(|code| !code.trim().is_empty()))
}

pub async fn save_preferred_locale<S>(store: &S, code: &str) -> Result<(), StoreError>
where
	S: PreferenceStore + ?Sized,
{
	store.set(PREFERRED_LANGUAGE_KEY, code).await
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemoryStore;

	fn identity(token: &str, role: &str) -> SessionIdentity {
		SessionIdentity::new(SecretString::from(token), role).unwrap()
	}

	#[test]
	fn blank_halves_are_rejected() {
		assert!(SessionIdentity::new(SecretString::from(""), "citizen").is_none());
		assert!(SessionIdentity::new(SecretString::from("abc"), "  ").is_none());
	}

	#[test]
	fn role_is_trimmed() {
		assert_eq!(identity("abc", " admin ").role(), "admin");
	}

	#[tokio::test]
	async fn identity_roundtrip() {
		let store = MemoryStore::new();
		save_session_identity(&store, &identity("abc", "supervisor"))
			.await
			.unwrap();

		let loaded = load_session_identity(&store).await.unwrap().unwrap();
		assert_eq!(loaded.token().expose(), "abc");
		assert_eq!(loaded.role(), "supervisor");
	}

	#[tokio::test]
	async fn token_without_role_is_no_session() {
		let store = MemoryStore::with_entries([(TOKEN_KEY, "abc")]);
		assert!(load_session_identity(&store).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn role_without_token_is_no_session() {
		let store = MemoryStore::with_entries([(ROLE_KEY, "admin")]);
		assert!(load_session_identity(&store).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn empty_token_is_no_session() {
		let store = MemoryStore::with_entries([(TOKEN_KEY, ""), (ROLE_KEY, "admin")]);
		assert!(load_session_identity(&store).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn clear_removes_both_halves_only() {
		let store = MemoryStore::with_entries([
			(TOKEN_KEY, "abc"),
			(ROLE_KEY, "citizen"),
			(PREFERRED_LANGUAGE_KEY, "ta"),
		]);
		clear_session_identity(&store).await.unwrap();

		assert!(store.get(TOKEN_KEY).await.unwrap().is_none());
		assert!(store.get(ROLE_KEY).await.unwrap().is_none());
		assert_eq!(load_preferred_locale(&store).await.unwrap().as_deref(), Some("ta"));
	}

	#[tokio::test]
	async fn blank_preferred_locale_is_absent() {
		let store = MemoryStore::with_entries([(PREFERRED_LANGUAGE_KEY, " ")]);
		assert!(load_preferred_locale(&store).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn preferred_locale_save_is_idempotent() {
		let store = MemoryStore::new();
		save_preferred_locale(&store, "hi").await.unwrap();
		save_preferred_locale(&store, "hi").await.unwrap();
		assert_eq!(load_preferred_locale(&store).await.unwrap().as_deref(), Some("hi"));
	}
}
