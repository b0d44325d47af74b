// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role-based navigation.

use std::sync::{Arc, Mutex};

use civic_client_store::{load_session_identity, PreferenceStore, StoreError};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use crate::routes::RoleRouteTable;

/// The single "go to path" primitive.
pub trait Navigator: Send + Sync {
	fn navigate(&self, path: &str);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
	fn navigate(&self, path: &str) {
		(**self).navigate(path)
	}
}

/// What a call to [`RoleRouter::route`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
	/// Role or token was missing. Nothing happened.
	Skipped,
	/// The navigator was called with this path.
	Navigated(&'static str),
	/// This identity was already routed to this path; the navigator was not
	/// called again.
	AlreadyRouted(&'static str),
}

impl RouteDecision {
	pub fn path(&self) -> Option<&'static str> {
		match self {
			RouteDecision::Skipped => None,
			RouteDecision::Navigated(path) | RouteDecision::AlreadyRouted(path) => Some(path),
		}
	}
}

#[derive(Debug)]
struct Routed {
	fingerprint: String,
	path: &'static str,
}

/// Navigates an authenticated identity to its landing page, once.
///
/// The last routed identity is remembered as a SHA-256 fingerprint of the
/// role and token; the token itself is never retained.
#[derive(Debug)]
pub struct RoleRouter<N> {
	navigator: N,
	last: Mutex<Option<Routed>>,
}

fn present(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

fn fingerprint(role: &str, token: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(role.to_ascii_lowercase().as_bytes());
	hasher.update([0u8]);
	hasher.update(token.as_bytes());
	hex::encode(hasher.finalize())
}

impl<N: Navigator> RoleRouter<N> {
	pub fn new(navigator: N) -> Self {
		Self {
			navigator,
			last: Mutex::new(None),
		}
	}

	pub fn navigator(&self) -> &N {
		&self.navigator
	}

	/// Route `role` to its landing page.
	///
	/// Both halves of the identity must be present and non-blank, otherwise
	/// the call is a no-op. Repeating the last routed identity does not
	/// navigate again.
	#[instrument(skip_all, fields(role = ?role))]
	pub fn route(&self, role: Option<&str>, token: Option<&str>) -> RouteDecision {
		let (Some(role), Some(token)) = (present(role), present(token)) else {
			debug!(
				has_role = present(role).is_some(),
				has_token = present(token).is_some(),
				"incomplete identity, not routing"
			);
			return RouteDecision::Skipped;
		};

		let path = RoleRouteTable::destination(role);
		let fingerprint = fingerprint(role, token);

		let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
		if let Some(routed) = last.as_ref() {
			if routed.fingerprint == fingerprint {
				debug!(path = %routed.path, "identity already routed");
				return RouteDecision::AlreadyRouted(routed.path);
			}
		}

		self.navigator.navigate(path);
		info!(path = %path, token_fp = %&fingerprint[..12], "navigated");
		*last = Some(Routed { fingerprint, path });
		RouteDecision::Navigated(path)
	}
}

/// The standalone "land me on my dashboard" entry point.
///
/// Reads the persisted session identity and routes it. No session, or half
/// a session, is a skip.
pub struct Redirector<N> {
	store: Arc<dyn PreferenceStore>,
	router: Arc<RoleRouter<N>>,
}

impl<N: Navigator> Redirector<N> {
	pub fn new(store: Arc<dyn PreferenceStore>, router: Arc<RoleRouter<N>>) -> Self {
		Self { store, router }
	}

	#[instrument(skip_all)]
	pub async fn redirect(&self) -> Result<RouteDecision, StoreError> {
		match load_session_identity(&*self.store).await? {
			Some(identity) => Ok(self
				.router
				.route(Some(identity.role()), Some(identity.token().expose()))),
			None => {
				debug!("no session identity, not routing");
				Ok(RouteDecision::Skipped)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use civic_client_store::{MemoryStore, ROLE_KEY, TOKEN_KEY};
	use proptest::prelude::*;

	#[derive(Default)]
	pub(crate) struct RecordingNavigator {
		pub(crate) paths: Mutex<Vec<String>>,
	}

	impl Navigator for RecordingNavigator {
		fn navigate(&self, path: &str) {
			self.paths.lock().unwrap().push(path.to_string());
		}
	}

	fn router() -> RoleRouter<RecordingNavigator> {
		RoleRouter::new(RecordingNavigator::default())
	}

	fn navigations(router: &RoleRouter<RecordingNavigator>) -> Vec<String> {
		router.navigator().paths.lock().unwrap().clone()
	}

	#[test]
	fn empty_token_is_a_no_op() {
		let router = router();
		assert_eq!(router.route(Some("admin"), Some("")), RouteDecision::Skipped);
		assert!(navigations(&router).is_empty());
	}

	#[test]
	fn missing_halves_are_no_ops() {
		let router = router();
		assert_eq!(router.route(None, Some("abc")), RouteDecision::Skipped);
		assert_eq!(router.route(Some("admin"), None), RouteDecision::Skipped);
		assert_eq!(router.route(Some("  "), Some("abc")), RouteDecision::Skipped);
		assert!(navigations(&router).is_empty());
	}

	#[test]
	fn routes_once_per_identity() {
		let router = router();
		assert_eq!(
			router.route(Some("supervisor"), Some("abc")),
			RouteDecision::Navigated("/supervisor/dashboard")
		);
		assert_eq!(
			router.route(Some("supervisor"), Some("abc")),
			RouteDecision::AlreadyRouted("/supervisor/dashboard")
		);
		assert_eq!(navigations(&router), vec!["/supervisor/dashboard"]);
	}

	#[test]
	fn new_identity_routes_again() {
		let router = router();
		router.route(Some("citizen"), Some("abc"));
		router.route(Some("admin"), Some("def"));
		assert_eq!(
			navigations(&router),
			vec!["/citizen/dashboard", "/admin/dashboard"]
		);
	}

	#[test]
	fn fingerprint_hides_token() {
		let fp = fingerprint("admin", "secret-token");
		assert_eq!(fp.len(), 64);
		assert!(!fp.contains("secret-token"));
		assert_ne!(fp, fingerprint("admin", "other-token"));
	}

	#[tokio::test]
	async fn redirector_routes_persisted_identity() {
		let store = Arc::new(MemoryStore::with_entries([
			(TOKEN_KEY, "abc"),
			(ROLE_KEY, "moderator"),
		]));
		let router = Arc::new(router());
		let redirector = Redirector::new(store, router.clone());

		assert_eq!(
			redirector.redirect().await.unwrap(),
			RouteDecision::Navigated("/staff/dashboard")
		);
		assert_eq!(navigations(&router), vec!["/staff/dashboard"]);
	}

	#[tokio::test]
	async fn redirector_skips_half_session() {
		let store = Arc::new(MemoryStore::with_entries([(ROLE_KEY, "admin")]));
		let router = Arc::new(router());
		let redirector = Redirector::new(store, router.clone());

		assert_eq!(redirector.redirect().await.unwrap(), RouteDecision::Skipped);
		assert!(navigations(&router).is_empty());
	}

	proptest! {
		#[test]
		fn routing_is_total(role in "\\PC*", token in "[a-z0-9]{1,16}") {
			let router = router();
			let decision = router.route(Some(&role), Some(&token));
			if role.trim().is_empty() {
				prop_assert_eq!(decision, RouteDecision::Skipped);
			} else {
				let path = decision.path();
				prop_assert!(path.is_some());
				prop_assert!(RoleRouteTable::destinations().contains(&path.unwrap()));
				prop_assert_eq!(navigations(&router).len(), 1);
			}
		}
	}
}
