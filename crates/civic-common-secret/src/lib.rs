// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Wrapper type for the two sensitive values the portal client handles: the
//! password typed into the login form and the session token issued by the
//! portal.
//!
//! A [`Secret<T>`] prints as `[REDACTED]` through both `Debug` and `Display`,
//! so it is safe to pass to `tracing` fields, and its memory is zeroed on drop.
//! The inner value is only reachable through [`Secret::expose`].
//!
//! ```
//! use civic_common_secret::SecretString;
//!
//! let token = SecretString::new("eyJhbGciOi".to_string());
//! assert_eq!(format!("{token}"), "[REDACTED]");
//! assert_eq!(token.expose(), "eyJhbGciOi");
//! ```

use std::fmt;

use zeroize::Zeroize;

/// Placeholder printed in place of any secret value.
pub const REDACTED: &str = "[REDACTED]";

#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Every call site is a place a secret leaves
	/// the wrapper, so keep them few.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the secret is empty or whitespace only.
	///
	/// The portal treats a blank token exactly like a missing one.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl From<&str> for SecretString {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn token_is_redacted_in_debug_and_display() {
		let token = SecretString::new("tok_live_123".to_string());
		assert_eq!(format!("{token}"), REDACTED);
		assert_eq!(format!("{token:?}"), "Secret(\"[REDACTED]\")");
	}

	#[test]
	fn expose_returns_inner_value() {
		let password = SecretString::from("hunter2");
		assert_eq!(password.expose(), "hunter2");
	}

	#[test]
	fn optional_token_stays_redacted() {
		let token: Option<SecretString> = Some("abc".into());
		let debug = format!("{token:?}");
		assert!(debug.contains(REDACTED));
		assert!(!debug.contains("abc"));
	}

	#[test]
	fn blank_detection() {
		assert!(SecretString::from("").is_blank());
		assert!(SecretString::from("  \t").is_blank());
		assert!(!SecretString::from("abc").is_blank());
	}

	#[test]
	fn equality_compares_inner_values() {
		assert_eq!(SecretString::from("a"), SecretString::from("a"));
		assert_ne!(SecretString::from("a"), SecretString::from("b"));
	}

	proptest! {
		#[test]
		fn formatting_never_leaks(inner in "[a-zA-Z0-9_.-]{4,40}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Secret"));
			let secret = SecretString::new(inner.clone());
			let debug_out = format!("{:?}", secret);
			let display_out = format!("{}", secret);
			prop_assert!(!debug_out.contains(&inner));
			prop_assert!(!display_out.contains(&inner));
		}
	}
}
