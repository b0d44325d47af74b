// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// Timeout applied when the caller has no configured value.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Creates a client builder with the standard User-Agent and
/// [`DEFAULT_TIMEOUT`].
///
/// Use this when you need to customize the client further.
pub fn builder() -> ClientBuilder {
	Client::builder()
		.user_agent(user_agent())
		.timeout(DEFAULT_TIMEOUT)
}

/// Creates a client with the standard User-Agent and the given overall
/// request timeout.
pub fn new_client_with_timeout(timeout: Duration) -> Result<Client, reqwest::Error> {
	tracing::trace!(timeout_ms = timeout.as_millis() as u64, "building HTTP client");
	builder().timeout(timeout).build()
}

/// Returns the standard User-Agent string.
///
/// Format: `civic/{version} ({os}-{arch})`
pub fn user_agent() -> String {
	format!(
		"civic/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_agent_has_correct_format() {
		let ua = user_agent();
		assert!(ua.starts_with("civic/"));
		assert!(ua.contains(std::env::consts::OS));
		assert!(ua.ends_with(')'));
	}

	#[test]
	fn user_agent_names_os_and_arch() {
		let expected = format!(
			"civic/{} ({}-{})",
			env!("CARGO_PKG_VERSION"),
			std::env::consts::OS,
			std::env::consts::ARCH
		);
		assert_eq!(user_agent(), expected);
	}

	#[test]
	fn client_builds_with_custom_timeout() {
		assert!(new_client_with_timeout(Duration::from_millis(250)).is_ok());
	}
}
