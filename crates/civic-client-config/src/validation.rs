// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use std::time::Duration;

use tracing::warn;

use crate::runtime::ClientConfig;
use crate::ConfigError;

/// Redirect delays above this are allowed but almost certainly a typo.
const LONG_REDIRECT_DELAY: Duration = Duration::from_secs(10);

/// Validate the configuration.
///
/// Returns Ok(()) if valid, or ConfigError::InvalidValue with details.
pub fn validate_config(config: &ClientConfig) -> Result<(), ConfigError> {
	validate_portal(config)?;
	validate_timeouts(config)?;
	validate_storage(config)?;

	Ok(())
}

fn validate_portal(config: &ClientConfig) -> Result<(), ConfigError> {
	let base_url = config.portal.base_url.trim();
	let host = base_url
		.strip_prefix("https://")
		.or_else(|| base_url.strip_prefix("http://"))
		.ok_or_else(|| ConfigError::invalid_value("portal.base_url", "must start with http:// or https://"))?;

	if host.trim_end_matches('/').is_empty() {
		return Err(ConfigError::invalid_value("portal.base_url", "missing host"));
	}

	if !config.portal.login_path.starts_with('/') {
		return Err(ConfigError::invalid_value(
			"portal.login_path",
			"must start with '/'",
		));
	}

	Ok(())
}

fn validate_timeouts(config: &ClientConfig) -> Result<(), ConfigError> {
	if config.auth.timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"auth.timeout_secs",
			"must be greater than 0",
		));
	}

	if config.locale.preference_timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"locale.preference_timeout_ms",
			"must be greater than 0",
		));
	}

	if config.auth.redirect_delay > LONG_REDIRECT_DELAY {
		warn!(
			redirect_delay_ms = config.auth.redirect_delay.as_millis() as u64,
			"redirect delay is unusually long"
		);
	}

	Ok(())
}

fn validate_storage(config: &ClientConfig) -> Result<(), ConfigError> {
	if config.storage.state_file.as_os_str().is_empty() {
		return Err(ConfigError::invalid_value(
			"storage.state_file",
			"cannot be empty",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::ConfigLayer;
	use crate::paths::PathsConfig;
	use std::path::{Path, PathBuf};

	fn config() -> ClientConfig {
		ClientConfig::from_layer(
			ConfigLayer::default(),
			PathsConfig::rooted(Path::new("/cfg"), Path::new("/state")),
		)
	}

	#[test]
	fn test_defaults_are_valid() {
		assert!(validate_config(&config()).is_ok());
	}

	#[test]
	fn test_base_url_must_be_http() {
		for bad in ["ftp://portal", "portal.example.gov.in", "https://", ""] {
			let mut c = config();
			c.portal.base_url = bad.to_string();
			assert!(validate_config(&c).is_err(), "accepted {bad:?}");
		}
	}

	#[test]
	fn test_login_path_must_be_absolute() {
		let mut c = config();
		c.portal.login_path = "api/auth/login".to_string();
		assert!(validate_config(&c).is_err());
	}

	#[test]
	fn test_zero_timeouts_rejected() {
		let mut c = config();
		c.auth.timeout = Duration::ZERO;
		assert!(validate_config(&c).is_err());

		let mut c = config();
		c.locale.preference_timeout = Duration::ZERO;
		assert!(validate_config(&c).is_err());
	}

	#[test]
	fn test_zero_redirect_delay_is_allowed() {
		let mut c = config();
		c.auth.redirect_delay = Duration::ZERO;
		assert!(validate_config(&c).is_ok());
	}

	#[test]
	fn test_empty_state_file_rejected() {
		let mut c = config();
		c.storage.state_file = PathBuf::new();
		assert!(validate_config(&c).is_err());
	}
}
