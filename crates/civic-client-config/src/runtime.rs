// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::layer::*;
use crate::paths::PathsConfig;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOGIN_PATH: &str = "/api/auth/login";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
pub const DEFAULT_PREFERENCE_TIMEOUT_MS: u64 = 2000;

/// The final, validated configuration for the civic client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub portal: PortalConfig,
	pub auth: AuthConfig,
	pub locale: LocaleSettings,
	pub storage: StorageConfig,
	pub logging: LoggingConfig,

	/// Resolved XDG paths
	pub paths: PathsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
	pub base_url: String,
	pub login_path: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthConfig {
	pub timeout: Duration,
	pub redirect_delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSettings {
	pub preference_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
	pub state_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
	Error,
	#[default]
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	/// Directive understood by `tracing_subscriber::EnvFilter`.
	pub fn as_filter(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
	Compact,
}

impl ClientConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Self {
		let portal = build_portal_config(layer.portal);
		let auth = build_auth_config(layer.auth);
		let locale = LocaleSettings {
			preference_timeout: Duration::from_millis(
				layer
					.locale
					.and_then(|l| l.preference_timeout_ms)
					.unwrap_or(DEFAULT_PREFERENCE_TIMEOUT_MS),
			),
		};
		let storage = StorageConfig {
			state_file: layer
				.storage
				.and_then(|s| s.state_file)
				.unwrap_or_else(|| paths.default_state_file()),
		};
		let logging = build_logging_config(layer.logging);

		Self {
			portal,
			auth,
			locale,
			storage,
			logging,
			paths,
		}
	}

	/// Absolute URL of the login endpoint.
	pub fn login_url(&self) -> String {
		format!(
			"{}/{}",
			self.portal.base_url.trim_end_matches('/'),
			self.portal.login_path.trim_start_matches('/')
		)
	}

	/// Absolute URL of a portal page.
	pub fn page_url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.portal.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}
}

fn build_portal_config(layer: Option<PortalLayer>) -> PortalConfig {
	let layer = layer.unwrap_or_default();
	PortalConfig {
		base_url: layer
			.base_url
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
		login_path: layer
			.login_path
			.unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
	}
}

fn build_auth_config(layer: Option<AuthLayer>) -> AuthConfig {
	let layer = layer.unwrap_or_default();
	AuthConfig {
		timeout: Duration::from_secs(layer.timeout_secs.unwrap_or(DEFAULT_AUTH_TIMEOUT_SECS)),
		redirect_delay: Duration::from_millis(
			layer.redirect_delay_ms.unwrap_or(DEFAULT_REDIRECT_DELAY_MS),
		),
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		format: parse_log_format(layer.format.as_deref()),
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
		None => LogLevel::default(),
		Some("error") => LogLevel::Error,
		Some("warn") => LogLevel::Warn,
		Some("info") => LogLevel::Info,
		Some("debug") => LogLevel::Debug,
		Some("trace") => LogLevel::Trace,
		Some(other) => {
			warn!(level = %other, "unknown log level, using default");
			LogLevel::default()
		}
	}
}

fn parse_log_format(s: Option<&str>) -> LogFormat {
	match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
		None => LogFormat::default(),
		Some("json") => LogFormat::Json,
		Some("compact") => LogFormat::Compact,
		Some("pretty") => LogFormat::Pretty,
		Some(other) => {
			warn!(format = %other, "unknown log format, using default");
			LogFormat::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;

	fn paths() -> PathsConfig {
		PathsConfig::rooted(Path::new("/cfg"), Path::new("/state"))
	}

	#[test]
	fn test_defaults() {
		let config = ClientConfig::from_layer(ConfigLayer::default(), paths());
		assert_eq!(config.portal.base_url, "http://localhost:5000");
		assert_eq!(config.portal.login_path, "/api/auth/login");
		assert_eq!(config.auth.timeout, Duration::from_secs(15));
		assert_eq!(config.auth.redirect_delay, Duration::from_millis(1500));
		assert_eq!(config.locale.preference_timeout, Duration::from_secs(2));
		assert_eq!(config.storage.state_file, PathBuf::from("/state/civic/state.json"));
		assert_eq!(config.logging, LoggingConfig::default());
	}

	#[test]
	fn test_login_url_joins_cleanly() {
		let mut config = ClientConfig::from_layer(ConfigLayer::default(), paths());
		config.portal.base_url = "https://portal.example.gov.in/".to_string();
		assert_eq!(config.login_url(), "https://portal.example.gov.in/api/auth/login");
		assert_eq!(
			config.page_url("/citizen/dashboard"),
			"https://portal.example.gov.in/citizen/dashboard"
		);
	}

	#[test]
	fn test_log_settings_parse_case_insensitively() {
		assert_eq!(parse_log_level(Some("DEBUG")), LogLevel::Debug);
		assert_eq!(parse_log_level(Some("loud")), LogLevel::Warn);
		assert_eq!(parse_log_format(Some(" Json ")), LogFormat::Json);
		assert_eq!(parse_log_format(Some("xml")), LogFormat::Pretty);
	}

	#[test]
	fn test_log_level_filter_directives() {
		assert_eq!(LogLevel::Trace.as_filter(), "trace");
		assert_eq!(LogLevel::default().as_filter(), "warn");
	}
}
