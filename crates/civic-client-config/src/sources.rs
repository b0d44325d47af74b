// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where configuration layers come from.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Merge order. A higher level overrides a lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 30,
	ExplicitFile = 40,
	Environment = 50,
	Cli = 60,
}

/// Anything that can produce a partial [`ConfigLayer`].
pub trait ConfigSource: Send + Sync {
	/// Shown in logs.
	fn name(&self) -> &'static str;

	fn precedence(&self) -> Precedence;

	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Contributes nothing; defaults are filled in by
/// [`ClientConfig::from_layer`](crate::ClientConfig::from_layer).
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		Ok(ConfigLayer::default())
	}
}

/// A TOML config file.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// User config: ~/.config/civic/config.toml. Optional.
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// A file named with `--config`. Must exist.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::ExplicitFile,
			name: "explicit-config",
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "no config file");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "reading config file");
		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		Ok(layer)
	}
}

pub const ENV_PORTAL_URL: &str = "CIVIC_PORTAL_URL";
pub const ENV_LOGIN_PATH: &str = "CIVIC_LOGIN_PATH";
pub const ENV_AUTH_TIMEOUT_SECS: &str = "CIVIC_AUTH_TIMEOUT_SECS";
pub const ENV_REDIRECT_DELAY_MS: &str = "CIVIC_REDIRECT_DELAY_MS";
pub const ENV_PREFERENCE_TIMEOUT_MS: &str = "CIVIC_PREFERENCE_TIMEOUT_MS";
pub const ENV_STATE_FILE: &str = "CIVIC_STATE_FILE";
pub const ENV_LOG_LEVEL: &str = "CIVIC_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "CIVIC_LOG_FORMAT";

/// `CIVIC_*` environment variables.
///
/// Empty values are ignored.
pub struct EnvSource {
	vars: Vec<(String, String)>,
}

impl EnvSource {
	/// Snapshot of the process environment.
	pub fn from_process() -> Self {
		Self::from_vars(std::env::vars())
	}

	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: vars
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.filter(|(k, _)| k.starts_with("CIVIC_"))
				.collect(),
		}
	}
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
	value
		.parse()
		.map_err(|_| ConfigError::invalid_value(key, format!("expected a whole number, got {value:?}")))
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		for (key, value) in &self.vars {
			let value = value.trim();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "env override");

			match key.as_str() {
				ENV_PORTAL_URL => layer.portal_mut().base_url = Some(value.to_string()),
				ENV_LOGIN_PATH => layer.portal_mut().login_path = Some(value.to_string()),
				ENV_AUTH_TIMEOUT_SECS => layer.auth_mut().timeout_secs = Some(parse_u64(key, value)?),
				ENV_REDIRECT_DELAY_MS => {
					layer.auth_mut().redirect_delay_ms = Some(parse_u64(key, value)?)
				}
				ENV_PREFERENCE_TIMEOUT_MS => {
					layer.locale_mut().preference_timeout_ms = Some(parse_u64(key, value)?)
				}
				ENV_STATE_FILE => layer.storage_mut().state_file = Some(PathBuf::from(value)),
				ENV_LOG_LEVEL => layer.logging_mut().level = Some(value.to_string()),
				ENV_LOG_FORMAT => layer.logging_mut().format = Some(value.to_string()),
				_ => {
					// Unknown CIVIC_ variable, ignore
				}
			}
		}

		Ok(layer)
	}
}

/// Values taken from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub portal_url: Option<String>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub state_file: Option<PathBuf>,
	pub config_file: Option<PathBuf>,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		let mut layer = ConfigLayer::default();

		if let Some(ref url) = self.overrides.portal_url {
			layer.portal_mut().base_url = Some(url.clone());
		}
		if let Some(ref level) = self.overrides.log_level {
			layer.logging_mut().level = Some(level.clone());
		}
		if let Some(ref format) = self.overrides.log_format {
			layer.logging_mut().format = Some(format.clone());
		}
		if let Some(ref state_file) = self.overrides.state_file {
			layer.storage_mut().state_file = Some(state_file.clone());
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::ExplicitFile);
		assert!(Precedence::ExplicitFile > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::Defaults);
	}

	#[test]
	fn test_defaults_source_returns_empty_layer() {
		assert_eq!(DefaultsSource.load().unwrap(), ConfigLayer::default());
	}

	#[test]
	fn test_user_file_missing_returns_empty() {
		let source = FileSource {
			path: PathBuf::from("/nonexistent/config.toml"),
			precedence: Precedence::UserFile,
			name: "test",
			required: false,
		};
		assert_eq!(source.load().unwrap(), ConfigLayer::default());
	}

	#[test]
	fn test_explicit_file_missing_is_error() {
		let source = FileSource::explicit(PathBuf::from("/nonexistent/config.toml"));
		assert!(matches!(source.load(), Err(ConfigError::FileNotFound(_))));
	}

	#[test]
	fn test_file_source_reports_parse_errors() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, "[portal\nbase_url = 1").unwrap();

		let source = FileSource::explicit(path);
		assert!(matches!(source.load(), Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_env_source_reads_civic_vars() {
		let source = EnvSource::from_vars([
			("CIVIC_PORTAL_URL", "https://portal.example.gov.in"),
			("CIVIC_AUTH_TIMEOUT_SECS", "30"),
			("CIVIC_PREFERENCE_TIMEOUT_MS", "750"),
			("CIVIC_LOG_LEVEL", ""),
			("PATH", "/usr/bin"),
		]);
		let layer = source.load().unwrap();

		assert_eq!(
			layer.portal.unwrap().base_url.as_deref(),
			Some("https://portal.example.gov.in")
		);
		assert_eq!(layer.auth.unwrap().timeout_secs, Some(30));
		assert_eq!(layer.locale.unwrap().preference_timeout_ms, Some(750));
		assert!(layer.logging.is_none());
	}

	#[test]
	fn test_env_source_rejects_bad_numbers() {
		let source = EnvSource::from_vars([("CIVIC_REDIRECT_DELAY_MS", "soon")]);
		assert!(matches!(
			source.load(),
			Err(ConfigError::InvalidValue { ref field, .. }) if field == "CIVIC_REDIRECT_DELAY_MS"
		));
	}

	#[test]
	fn test_cli_source() {
		let source = CliSource::new(CliOverrides {
			portal_url: Some("http://127.0.0.1:8080".to_string()),
			log_format: Some("json".to_string()),
			..Default::default()
		});
		let layer = source.load().unwrap();
		assert_eq!(
			layer.portal.unwrap().base_url.as_deref(),
			Some("http://127.0.0.1:8080")
		);
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
		assert!(layer.storage.is_none());
	}
}
