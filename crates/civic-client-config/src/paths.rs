// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Resolved XDG paths for the civic client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/civic/config.toml
	pub user_config_file: PathBuf,
	/// State directory: ~/.local/state/civic/
	pub state_dir: PathBuf,
}

impl PathsConfig {
	/// Paths rooted at explicit config and state homes.
	pub fn rooted(config_home: &Path, state_home: &Path) -> Self {
		Self {
			user_config_file: config_home.join("civic/config.toml"),
			state_dir: state_home.join("civic"),
		}
	}

	/// Default location of the preference store.
	pub fn default_state_file(&self) -> PathBuf {
		self.state_dir.join("state.json")
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/civic/config.toml"),
			state_dir: PathBuf::from("~/.local/state/civic"),
		}
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses environment variables if set, otherwise falls back to defaults:
/// - XDG_CONFIG_HOME or ~/.config
/// - XDG_STATE_HOME or ~/.local/state
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let state_home = std::env::var_os("XDG_STATE_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/state"));

	tracing::debug!(
		config_home = %config_home.display(),
		state_home = %state_home.display(),
		"resolved XDG paths"
	);

	Ok(PathsConfig::rooted(&config_home, &state_home))
}
