// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default configuration file generation.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::ConfigError;

/// Default configuration file template.
///
/// This template is written to ~/.config/civic/config.toml when no user config exists.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"#
# Civic portal client configuration
# Location: ~/.config/civic/config.toml
#
# This file was auto-generated with the built-in defaults.
# Every value can also be set with a CIVIC_* environment variable.
#

# =============================================================================
# Portal
# =============================================================================

[portal]
# Base URL of the portal (CIVIC_PORTAL_URL)
base_url = "http://localhost:5000"

# Path of the login endpoint (CIVIC_LOGIN_PATH)
login_path = "/api/auth/login"

# =============================================================================
# Authentication
# =============================================================================

[auth]
# Upper bound on one login request, in seconds (CIVIC_AUTH_TIMEOUT_SECS)
timeout_secs = 15

# Pause between the success message and opening the dashboard, in
# milliseconds (CIVIC_REDIRECT_DELAY_MS)
redirect_delay_ms = 1500

# =============================================================================
# Locale
# =============================================================================

[locale]
# Upper bound on reading the saved language at startup, in milliseconds
# (CIVIC_PREFERENCE_TIMEOUT_MS)
preference_timeout_ms = 2000

# =============================================================================
# Storage
# =============================================================================

[storage]
# Where the session and language preference are kept (CIVIC_STATE_FILE)
# state_file = "~/.local/state/civic/state.json"

# =============================================================================
# Logging
# =============================================================================

[logging]
# Log level: error, warn, info, debug, trace (CIVIC_LOG_LEVEL)
level = "warn"

# Log format: pretty, json, compact (CIVIC_LOG_FORMAT)
format = "pretty"
"#;

/// Ensure the config directory exists and create a default config file if none exists.
///
/// Returns `true` if a new config file was created, `false` if one already existed.
pub fn ensure_default_config(config_file_path: &Path) -> Result<bool, ConfigError> {
	if config_file_path.exists() {
		debug!(path = %config_file_path.display(), "config file already exists");
		return Ok(false);
	}

	if let Some(parent) = config_file_path.parent() {
		if !parent.exists() {
			debug!(path = %parent.display(), "creating config directory");
			fs::create_dir_all(parent)?;
		}
	}

	info!(path = %config_file_path.display(), "creating default config file");
	fs::write(config_file_path, DEFAULT_CONFIG_TEMPLATE)?;

	Ok(true)
}
