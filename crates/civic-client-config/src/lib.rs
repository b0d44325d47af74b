// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the civic portal client.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides
//! - Configuration validation

pub mod defaults;
pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use defaults::{ensure_default_config, DEFAULT_CONFIG_TEMPLATE};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{ClientConfig, LogFormat, LogLevel};
pub use sources::{CliOverrides, ConfigSource, EnvSource, Precedence};

/// Load configuration with CLI overrides.
///
/// Precedence, lowest first: built-in defaults, the user config file, the
/// file named by `--config`, `CIVIC_*` environment variables, CLI flags.
/// If no user config file exists, a default one is created at
/// `~/.config/civic/config.toml`.
pub fn load_config_with_cli(cli: CliOverrides) -> Result<ClientConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	if let Err(e) = defaults::ensure_default_config(&paths.user_config_file) {
		tracing::warn!(error = %e, "could not write default config file");
	}

	load_config_from(paths, cli, EnvSource::from_process())
}

/// Load configuration from explicit paths and environment.
pub fn load_config_from(
	paths: PathsConfig,
	cli: CliOverrides,
	env: EnvSource,
) -> Result<ClientConfig, ConfigError> {
	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Some(ref path) = cli.config_file {
		registry.register(Box::new(sources::FileSource::explicit(path.clone())));
	}
	registry.register(Box::new(env));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
