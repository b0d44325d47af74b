// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration loading from real files.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use civic_client_config::{
	load_config_from, CliOverrides, ConfigError, EnvSource, LogFormat, LogLevel, PathsConfig,
};

struct Fixture {
	_dir: tempfile::TempDir,
	paths: PathsConfig,
	root: PathBuf,
}

fn fixture() -> Fixture {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path().to_path_buf();
	let paths = PathsConfig::rooted(&root.join("config"), &root.join("state"));
	Fixture {
		_dir: dir,
		paths,
		root,
	}
}

fn write(path: &PathBuf, contents: &str) {
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, contents).unwrap();
}

fn no_env() -> EnvSource {
	EnvSource::from_vars(Vec::<(String, String)>::new())
}

#[test]
fn defaults_when_nothing_is_configured() {
	let f = fixture();
	let config = load_config_from(f.paths.clone(), CliOverrides::default(), no_env()).unwrap();

	assert_eq!(config.portal.base_url, "http://localhost:5000");
	assert_eq!(config.login_url(), "http://localhost:5000/api/auth/login");
	assert_eq!(config.storage.state_file, f.root.join("state/civic/state.json"));
}

#[test]
fn each_layer_overrides_the_one_below() {
	let f = fixture();
	write(
		&f.paths.user_config_file,
		r#"
		[portal]
		base_url = "http://user-file"
		login_path = "/v1/login"

		[auth]
		timeout_secs = 30
		redirect_delay_ms = 100

		[logging]
		level = "info"
		"#,
	);
	let explicit = f.root.join("explicit.toml");
	write(
		&explicit,
		r#"
		[portal]
		base_url = "http://explicit-file"

		[auth]
		timeout_secs = 40
		"#,
	);
	let env = EnvSource::from_vars([
		("CIVIC_PORTAL_URL", "http://env"),
		("CIVIC_LOG_FORMAT", "compact"),
	]);
	let cli = CliOverrides {
		portal_url: Some("http://cli".to_string()),
		log_level: Some("debug".to_string()),
		config_file: Some(explicit),
		..Default::default()
	};

	let config = load_config_from(f.paths.clone(), cli, env).unwrap();

	assert_eq!(config.portal.base_url, "http://cli");
	assert_eq!(config.portal.login_path, "/v1/login");
	assert_eq!(config.auth.timeout, Duration::from_secs(40));
	assert_eq!(config.auth.redirect_delay, Duration::from_millis(100));
	assert_eq!(config.logging.level, LogLevel::Debug);
	assert_eq!(config.logging.format, LogFormat::Compact);
}

#[test]
fn missing_explicit_file_is_an_error() {
	let f = fixture();
	let cli = CliOverrides {
		config_file: Some(f.root.join("nope.toml")),
		..Default::default()
	};
	assert!(matches!(
		load_config_from(f.paths.clone(), cli, no_env()),
		Err(ConfigError::FileNotFound(_))
	));
}

#[test]
fn broken_user_file_is_reported() {
	let f = fixture();
	write(&f.paths.user_config_file, "[auth]\ntimeout_secs = \"soon\"\n");
	assert!(matches!(
		load_config_from(f.paths.clone(), CliOverrides::default(), no_env()),
		Err(ConfigError::TomlParse { .. })
	));
}

#[test]
fn state_file_from_cli_wins() {
	let f = fixture();
	let cli = CliOverrides {
		state_file: Some(f.root.join("elsewhere.json")),
		..Default::default()
	};
	let env = EnvSource::from_vars([("CIVIC_STATE_FILE", "/tmp/env-state.json")]);
	let config = load_config_from(f.paths.clone(), cli, env).unwrap();
	assert_eq!(config.storage.state_file, f.root.join("elsewhere.json"));
}

#[test]
fn invalid_portal_url_is_rejected() {
	let f = fixture();
	let env = EnvSource::from_vars([("CIVIC_PORTAL_URL", "portal.example.gov.in")]);
	assert!(matches!(
		load_config_from(f.paths.clone(), CliOverrides::default(), env),
		Err(ConfigError::InvalidValue { .. })
	));
}
