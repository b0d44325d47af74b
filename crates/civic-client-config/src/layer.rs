// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;
use std::path::PathBuf;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub portal: Option<PortalLayer>,
	#[serde(default)]
	pub auth: Option<AuthLayer>,
	#[serde(default)]
	pub locale: Option<LocaleLayer>,
	#[serde(default)]
	pub storage: Option<StorageLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PortalLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub login_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthLayer {
	#[serde(default)]
	pub timeout_secs: Option<u64>,
	#[serde(default)]
	pub redirect_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocaleLayer {
	#[serde(default)]
	pub preference_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageLayer {
	#[serde(default)]
	pub state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.portal, other.portal, PortalLayer::merge);
		merge_option(&mut self.auth, other.auth, AuthLayer::merge);
		merge_option(&mut self.locale, other.locale, LocaleLayer::merge);
		merge_option(&mut self.storage, other.storage, StorageLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}

	pub(crate) fn portal_mut(&mut self) -> &mut PortalLayer {
		self.portal.get_or_insert_with(PortalLayer::default)
	}

	pub(crate) fn auth_mut(&mut self) -> &mut AuthLayer {
		self.auth.get_or_insert_with(AuthLayer::default)
	}

	pub(crate) fn locale_mut(&mut self) -> &mut LocaleLayer {
		self.locale.get_or_insert_with(LocaleLayer::default)
	}

	pub(crate) fn storage_mut(&mut self) -> &mut StorageLayer {
		self.storage.get_or_insert_with(StorageLayer::default)
	}

	pub(crate) fn logging_mut(&mut self) -> &mut LoggingLayer {
		self.logging.get_or_insert_with(LoggingLayer::default)
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

fn take_some<T>(target: &mut Option<T>, source: Option<T>) {
	if source.is_some() {
		*target = source;
	}
}

impl PortalLayer {
	fn merge(&mut self, other: PortalLayer) {
		take_some(&mut self.base_url, other.base_url);
		take_some(&mut self.login_path, other.login_path);
	}
}

impl AuthLayer {
	fn merge(&mut self, other: AuthLayer) {
		take_some(&mut self.timeout_secs, other.timeout_secs);
		take_some(&mut self.redirect_delay_ms, other.redirect_delay_ms);
	}
}

impl LocaleLayer {
	fn merge(&mut self, other: LocaleLayer) {
		take_some(&mut self.preference_timeout_ms, other.preference_timeout_ms);
	}
}

impl StorageLayer {
	fn merge(&mut self, other: StorageLayer) {
		take_some(&mut self.state_file, other.state_file);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		take_some(&mut self.level, other.level);
		take_some(&mut self.format, other.format);
	}
}
