// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ordered collection of config sources and the merge that turns them into
//! a [`ClientConfig`].

use tracing::{debug, info, warn};

use crate::layer::ConfigLayer;
use crate::paths::PathsConfig;
use crate::runtime::ClientConfig;
use crate::sources::ConfigSource;
use crate::validation::validate_config;
use crate::ConfigError;

/// Sources to merge, in any registration order.
pub struct ConfigRegistry {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRegistry {
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	pub fn register(&mut self, source: Box<dyn ConfigSource>) {
		debug!(source = source.name(), precedence = ?source.precedence(), "config source registered");
		self.sources.push(source);
	}

	/// Sources are sorted by precedence (lowest first) and merged so higher
	/// precedence sources override lower ones. A source that fails to load
	/// fails the whole load; absent optional files load as empty layers.
	pub fn load(&self, paths: PathsConfig) -> Result<ClientConfig, ConfigError> {
		let mut ordered: Vec<_> = self.sources.iter().collect();
		ordered.sort_by_key(|s| s.precedence());

		debug!(
			sources = ordered.len(),
			"merging config sources"
		);

		let mut merged = ConfigLayer::default();
		for source in &ordered {
			let layer = source.load().inspect_err(|e| {
				warn!(source = source.name(), error = %e, "config source failed");
			})?;
			merged.merge(layer);
		}

		let config = ClientConfig::from_layer(merged, paths);
		validate_config(&config)?;

		info!(
			base_url = %config.portal.base_url,
			state_file = %config.storage.state_file.display(),
			log_level = ?config.logging.level,
			"configuration loaded"
		);

		Ok(config)
	}

	pub fn source_count(&self) -> usize {
		self.sources.len()
	}
}

impl Default for ConfigRegistry {
	fn default() -> Self {
		Self::new()
	}
}
