// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Preference store backends.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;

/// On-disk store format: a flat JSON object of string values.
pub type PersistedPreferences = BTreeMap<String, String>;

/// Durable key-value area that outlives a single client run.
///
/// Multi-key writes and removals are atomic: a concurrent reader sees either
/// all of the change or none of it. Absence of a key is a valid state.
#[async_trait]
pub trait PreferenceStore: Send + Sync + std::fmt::Debug {
	/// Read several keys from one consistent snapshot.
	async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError>;

	/// Write several keys in one atomic update.
	async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

	/// Remove several keys in one atomic update. Missing keys are ignored.
	async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError>;

	async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		Ok(self.get_many(&[key]).await?.into_iter().next().flatten())
	}

	async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
		self.set_many(&[(key, value)]).await
	}

	async fn remove(&self, key: &str) -> Result<(), StoreError> {
		self.remove_many(&[key]).await
	}
}

fn check_keys<'a>(mut keys: impl Iterator<Item = &'a str>) -> Result<(), StoreError> {
	if keys.any(|k| k.is_empty()) {
		return Err(StoreError::InvalidFormat("empty key".to_string()));
	}
	Ok(())
}

/// File-backed store with JSON format.
///
/// Writes go to a temp file that is renamed over the target, so readers
/// never observe a half-written file. The file is restricted to 0600 on
/// Unix. Read-modify-write cycles within one process are serialized.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	write_lock: Mutex<()>,
}

impl FileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			write_lock: Mutex::new(()),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read the entire store from disk.
	///
	/// A missing file is an empty store. So is a file that is not a JSON
	/// object; the next write replaces it. Entries whose value is not a string
	/// are dropped.
	pub async fn read_all(&self) -> Result<PersistedPreferences, StoreError> {
		let contents = match fs::read_to_string(&self.path).await {
			Ok(contents) => contents,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Ok(PersistedPreferences::new());
			}
			Err(e) => return Err(e.into()),
		};

		if contents.trim().is_empty() {
			return Ok(PersistedPreferences::new());
		}

		let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(&contents) {
			Ok(raw) => raw,
			Err(e) => {
				warn!(path = ?self.path, error = %e, "unreadable preference store, treating as empty");
				return Ok(PersistedPreferences::new());
			}
		};

		let total = raw.len();
		let prefs: PersistedPreferences = raw
			.into_iter()
			.filter_map(|(key, value)| match value {
				serde_json::Value::String(value) => Some((key, value)),
				_ => None,
			})
			.collect();
		if prefs.len() < total {
			warn!(
				path = ?self.path,
				skipped = total - prefs.len(),
				"ignoring non-string entries in preference store"
			);
		}
		Ok(prefs)
	}

	async fn write_all(&self, prefs: &PersistedPreferences) -> Result<(), StoreError> {
		let contents = serde_json::to_string_pretty(prefs)?;
		let path = self.path.clone();
		tokio::task::spawn_blocking(move || replace_file(&path, contents.as_bytes()))
			.await
			.map_err(|e| StoreError::Io(format!("store write task failed: {e}")))??;

		debug!(path = ?self.path, keys = prefs.len(), "preference store written");
		Ok(())
	}
}

/// Write `contents` to a uniquely named temp file next to `path`, then rename
/// it over `path`. Concurrent writers never share a temp file.
fn replace_file(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	std::fs::create_dir_all(parent)?;

	let mut temp = tempfile::Builder::new()
		.prefix(".civic-state-")
		.suffix(".tmp")
		.tempfile_in(parent)?;
	temp.write_all(contents)?;
	temp.as_file().sync_all()?;

	#[cfg(unix)]
	{
		use std::os::unix::fs::PermissionsExt;
		let perms = std::fs::Permissions::from_mode(0o600);
		if let Err(e) = std::fs::set_permissions(temp.path(), perms) {
			warn!(path = ?temp.path(), error = %e, "failed to set store permissions to 0600");
		}
	}

	temp.persist(path).map_err(|e| e.error)?;
	Ok(())
}

#[async_trait]
impl PreferenceStore for FileStore {
	async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
		let prefs = self.read_all().await?;
		Ok(keys.iter().map(|k| prefs.get(*k).cloned()).collect())
	}

	async fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
		check_keys(entries.iter().map(|(k, _)| *k))?;
		let _guard = self.write_lock.lock().await;
		let mut prefs = self.read_all().await?;
		for (key, value) in entries {
			prefs.insert((*key).to_string(), (*value).to_string());
		}
		self.write_all(&prefs).await
	}

	async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
		let _guard = self.write_lock.lock().await;
		let mut prefs = self.read_all().await?;
		let before = prefs.len();
		for key in keys {
			prefs.remove(*key);
		}
		if prefs.len() == before && !self.path.exists() {
			return Ok(());
		}
		self.write_all(&prefs).await
	}
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: tokio::sync::RwLock<HashMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a store pre-populated with entries.
	pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		let map = entries
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Self {
			entries: tokio::sync::RwLock::new(map),
		}
	}
}

#[async_trait]
impl PreferenceStore for MemoryStore {
	async fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StoreError> {
		let entries = self.entries.read().await;
		Ok(keys.iter().map(|k| entries.get(*k).cloned()).collect())
	}

	async fn set_many(&self, pairs: &[(&str, &str)]) -> Result<(), StoreError> {
		check_keys(pairs.iter().map(|(k, _)| *k))?;
		let mut entries = self.entries.write().await;
		for (key, value) in pairs {
			entries.insert((*key).to_string(), (*value).to_string());
		}
		Ok(())
	}

	async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
		let mut entries = self.entries.write().await;
		for key in keys {
			entries.remove(*key);
		}
		Ok(())
	}
}
