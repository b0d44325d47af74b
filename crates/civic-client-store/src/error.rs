// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Store error types.

/// Errors that can occur while reading or writing the preference store.
///
/// A missing key is never an error; it is reported as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("IO error: {0}")]
	Io(String),

	#[error("Serialization error: {0}")]
	Serde(String),

	#[error("Invalid store format: {0}")]
	InvalidFormat(String),
}

impl From<std::io::Error> for StoreError {
	fn from(err: std::io::Error) -> Self {
		StoreError::Io(err.to_string())
	}
}

impl From<serde_json::Error> for StoreError {
	fn from(err: serde_json::Error) -> Self {
		StoreError::Serde(err.to_string())
	}
}
