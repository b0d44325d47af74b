// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Failures of a single authentication call.
#[derive(Debug, Error)]
pub enum AuthError {
	/// The portal answered with a non-success status.
	#[error("login rejected with status {status}")]
	Rejected { status: u16, message: Option<String> },

	/// A well-formed success response that carried no usable token.
	#[error("login response did not include a token")]
	MissingToken,

	#[error("invalid login response: {0}")]
	InvalidResponse(String),

	#[error("transport error: {0}")]
	Transport(String),

	#[error("login request timed out")]
	Timeout,
}

impl From<reqwest::Error> for AuthError {
	fn from(e: reqwest::Error) -> Self {
		if e.is_timeout() {
			AuthError::Timeout
		} else if e.is_decode() {
			AuthError::InvalidResponse(e.to_string())
		} else {
			AuthError::Transport(e.to_string())
		}
	}
}
