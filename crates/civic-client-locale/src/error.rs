// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use civic_client_store::StoreError;

/// Errors returned by [`crate::LocaleController::set_locale`].
///
/// In every case the current locale is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
	#[error("unsupported locale: {code}")]
	Unsupported { code: String },

	#[error("failed to persist locale preference: {0}")]
	Persist(#[from] StoreError),
}
