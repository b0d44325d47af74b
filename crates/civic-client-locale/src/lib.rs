// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Process-wide locale session for the civic portal client.
//!
//! [`LocaleController`] owns the single current locale. On startup it
//! resolves a locale from the persisted `preferred-language` and an
//! environment signal, then applies it: the session (locale, translation
//! table, direction) is built as one value and the language tag, direction
//! and font family are pushed to the [`PresentationEnvironment`].
//!
//! Changing locale persists the choice, publishes a new session, and asks the
//! presentation environment for one re-render pass of the locale-dependent
//! subtrees.

mod controller;
mod error;
mod presentation;
mod session;

pub use controller::{LocaleController, DEFAULT_PREFERENCE_TIMEOUT};
pub use error::LocaleError;
pub use presentation::{PresentationAttributes, PresentationEnvironment, ResetScope};
pub use session::LocaleSession;
