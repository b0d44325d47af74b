// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for the civic portal client.
//!
//! This crate owns the three stateless pieces of locale handling:
//!
//! - the **catalog** of supported locales with their script, direction and
//!   font family ([`lookup`], [`Locale`], [`LocaleConfig`])
//! - the **resolver** that picks one locale from a persisted preference and
//!   an environment signal ([`resolve_locale`])
//! - the bundled **translation tables** ([`t`], [`t_fmt`],
//!   [`translation_table`])
//!
//! Stateful handling (the current locale of a running client) lives in
//! `civic-client-locale`.
//!
//! # String Naming Convention
//!
//! Translation keys use dot notation with a `client.` prefix, for example
//! `client.login.error.network`.
//!
//! # Example
//!
//! ```
//! use civic_common_i18n::{lookup, resolve_locale, t, Direction, Locale};
//!
//! let locale = resolve_locale(None, Some("ta"));
//! assert_eq!(locale, Locale::Ta);
//! assert_eq!(lookup(locale.code()).direction, Direction::Ltr);
//!
//! let text = t(locale.code(), "client.session.logged_out");
//! assert!(!text.is_empty());
//! ```

mod locale;
mod resolve;
mod translations;

pub use locale::{
	available_locales, is_supported, locale_info, lookup, Direction, Locale, LocaleConfig, Script,
};
pub use resolve::{environment_signal, negotiate_accept_language, resolve_locale};
pub use translations::{t, t_fmt, translation_table, TranslationTable};

pub use locale::{DEFAULT_LOCALE, LOCALES};
