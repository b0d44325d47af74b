// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Bundled translation tables and lookup functions.
//!
//! Tables are TOML files under `locales/`, embedded at compile time and parsed
//! once on first use.
//!
//! # Fallback policy
//!
//! A lookup tries the requested locale's table, then the [`DEFAULT_LOCALE`]
//! table, then returns the key itself. Translation never fails.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::locale::{lookup, Locale, DEFAULT_LOCALE};

const EN_TOML: &str = include_str!("../locales/en.toml");
const HI_TOML: &str = include_str!("../locales/hi.toml");
const TA_TOML: &str = include_str!("../locales/ta.toml");
const BN_TOML: &str = include_str!("../locales/bn.toml");
const TE_TOML: &str = include_str!("../locales/te.toml");
const MR_TOML: &str = include_str!("../locales/mr.toml");

#[derive(Debug, Default, Deserialize)]
struct TableFile {
	#[serde(default)]
	messages: HashMap<String, String>,
}

/// Translation strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTable {
	locale: Locale,
	messages: HashMap<String, String>,
}

impl TranslationTable {
	fn parse(locale: Locale, source: &str) -> Self {
		let messages = match toml::from_str::<TableFile>(source) {
			Ok(file) => file.messages,
			Err(e) => {
				tracing::error!(locale = %locale, error = %e, "failed to parse translation table");
				HashMap::new()
			}
		};
		Self { locale, messages }
	}

	pub fn locale(&self) -> Locale {
		self.locale
	}

	/// Raw lookup in this table only, without fallback.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.messages.get(key).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.messages.keys().map(String::as_str)
	}

	/// Translate `key` using this table and the crate's fallback policy.
	pub fn translate(&self, key: &str) -> String {
		if let Some(text) = self.get(key) {
			return text.to_string();
		}

		if self.locale != DEFAULT_LOCALE {
			if let Some(text) = translation_table(DEFAULT_LOCALE).get(key) {
				return text.to_string();
			}
		}

		tracing::debug!(locale = %self.locale, key, "missing translation");
		key.to_string()
	}

	/// Translate with `{name}` placeholder substitution.
	pub fn translate_fmt(&self, key: &str, args: &[(&str, &str)]) -> String {
		substitute(self.translate(key), args)
	}
}

static TABLES: Lazy<HashMap<Locale, Arc<TranslationTable>>> = Lazy::new(|| {
	Locale::ALL
		.into_iter()
		.map(|locale| {
			let source = match locale {
				Locale::En => EN_TOML,
				Locale::Hi => HI_TOML,
				Locale::Ta => TA_TOML,
				Locale::Bn => BN_TOML,
				Locale::Te => TE_TOML,
				Locale::Mr => MR_TOML,
			};
			(locale, Arc::new(TranslationTable::parse(locale, source)))
		})
		.collect()
});

/// Shared translation table for a locale.
pub fn translation_table(locale: Locale) -> Arc<TranslationTable> {
	match TABLES.get(&locale) {
		Some(table) => Arc::clone(table),
		None => Arc::new(TranslationTable {
			locale,
			messages: HashMap::new(),
		}),
	}
}

/// Translate a key for a locale code.
///
/// Unknown codes are treated as [`DEFAULT_LOCALE`].
///
/// ```
/// use civic_common_i18n::t;
///
/// assert_eq!(t("en", "client.session.logged_out"), "Signed out.");
/// assert_eq!(t("en", "no.such.key"), "no.such.key");
/// ```
pub fn t(locale: &str, key: &str) -> String {
	translation_table(lookup(locale).locale).translate(key)
}

/// Translate with `{name}` placeholder substitution.
pub fn t_fmt(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
	substitute(t(locale, key), args)
}

fn substitute(mut text: String, args: &[(&str, &str)]) -> String {
	for (name, value) in args {
		let placeholder = format!("{{{name}}}");
		text = text.replace(&placeholder, value);
	}
	text
}
