// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use civic_common_i18n::{translation_table, Direction, Locale, LocaleConfig, TranslationTable};

use crate::presentation::PresentationAttributes;

/// A resolved locale together with everything derived from it.
///
/// Sessions are replaced whole, so locale, translations and direction can
/// never disagree.
#[derive(Debug, Clone)]
pub struct LocaleSession {
	locale: Locale,
	config: &'static LocaleConfig,
	translations: Arc<TranslationTable>,
	generation: u64,
}

impl LocaleSession {
	pub(crate) fn new(locale: Locale, generation: u64) -> Self {
		Self {
			locale,
			config: locale.config(),
			translations: translation_table(locale),
			generation,
		}
	}

	pub fn locale(&self) -> Locale {
		self.locale
	}

	pub fn config(&self) -> &'static LocaleConfig {
		self.config
	}

	pub fn direction(&self) -> Direction {
		self.config.direction
	}

	pub fn font_family(&self) -> &'static str {
		self.config.font_family
	}

	pub fn translations(&self) -> &Arc<TranslationTable> {
		&self.translations
	}

	/// Number of re-render passes since startup. Zero for the initial apply.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	pub fn attributes(&self) -> PresentationAttributes {
		PresentationAttributes::from(self.config)
	}

	pub fn translate(&self, key: &str) -> String {
		self.translations.translate(key)
	}

	pub fn translate_fmt(&self, key: &str, args: &[(&str, &str)]) -> String {
		self.translations.translate_fmt(key, args)
	}
}

impl PartialEq for LocaleSession {
	fn eq(&self, other: &Self) -> bool {
		self.locale == other.locale && self.generation == other.generation
	}
}

impl Eq for LocaleSession {}
