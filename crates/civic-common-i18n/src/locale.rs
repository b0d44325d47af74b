// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale catalog: the closed set of supported locales and their
//! presentation metadata.

use std::fmt;

/// Text direction for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	/// Left-to-right
	Ltr,
	/// Right-to-left
	Rtl,
}

impl Direction {
	/// Returns the HTML `dir` attribute value.
	pub fn as_html_dir(&self) -> &'static str {
		match self {
			Direction::Ltr => "ltr",
			Direction::Rtl => "rtl",
		}
	}
}

impl fmt::Display for Direction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_html_dir())
	}
}

/// Writing system a locale renders in. Drives font selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
	Latin,
	Devanagari,
	Tamil,
	Bengali,
	Telugu,
}

impl Script {
	/// ISO 15924 code.
	pub fn as_str(&self) -> &'static str {
		match self {
			Script::Latin => "Latn",
			Script::Devanagari => "Deva",
			Script::Tamil => "Taml",
			Script::Bengali => "Beng",
			Script::Telugu => "Telu",
		}
	}
}

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
	En,
	Hi,
	Ta,
	Bn,
	Te,
	Mr,
}

impl Locale {
	pub const ALL: [Locale; 6] = [
		Locale::En,
		Locale::Hi,
		Locale::Ta,
		Locale::Bn,
		Locale::Te,
		Locale::Mr,
	];

	pub fn code(&self) -> &'static str {
		match self {
			Locale::En => "en",
			Locale::Hi => "hi",
			Locale::Ta => "ta",
			Locale::Bn => "bn",
			Locale::Te => "te",
			Locale::Mr => "mr",
		}
	}

	/// Parse a locale code. Surrounding whitespace and ASCII case are ignored.
	///
	/// Returns `None` for anything outside the supported set, including the
	/// empty string.
	pub fn parse(code: &str) -> Option<Locale> {
		let code = code.trim();
		Locale::ALL
			.into_iter()
			.find(|l| l.code().eq_ignore_ascii_case(code))
	}

	/// Catalog entry for this locale.
	pub fn config(&self) -> &'static LocaleConfig {
		match self {
			Locale::En => &LOCALES[0],
			Locale::Hi => &LOCALES[1],
			Locale::Ta => &LOCALES[2],
			Locale::Bn => &LOCALES[3],
			Locale::Te => &LOCALES[4],
			Locale::Mr => &LOCALES[5],
		}
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// Presentation metadata for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
	pub locale: Locale,
	/// ISO 639-1 code (e.g. "en", "hi")
	pub code: &'static str,
	/// English name of the language
	pub name: &'static str,
	/// Name of the language in its own script
	pub native_name: &'static str,
	pub script: Script,
	/// Stored per entry even though every current locale is LTR.
	pub direction: Direction,
	/// CSS font family pushed to the presentation environment.
	pub font_family: &'static str,
	/// BCP 47 tag for the `lang` attribute.
	pub language_tag: &'static str,
}

/// Default locale, used whenever nothing better can be determined.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// The catalog. Order matches [`Locale::ALL`].
pub const LOCALES: &[LocaleConfig] = &[
	LocaleConfig {
		locale: Locale::En,
		code: "en",
		name: "English",
		native_name: "English",
		script: Script::Latin,
		direction: Direction::Ltr,
		font_family: "Inter, sans-serif",
		language_tag: "en-IN",
	},
	LocaleConfig {
		locale: Locale::Hi,
		code: "hi",
		name: "Hindi",
		native_name: "हिन्दी",
		script: Script::Devanagari,
		direction: Direction::Ltr,
		font_family: "'Noto Sans Devanagari', sans-serif",
		language_tag: "hi-IN",
	},
	LocaleConfig {
		locale: Locale::Ta,
		code: "ta",
		name: "Tamil",
		native_name: "தமிழ்",
		script: Script::Tamil,
		direction: Direction::Ltr,
		font_family: "'Noto Sans Tamil', sans-serif",
		language_tag: "ta-IN",
	},
	LocaleConfig {
		locale: Locale::Bn,
		code: "bn",
		name: "Bengali",
		native_name: "বাংলা",
		script: Script::Bengali,
		direction: Direction::Ltr,
		font_family: "'Noto Sans Bengali', sans-serif",
		language_tag: "bn-IN",
	},
	LocaleConfig {
		locale: Locale::Te,
		code: "te",
		name: "Telugu",
		native_name: "తెలుగు",
		script: Script::Telugu,
		direction: Direction::Ltr,
		font_family: "'Noto Sans Telugu', sans-serif",
		language_tag: "te-IN",
	},
	LocaleConfig {
		locale: Locale::Mr,
		code: "mr",
		name: "Marathi",
		native_name: "मराठी",
		script: Script::Devanagari,
		direction: Direction::Ltr,
		font_family: "'Noto Sans Devanagari', sans-serif",
		language_tag: "mr-IN",
	},
];

/// Look up the catalog entry for a code.
///
/// Total over all strings: any code outside the supported set yields the
/// [`DEFAULT_LOCALE`] entry.
pub fn lookup(code: &str) -> &'static LocaleConfig {
	locale_info(code).unwrap_or_else(|| DEFAULT_LOCALE.config())
}

/// Get metadata for a locale, or `None` if it is not supported.
pub fn locale_info(code: &str) -> Option<&'static LocaleConfig> {
	Locale::parse(code).map(|l| l.config())
}

pub fn is_supported(code: &str) -> bool {
	Locale::parse(code).is_some()
}

pub fn available_locales() -> &'static [LocaleConfig] {
	LOCALES
}
