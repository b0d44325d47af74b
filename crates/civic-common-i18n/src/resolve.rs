// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::{Locale, DEFAULT_LOCALE};

/// Resolve the effective locale from a persisted preference and an
/// environment signal.
///
/// Resolution order (highest to lowest priority):
/// 1. Persisted preference (if supported)
/// 2. Environment signal, e.g. the OS locale or `Accept-Language` (if supported)
/// 3. [`DEFAULT_LOCALE`]
///
/// Pure and total: the same inputs always give the same locale.
///
/// # Example
///
/// ```
/// use civic_common_i18n::{resolve_locale, Locale};
///
/// assert_eq!(resolve_locale(Some("ta"), Some("hi")), Locale::Ta);
/// assert_eq!(resolve_locale(None, Some("hi")), Locale::Hi);
/// assert_eq!(resolve_locale(None, None), Locale::En);
/// ```
pub fn resolve_locale(persisted: Option<&str>, environment: Option<&str>) -> Locale {
	if let Some(locale) = persisted.and_then(Locale::parse) {
		return locale;
	}

	if let Some(locale) = environment.and_then(Locale::parse) {
		return locale;
	}

	DEFAULT_LOCALE
}

/// Normalize an OS locale tag (`ta_IN.UTF-8`, `hi-IN`, `mr@latin`) to a
/// supported locale.
///
/// `C` and `POSIX` carry no language preference and yield `None`.
pub fn environment_signal(tag: &str) -> Option<Locale> {
	let tag = tag.trim();
	let tag = tag.split(['.', '@']).next().unwrap_or(tag);
	if tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
		return None;
	}
	let language = tag.split(['_', '-']).next()?;
	Locale::parse(language)
}

/// Pick the best supported locale from an `Accept-Language` style list.
///
/// Entries are ordered by quality value; ties keep header order. Entries
/// with `q=0`, a malformed `q`, or the `*` wildcard are skipped.
pub fn negotiate_accept_language(header: &str) -> Option<Locale> {
	let mut candidates: Vec<(f32, Locale)> = header
		.split(',')
		.filter_map(|entry| {
			let mut parts = entry.split(';');
			let tag = parts.next()?.trim();
			if tag.is_empty() || tag == "*" {
				return None;
			}

			let mut quality = 1.0_f32;
			for param in parts {
				let param = param.trim();
				if let Some(q) = param.strip_prefix("q=") {
					quality = q.trim().parse().ok()?;
				}
			}
			if !(quality > 0.0 && quality <= 1.0) {
				return None;
			}

			environment_signal(tag).map(|locale| (quality, locale))
		})
		.collect();

	// sort_by is stable, so equal weights keep header order
	candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
	candidates.first().map(|(_, locale)| *locale)
}
