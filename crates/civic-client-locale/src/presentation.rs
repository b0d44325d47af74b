// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Boundary to the ambient rendering context.

use civic_common_i18n::{Direction, LocaleConfig};

/// The three global attributes a locale pushes to the rendering context.
/// Last writer wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationAttributes {
	pub language_tag: &'static str,
	pub direction: Direction,
	pub font_family: &'static str,
}

impl From<&LocaleConfig> for PresentationAttributes {
	fn from(config: &LocaleConfig) -> Self {
		Self {
			language_tag: config.language_tag,
			direction: config.direction,
			font_family: config.font_family,
		}
	}
}

/// Which locale-dependent subtrees a re-render pass must rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
	/// Only translated text changed; fonts and direction are the same.
	Translations,
	/// Font family or direction changed as well.
	FontsAndTranslations,
}

impl ResetScope {
	pub fn between(previous: &PresentationAttributes, next: &PresentationAttributes) -> Self {
		if previous.font_family != next.font_family || previous.direction != next.direction {
			ResetScope::FontsAndTranslations
		} else {
			ResetScope::Translations
		}
	}
}

/// The rendering context the locale session drives.
pub trait PresentationEnvironment: Send + Sync {
	/// Push language tag, direction and font family.
	fn apply(&self, attributes: &PresentationAttributes);

	/// Run one deterministic re-render pass over the subtrees named by
	/// `scope`. Called once per effective locale change, after the new
	/// session has been published.
	fn reset(&self, scope: ResetScope);
}
