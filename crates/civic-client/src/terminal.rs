// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Navigation and presentation for a terminal session.

use std::sync::Arc;

use civic_client_auth::Navigator;
use civic_client_locale::{PresentationAttributes, PresentationEnvironment, ResetScope};
use civic_common_i18n::TranslationTable;
use tracing::{debug, warn};

/// Prints the portal page a role lands on and, when asked, opens it in the
/// default browser.
pub struct TerminalNavigator {
	base_url: String,
	open: bool,
	translations: Arc<TranslationTable>,
}

impl TerminalNavigator {
	pub fn new(base_url: &str, open: bool, translations: Arc<TranslationTable>) -> Self {
		Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			open,
			translations,
		}
	}

	pub fn page_url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

impl Navigator for TerminalNavigator {
	fn navigate(&self, path: &str) {
		let url = self.page_url(path);
		println!(
			"{}",
			self
				.translations
				.translate_fmt("client.redirect.navigating", &[("url", url.as_str())])
		);

		if self.open {
			if let Err(e) = webbrowser::open(&url) {
				warn!(url = %url, error = %e, "failed to open browser");
			}
		}
	}
}

/// A terminal has no fonts to swap; attributes are recorded in the log.
pub struct TerminalPresentation;

impl PresentationEnvironment for TerminalPresentation {
	fn apply(&self, attributes: &PresentationAttributes) {
		debug!(
			language_tag = attributes.language_tag,
			direction = %attributes.direction,
			font_family = attributes.font_family,
			"presentation attributes applied"
		);
	}

	fn reset(&self, scope: ResetScope) {
		debug!(scope = ?scope, "presentation reset");
	}
}
