// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use civic_client_config::ClientConfig;
use civic_client_locale::{LocaleController, LocaleError};
use civic_client_store::PreferenceStore;
use civic_common_i18n::{available_locales, environment_signal};

use crate::terminal::TerminalPresentation;

/// The operating system's language, if it is one we support.
pub fn environment_locale() -> Option<&'static str> {
	let tag = sys_locale::get_locale()?;
	environment_signal(&tag).map(|locale| locale.code())
}

pub async fn init_session(store: Arc<dyn PreferenceStore>, config: &ClientConfig) -> LocaleController {
	LocaleController::init(
		store,
		environment_locale(),
		Arc::new(TerminalPresentation),
		config.locale.preference_timeout,
	)
	.await
}

pub fn show(locale: &LocaleController) {
	let session = locale.current();
	let config = session.config();
	println!(
		"{}",
		session.translate_fmt(
			"client.locale.current",
			&[("name", config.native_name), ("code", config.code)]
		)
	);
}

pub fn list(locale: &LocaleController) {
	let current = locale.locale().code();
	for config in available_locales() {
		let marker = if config.code == current { "*" } else { " " };
		println!(
			"{marker} {:<3} {:<10} {}",
			config.code, config.name, config.native_name
		);
	}
}

pub async fn set(locale: &mut LocaleController, code: &str) -> Result<()> {
	match locale.set_locale(code).await {
		Ok(session) => {
			println!(
				"{}",
				session.translate_fmt(
					"client.locale.changed",
					&[("name", session.config().native_name)]
				)
			);
			Ok(())
		}
		Err(LocaleError::Unsupported { code }) => {
			eprintln!(
				"{}",
				locale.translate_fmt("client.locale.unsupported", &[("code", code.as_str())])
			);
			bail!("unsupported locale: {code}")
		}
		Err(e) => Err(e).context("failed to change locale"),
	}
}
