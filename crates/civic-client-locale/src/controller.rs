// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The locale session controller.

use std::sync::Arc;
use std::time::Duration;

use civic_client_store::{load_preferred_locale, save_preferred_locale, PreferenceStore};
use civic_common_i18n::{resolve_locale, Direction, Locale};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::error::LocaleError;
use crate::presentation::{PresentationEnvironment, ResetScope};
use crate::session::LocaleSession;

/// Upper bound on the startup preference read when none is configured.
pub const DEFAULT_PREFERENCE_TIMEOUT: Duration = Duration::from_secs(2);

/// Owner of the current [`LocaleSession`].
///
/// A controller only exists after the first apply has completed, so nothing
/// can render against an undetermined locale. [`set_locale`] takes
/// `&mut self`: the owner is the only writer, everyone else reads through
/// [`current`] or a [`subscribe`] receiver.
///
/// [`set_locale`]: LocaleController::set_locale
/// [`current`]: LocaleController::current
/// [`subscribe`]: LocaleController::subscribe
pub struct LocaleController {
	store: Arc<dyn PreferenceStore>,
	presentation: Arc<dyn PresentationEnvironment>,
	state: watch::Sender<LocaleSession>,
}

impl std::fmt::Debug for LocaleController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LocaleController")
			.field("store", &self.store)
			.field("current", &*self.state.borrow())
			.finish()
	}
}

impl LocaleController {
	/// Resolve the startup locale and apply it.
	///
	/// The persisted preference is read with `preference_timeout`; a missing,
	/// unreadable or slow read counts as no preference.
	#[instrument(skip_all, fields(environment = ?environment))]
	pub async fn init(
		store: Arc<dyn PreferenceStore>,
		environment: Option<&str>,
		presentation: Arc<dyn PresentationEnvironment>,
		preference_timeout: Duration,
	) -> Self {
		let persisted = match tokio::time::timeout(preference_timeout, load_preferred_locale(&*store)).await
		{
			Ok(Ok(code)) => code,
			Ok(Err(e)) => {
				warn!(error = %e, "failed to read locale preference, ignoring");
				None
			}
			Err(_) => {
				warn!(
					timeout_ms = preference_timeout.as_millis() as u64,
					"locale preference read timed out, ignoring"
				);
				None
			}
		};

		let locale = resolve_locale(persisted.as_deref(), environment);
		let session = LocaleSession::new(locale, 0);
		presentation.apply(&session.attributes());

		info!(
			locale = %locale,
			persisted = ?persisted,
			direction = %session.direction(),
			"locale session initialized"
		);

		let (state, _) = watch::channel(session);
		Self {
			store,
			presentation,
			state,
		}
	}

	/// Snapshot of the current session.
	pub fn current(&self) -> LocaleSession {
		self.state.borrow().clone()
	}

	pub fn locale(&self) -> Locale {
		self.state.borrow().locale()
	}

	pub fn direction(&self) -> Direction {
		self.state.borrow().direction()
	}

	pub fn font_family(&self) -> &'static str {
		self.state.borrow().font_family()
	}

	pub fn translate(&self, key: &str) -> String {
		self.state.borrow().translate(key)
	}

	pub fn translate_fmt(&self, key: &str, args: &[(&str, &str)]) -> String {
		self.state.borrow().translate_fmt(key, args)
	}

	/// Receiver notified with every published session.
	pub fn subscribe(&self) -> watch::Receiver<LocaleSession> {
		self.state.subscribe()
	}

	/// Switch to `code`.
	///
	/// The preference is persisted before anything else changes. Setting the
	/// current locale again only re-persists it; the session is untouched.
	/// Otherwise the new session is applied to the presentation environment,
	/// published, and followed by one re-render pass.
	#[instrument(skip(self))]
	pub async fn set_locale(&mut self, code: &str) -> Result<LocaleSession, LocaleError> {
		let locale = Locale::parse(code).ok_or_else(|| {
			warn!("rejected unsupported locale");
			LocaleError::Unsupported {
				code: code.to_string(),
			}
		})?;

		save_preferred_locale(&*self.store, locale.code()).await?;

		let previous = self.current();
		if previous.locale() == locale {
			debug!(locale = %locale, "locale unchanged");
			return Ok(previous);
		}

		let next = LocaleSession::new(locale, previous.generation() + 1);
		let scope = ResetScope::between(&previous.attributes(), &next.attributes());

		self.presentation.apply(&next.attributes());
		self.state.send_replace(next.clone());
		self.presentation.reset(scope);

		info!(
			from = %previous.locale(),
			to = %locale,
			generation = next.generation(),
			scope = ?scope,
			"locale changed"
		);
		Ok(next)
	}
}
