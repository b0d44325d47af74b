// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The credential submission flow.
//!
//! A [`LoginForm`] moves through `Idle → Submitting → {Succeeded, Failed}`.
//! Only one submission is in flight at a time; extra submits are ignored,
//! not queued. Every failure is caught here and turned into a
//! [`FormStatus::Failed`] carrying a [`LoginFailure`], after which the form
//! accepts a new submission.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use civic_client_store::{save_session_identity, PreferenceStore, SessionIdentity};
use civic_common_i18n::TranslationTable;
use civic_common_secret::SecretString;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::boundary::{AuthBoundary, Credentials, Identifier};
use crate::error::AuthError;
use crate::router::{Navigator, RoleRouter, RouteDecision};

/// Pause between showing the success message and navigating.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOptions {
	/// Upper bound on the authentication call.
	pub auth_timeout: Duration,
	pub redirect_delay: Duration,
}

impl Default for FormOptions {
	fn default() -> Self {
		Self {
			auth_timeout: civic_common_http::DEFAULT_TIMEOUT,
			redirect_delay: DEFAULT_REDIRECT_DELAY,
		}
	}
}

/// User-visible failure categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
	/// The portal refused the credentials. `message` is its own wording when
	/// it sent one.
	Rejected { message: Option<String> },
	MissingToken,
	InvalidResponse,
	Transport,
	Timeout,
	MissingInput,
	/// Authentication succeeded but the session could not be saved.
	Storage,
}

impl LoginFailure {
	pub fn message_key(&self) -> &'static str {
		match self {
			LoginFailure::Rejected { message: Some(_) } => "client.login.error.rejected",
			LoginFailure::Rejected { message: None } => "client.login.error.rejected_generic",
			LoginFailure::MissingToken => "client.login.error.missing_token",
			LoginFailure::InvalidResponse => "client.login.error.invalid_response",
			LoginFailure::Transport => "client.login.error.network",
			LoginFailure::Timeout => "client.login.error.timeout",
			LoginFailure::MissingInput => "client.login.error.missing_input",
			LoginFailure::Storage => "client.login.error.storage",
		}
	}

	/// The failure as text in the given translations.
	pub fn render(&self, translations: &TranslationTable) -> String {
		match self {
			LoginFailure::Rejected {
				message: Some(message),
			} => translations.translate_fmt(self.message_key(), &[("message", message.as_str())]),
			_ => translations.translate(self.message_key()),
		}
	}
}

impl From<AuthError> for LoginFailure {
	fn from(e: AuthError) -> Self {
		match e {
			AuthError::Rejected { message, .. } => LoginFailure::Rejected { message },
			AuthError::MissingToken => LoginFailure::MissingToken,
			AuthError::InvalidResponse(_) => LoginFailure::InvalidResponse,
			AuthError::Transport(_) => LoginFailure::Transport,
			AuthError::Timeout => LoginFailure::Timeout,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
	Idle,
	Submitting,
	Succeeded { role: String },
	Failed(LoginFailure),
}

/// What one call to [`LoginForm::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
	/// Another submission was already in flight. Nothing was sent.
	Ignored,
	/// The form was unmounted before the response arrived. Nothing changed.
	Discarded,
	Failed(LoginFailure),
	/// The identity was saved. `route` is `None` when the form was unmounted
	/// during the redirect delay.
	Succeeded {
		role: String,
		route: Option<RouteDecision>,
	},
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

/// The login form. The sole writer of the persisted session identity.
pub struct LoginForm<N> {
	boundary: Arc<dyn AuthBoundary>,
	store: Arc<dyn PreferenceStore>,
	router: Arc<RoleRouter<N>>,
	options: FormOptions,
	identifier: Option<Identifier>,
	secret: Option<SecretString>,
	in_flight: AtomicBool,
	status: watch::Sender<FormStatus>,
	mounted: CancellationToken,
}

impl<N: Navigator> LoginForm<N> {
	pub fn new(
		boundary: Arc<dyn AuthBoundary>,
		store: Arc<dyn PreferenceStore>,
		router: Arc<RoleRouter<N>>,
		options: FormOptions,
	) -> Self {
		let (status, _) = watch::channel(FormStatus::Idle);
		Self {
			boundary,
			store,
			router,
			options,
			identifier: None,
			secret: None,
			in_flight: AtomicBool::new(false),
			status,
			mounted: CancellationToken::new(),
		}
	}

	pub fn status(&self) -> FormStatus {
		self.status.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
		self.status.subscribe()
	}

	pub fn set_identifier(&mut self, identifier: Identifier) {
		self.identifier = Some(identifier);
		self.clear_message();
	}

	pub fn set_secret(&mut self, secret: SecretString) {
		self.secret = Some(secret);
		self.clear_message();
	}

	fn clear_message(&self) {
		self.status.send_if_modified(|status| {
			if matches!(status, FormStatus::Idle | FormStatus::Submitting) {
				return false;
			}
			*status = FormStatus::Idle;
			true
		});
	}

	/// Detach the form. A response still in flight is discarded and a pending
	/// redirect is abandoned.
	pub fn unmount(&self) {
		debug!("login form unmounted");
		self.mounted.cancel();
	}

	pub fn is_mounted(&self) -> bool {
		!self.mounted.is_cancelled()
	}

	fn credentials(&self) -> Option<Credentials> {
		let identifier = self.identifier.as_ref().filter(|i| !i.is_blank())?;
		let secret = self.secret.as_ref().filter(|s| !s.expose().is_empty())?;
		Some(Credentials::new(identifier.clone(), secret.clone()))
	}

	fn fail(&self, failure: LoginFailure) -> SubmitOutcome {
		warn!(failure = ?failure, "login failed");
		self.status.send_replace(FormStatus::Failed(failure.clone()));
		SubmitOutcome::Failed(failure)
	}

	#[instrument(skip_all)]
	pub async fn submit(&self) -> SubmitOutcome {
		if !self.is_mounted() {
			return SubmitOutcome::Discarded;
		}
		if self
			.in_flight
			.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
			.is_err()
		{
			debug!("submission already in flight, ignoring");
			return SubmitOutcome::Ignored;
		}
		let _in_flight = InFlight(&self.in_flight);

		let Some(credentials) = self.credentials() else {
			return self.fail(LoginFailure::MissingInput);
		};

		self.status.send_replace(FormStatus::Submitting);
		debug!(identifier = credentials.identifier().kind(), "submitting credentials");

		let result = tokio::time::timeout(
			self.options.auth_timeout,
			self.boundary.authenticate(&credentials),
		)
		.await;

		if !self.is_mounted() {
			debug!("response arrived after unmount, discarding");
			return SubmitOutcome::Discarded;
		}

		let issued = match result {
			Ok(Ok(issued)) => issued,
			Ok(Err(e)) => return self.fail(e.into()),
			Err(_) => return self.fail(LoginFailure::Timeout),
		};

		let Some(identity) = SessionIdentity::new(issued.token().clone(), issued.role()) else {
			return self.fail(LoginFailure::MissingToken);
		};

		if let Err(e) = save_session_identity(&*self.store, &identity).await {
			warn!(error = %e, "failed to persist session identity");
			return self.fail(LoginFailure::Storage);
		}

		let role = identity.role().to_string();
		self.status.send_replace(FormStatus::Succeeded { role: role.clone() });
		info!(
			role = %role,
			role_defaulted = issued.is_role_defaulted(),
			"login succeeded"
		);

		tokio::select! {
			_ = self.mounted.cancelled() => {
				debug!("unmounted during redirect delay, not navigating");
				return SubmitOutcome::Succeeded { role, route: None };
			}
			_ = tokio::time::sleep(self.options.redirect_delay) => {}
		}

		let decision = self
			.router
			.route(Some(identity.role()), Some(identity.token().expose()));
		SubmitOutcome::Succeeded {
			role,
			route: Some(decision),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use civic_client_store::{load_session_identity, MemoryStore};
	use civic_common_i18n::{translation_table, Locale};
	use std::sync::Mutex;

	use crate::boundary::IssuedIdentity;

	#[derive(Default)]
	struct Recording {
		paths: Mutex<Vec<String>>,
	}

	impl Navigator for Recording {
		fn navigate(&self, path: &str) {
			self.paths.lock().unwrap().push(path.to_string());
		}
	}

	struct Fixed(fn() -> Result<IssuedIdentity, AuthError>);

	#[async_trait]
	impl AuthBoundary for Fixed {
		async fn authenticate(&self, _credentials: &Credentials) -> Result<IssuedIdentity, AuthError> {
			(self.0)()
		}
	}

	fn options() -> FormOptions {
		FormOptions {
			auth_timeout: Duration::from_secs(5),
			redirect_delay: Duration::from_millis(1),
		}
	}

	fn form(boundary: Fixed) -> (LoginForm<Recording>, Arc<MemoryStore>) {
		let store = Arc::new(MemoryStore::new());
		let router = Arc::new(RoleRouter::new(Recording::default()));
		let mut form = LoginForm::new(Arc::new(boundary), store.clone(), router, options());
		form.set_identifier(Identifier::Email("a@example.org".to_string()));
		form.set_secret(SecretString::from("pw"));
		(form, store)
	}

	#[tokio::test]
	async fn missing_input_fails_locally() {
		let store = Arc::new(MemoryStore::new());
		let router = Arc::new(RoleRouter::new(Recording::default()));
		let mut form = LoginForm::new(
			Arc::new(Fixed(|| panic!("must not be called"))),
			store,
			router,
			options(),
		);
		form.set_identifier(Identifier::Email("  ".to_string()));
		form.set_secret(SecretString::from("pw"));

		assert_eq!(
			form.submit().await,
			SubmitOutcome::Failed(LoginFailure::MissingInput)
		);
	}

	#[tokio::test]
	async fn input_change_clears_failure() {
		let (mut form, _) = form(Fixed(|| Err(AuthError::Transport("down".into()))));
		form.submit().await;
		assert_eq!(form.status(), FormStatus::Failed(LoginFailure::Transport));

		form.set_secret(SecretString::from("pw2"));
		assert_eq!(form.status(), FormStatus::Idle);
	}

	#[tokio::test]
	async fn failure_allows_retry() {
		let (form, _) = form(Fixed(|| Err(AuthError::Timeout)));
		assert_eq!(form.submit().await, SubmitOutcome::Failed(LoginFailure::Timeout));
		assert_eq!(form.submit().await, SubmitOutcome::Failed(LoginFailure::Timeout));
	}

	#[tokio::test]
	async fn success_saves_and_routes() {
		let (form, store) = form(Fixed(|| {
			Ok(IssuedIdentity::WithRole {
				token: SecretString::from("abc"),
				role: "admin".to_string(),
			})
		}));

		assert_eq!(
			form.submit().await,
			SubmitOutcome::Succeeded {
				role: "admin".to_string(),
				route: Some(RouteDecision::Navigated("/admin/dashboard")),
			}
		);
		let identity = load_session_identity(&*store).await.unwrap().unwrap();
		assert_eq!(identity.role(), "admin");
		assert_eq!(form.status(), FormStatus::Succeeded { role: "admin".to_string() });
	}

	#[test]
	fn every_failure_has_its_own_message() {
		let failures = [
			LoginFailure::Rejected {
				message: Some("nope".to_string()),
			},
			LoginFailure::Rejected { message: None },
			LoginFailure::MissingToken,
			LoginFailure::InvalidResponse,
			LoginFailure::Transport,
			LoginFailure::Timeout,
			LoginFailure::MissingInput,
			LoginFailure::Storage,
		];
		let en = translation_table(Locale::En);
		let rendered: Vec<String> = failures.iter().map(|f| f.render(&en)).collect();
		for (i, text) in rendered.iter().enumerate() {
			assert!(!text.starts_with("client."), "untranslated: {text}");
			assert!(!rendered[i + 1..].contains(text));
		}
		assert!(rendered[0].contains("nope"));
	}

	#[test]
	fn auth_errors_map_to_categories() {
		assert_eq!(
			LoginFailure::from(AuthError::Rejected {
				status: 401,
				message: None
			}),
			LoginFailure::Rejected { message: None }
		);
		assert_eq!(
			LoginFailure::from(AuthError::InvalidResponse("x".into())),
			LoginFailure::InvalidResponse
		);
		assert_eq!(LoginFailure::from(AuthError::MissingToken), LoginFailure::MissingToken);
	}
}
