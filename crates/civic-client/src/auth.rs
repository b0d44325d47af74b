// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use civic_client_auth::{
	FormOptions, FormStatus, HttpAuthBoundary, Identifier, LoginForm, Navigator, Redirector,
	RoleRouter, RouteDecision, SubmitOutcome,
};
use civic_client_config::ClientConfig;
use civic_client_locale::LocaleController;
use civic_client_store::{clear_session_identity, load_session_identity, PreferenceStore};
use civic_common_secret::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordSource {
	/// Interactive prompt with echo turned off.
	HiddenPrompt,
	/// One line from stdin, as piped by a script.
	Stdin,
}

fn password_source(from_stdin: bool, stdin_is_terminal: bool) -> PasswordSource {
	if !from_stdin && stdin_is_terminal {
		PasswordSource::HiddenPrompt
	} else {
		PasswordSource::Stdin
	}
}

fn strip_line_ending(mut line: String) -> String {
	let len = line.trim_end_matches(['\r', '\n']).len();
	line.truncate(len);
	line
}

async fn read_password(locale: &LocaleController, from_stdin: bool) -> Result<SecretString> {
	match password_source(from_stdin, std::io::stdin().is_terminal()) {
		PasswordSource::HiddenPrompt => {
			let prompt = locale.translate("client.login.prompt_password");
			let password = tokio::task::spawn_blocking(move || rpassword::prompt_password(prompt))
				.await
				.context("password prompt task failed")?
				.context("failed to read password")?;
			Ok(SecretString::new(password))
		}
		PasswordSource::Stdin => {
			let mut line = String::new();
			BufReader::new(tokio::io::stdin())
				.read_line(&mut line)
				.await
				.context("failed to read password")?;
			Ok(SecretString::new(strip_line_ending(line)))
		}
	}
}

#[instrument(skip_all, fields(identifier = identifier.kind()))]
pub async fn login<N: Navigator>(
	config: &ClientConfig,
	store: Arc<dyn PreferenceStore>,
	navigator: N,
	locale: &LocaleController,
	identifier: Identifier,
	password_stdin: bool,
) -> Result<()> {
	let secret = read_password(locale, password_stdin).await?;

	let boundary = HttpAuthBoundary::new(
		&config.portal.base_url,
		&config.portal.login_path,
		config.auth.timeout,
	)
	.context("failed to build HTTP client")?;
	debug!(url = %boundary.login_url(), "login endpoint");

	let router = Arc::new(RoleRouter::new(navigator));
	let mut form = LoginForm::new(
		Arc::new(boundary),
		store,
		router,
		FormOptions {
			auth_timeout: config.auth.timeout,
			redirect_delay: config.auth.redirect_delay,
		},
	);
	form.set_identifier(identifier);
	form.set_secret(secret);

	let mut status = form.subscribe();
	let submit = form.submit();
	tokio::pin!(submit);

	let outcome = loop {
		tokio::select! {
			outcome = &mut submit => break outcome,
			Ok(()) = status.changed() => {
				let current = status.borrow_and_update().clone();
				match current {
					FormStatus::Submitting => eprintln!("{}", locale.translate("client.login.submitting")),
					FormStatus::Succeeded { role } => println!(
						"{}",
						locale.translate_fmt("client.login.success", &[("role", role.as_str())])
					),
					FormStatus::Idle | FormStatus::Failed(_) => {}
				}
			}
			_ = tokio::signal::ctrl_c() => bail!("login cancelled"),
		}
	};

	match outcome {
		SubmitOutcome::Succeeded { role, route } => {
			info!(role = %role, route = ?route, "login complete");
			Ok(())
		}
		SubmitOutcome::Failed(failure) => {
			eprintln!("{}", failure.render(locale.current().translations()));
			Err(anyhow!("login failed: {}", failure.message_key()))
		}
		SubmitOutcome::Ignored | SubmitOutcome::Discarded => bail!("login did not complete"),
	}
}

pub async fn logout(store: &dyn PreferenceStore, locale: &LocaleController) -> Result<()> {
	clear_session_identity(store)
		.await
		.context("failed to clear session")?;
	info!("logged out");
	println!("{}", locale.translate("client.session.logged_out"));
	Ok(())
}

pub async fn whoami(store: &dyn PreferenceStore, locale: &LocaleController) -> Result<()> {
	match load_session_identity(store)
		.await
		.context("failed to read session")?
	{
		Some(identity) => {
			println!(
				"{}",
				locale.translate_fmt("client.session.whoami", &[("role", identity.role())])
			);
			Ok(())
		}
		None => {
			eprintln!("{}", locale.translate("client.redirect.no_session"));
			bail!("no active session")
		}
	}
}

pub async fn redirect<N: Navigator>(
	store: Arc<dyn PreferenceStore>,
	navigator: N,
	locale: &LocaleController,
) -> Result<()> {
	let redirector = Redirector::new(store, Arc::new(RoleRouter::new(navigator)));
	match redirector
		.redirect()
		.await
		.context("failed to read session")?
	{
		RouteDecision::Skipped => {
			eprintln!("{}", locale.translate("client.redirect.no_session"));
			bail!("no active session")
		}
		RouteDecision::Navigated(path) | RouteDecision::AlreadyRouted(path) => {
			debug!(path = %path, "redirected");
			Ok(())
		}
	}
}
