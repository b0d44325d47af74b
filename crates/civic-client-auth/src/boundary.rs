// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authentication call and the shapes it exchanges with the portal.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use civic_common_secret::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::AuthError;
use crate::routes::DEFAULT_ROLE;

/// How the user identifies themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
	Email(String),
	Phone(String),
}

impl Identifier {
	pub fn value(&self) -> &str {
		match self {
			Identifier::Email(v) | Identifier::Phone(v) => v,
		}
	}

	/// Field name used on the wire.
	pub fn kind(&self) -> &'static str {
		match self {
			Identifier::Email(_) => "email",
			Identifier::Phone(_) => "phone",
		}
	}

	pub fn is_blank(&self) -> bool {
		self.value().trim().is_empty()
	}
}

/// One submission's worth of input. Never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
	identifier: Identifier,
	secret: SecretString,
}

impl Credentials {
	pub fn new(identifier: Identifier, secret: SecretString) -> Self {
		Self { identifier, secret }
	}

	pub fn identifier(&self) -> &Identifier {
		&self.identifier
	}

	pub fn secret(&self) -> &SecretString {
		&self.secret
	}
}

/// A successful authentication.
///
/// `RoleDefaulted` is the portal handing out a token without saying who the
/// user is; the client then treats them as [`DEFAULT_ROLE`].
#[derive(Clone, PartialEq, Eq)]
pub enum IssuedIdentity {
	WithRole { token: SecretString, role: String },
	RoleDefaulted { token: SecretString },
}

impl IssuedIdentity {
	pub fn token(&self) -> &SecretString {
		match self {
			IssuedIdentity::WithRole { token, .. } | IssuedIdentity::RoleDefaulted { token } => token,
		}
	}

	pub fn role(&self) -> &str {
		match self {
			IssuedIdentity::WithRole { role, .. } => role,
			IssuedIdentity::RoleDefaulted { .. } => DEFAULT_ROLE.as_str(),
		}
	}

	pub fn is_role_defaulted(&self) -> bool {
		matches!(self, IssuedIdentity::RoleDefaulted { .. })
	}
}

impl fmt::Debug for IssuedIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IssuedIdentity")
			.field("token", self.token())
			.field("role", &self.role())
			.field("role_defaulted", &self.is_role_defaulted())
			.finish()
	}
}

#[async_trait]
pub trait AuthBoundary: Send + Sync {
	/// One authentication attempt. Implementations make exactly one call.
	async fn authenticate(&self, credentials: &Credentials) -> Result<IssuedIdentity, AuthError>;
}

#[derive(Serialize)]
struct LoginRequest<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	email: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	phone: Option<&'a str>,
	password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
	fn from(credentials: &'a Credentials) -> Self {
		let (email, phone) = match credentials.identifier() {
			Identifier::Email(v) => (Some(v.trim()), None),
			Identifier::Phone(v) => (None, Some(v.trim())),
		};
		Self {
			email,
			phone,
			password: credentials.secret().expose(),
		}
	}
}

#[derive(Deserialize)]
struct LoginResponse {
	token: Option<String>,
	role: Option<String>,
	user: Option<LoginUser>,
}

#[derive(Deserialize)]
struct LoginUser {
	role: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
	message: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
	value
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

/// Interpret a success-status response body.
///
/// A top-level `role` wins over `user.role`. Empty strings count as absent.
pub fn parse_auth_response(body: &str) -> Result<IssuedIdentity, AuthError> {
	let response: LoginResponse =
		serde_json::from_str(body).map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

	let token = match response.token {
		Some(token) if !token.trim().is_empty() => SecretString::new(token),
		_ => return Err(AuthError::MissingToken),
	};

	let role = non_blank(response.role).or_else(|| non_blank(response.user.and_then(|u| u.role)));

	Ok(match role {
		Some(role) => IssuedIdentity::WithRole { token, role },
		None => IssuedIdentity::RoleDefaulted { token },
	})
}

/// Interpret a non-success response. The body's `message` is kept when it
/// has one; anything else in the body is ignored.
pub fn parse_rejection(status: u16, body: &str) -> AuthError {
	let message = serde_json::from_str::<ErrorResponse>(body)
		.ok()
		.and_then(|r| non_blank(r.message));
	AuthError::Rejected { status, message }
}

/// [`AuthBoundary`] backed by the portal's JSON login endpoint.
#[derive(Debug, Clone)]
pub struct HttpAuthBoundary {
	client: reqwest::Client,
	login_url: String,
}

impl HttpAuthBoundary {
	pub fn new(base_url: &str, login_path: &str, timeout: Duration) -> Result<Self, AuthError> {
		let client = civic_common_http::new_client_with_timeout(timeout)
			.map_err(|e| AuthError::Transport(e.to_string()))?;
		Ok(Self::with_client(client, base_url, login_path))
	}

	pub fn with_client(client: reqwest::Client, base_url: &str, login_path: &str) -> Self {
		let login_url = format!(
			"{}/{}",
			base_url.trim_end_matches('/'),
			login_path.trim_start_matches('/')
		);
		Self { client, login_url }
	}

	pub fn login_url(&self) -> &str {
		&self.login_url
	}
}

#[async_trait]
impl AuthBoundary for HttpAuthBoundary {
	#[instrument(skip_all, fields(url = %self.login_url, identifier = credentials.identifier().kind()))]
	async fn authenticate(&self, credentials: &Credentials) -> Result<IssuedIdentity, AuthError> {
		let resp = self
			.client
			.post(&self.login_url)
			.json(&LoginRequest::from(credentials))
			.send()
			.await?;

		let status = resp.status();
		let body = resp.text().await?;

		if !status.is_success() {
			warn!(status = %status, "login rejected");
			return Err(parse_rejection(status.as_u16(), &body));
		}

		let issued = parse_auth_response(&body)?;
		debug!(
			role = %issued.role(),
			role_defaulted = issued.is_role_defaulted(),
			"login accepted"
		);
		Ok(issued)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_and_role() {
		let issued = parse_auth_response(r#"{"token":"abc","role":"supervisor"}"#).unwrap();
		assert_eq!(issued.token().expose(), "abc");
		assert_eq!(issued.role(), "supervisor");
		assert!(!issued.is_role_defaulted());
	}

	#[test]
	fn nested_role() {
		let issued = parse_auth_response(r#"{"token":"abc","user":{"role":"admin","id":7}}"#).unwrap();
		assert_eq!(issued.role(), "admin");
	}

	#[test]
	fn top_level_role_wins() {
		let issued =
			parse_auth_response(r#"{"token":"abc","role":"official","user":{"role":"admin"}}"#).unwrap();
		assert_eq!(issued.role(), "official");
	}

	#[test]
	fn missing_role_defaults_to_citizen() {
		let issued = parse_auth_response(r#"{"token":"abc"}"#).unwrap();
		assert!(issued.is_role_defaulted());
		assert_eq!(issued.role(), "citizen");
	}

	#[test]
	fn blank_role_counts_as_missing() {
		let issued = parse_auth_response(r#"{"token":"abc","role":"","user":{"role":" "}}"#).unwrap();
		assert!(issued.is_role_defaulted());
	}

	#[test]
	fn missing_token_is_an_error() {
		assert!(matches!(
			parse_auth_response(r#"{"role":"admin"}"#),
			Err(AuthError::MissingToken)
		));
		assert!(matches!(
			parse_auth_response(r#"{"token":"","role":"admin"}"#),
			Err(AuthError::MissingToken)
		));
	}

	#[test]
	fn garbage_is_invalid_response() {
		assert!(matches!(
			parse_auth_response("<html>"),
			Err(AuthError::InvalidResponse(_))
		));
		assert!(matches!(
			parse_auth_response(r#"{"token":42}"#),
			Err(AuthError::InvalidResponse(_))
		));
	}

	#[test]
	fn rejection_keeps_server_message() {
		match parse_rejection(401, r#"{"message":"Invalid password"}"#) {
			AuthError::Rejected { status, message } => {
				assert_eq!(status, 401);
				assert_eq!(message.as_deref(), Some("Invalid password"));
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn rejection_without_message() {
		assert!(matches!(
			parse_rejection(500, "Internal Server Error"),
			AuthError::Rejected { message: None, .. }
		));
	}

	#[test]
	fn request_body_uses_identifier_kind() {
		let creds = Credentials::new(
			Identifier::Phone(" 9876543210 ".to_string()),
			SecretString::from("pw"),
		);
		let body = serde_json::to_value(LoginRequest::from(&creds)).unwrap();
		assert_eq!(
			body,
			serde_json::json!({ "phone": "9876543210", "password": "pw" })
		);
	}

	#[test]
	fn debug_redacts_token() {
		let issued = parse_auth_response(r#"{"token":"very-secret","role":"admin"}"#).unwrap();
		let rendered = format!("{issued:?}");
		assert!(!rendered.contains("very-secret"));
		assert!(rendered.contains("admin"));
	}

	#[test]
	fn login_url_joins_cleanly() {
		let boundary = HttpAuthBoundary::with_client(
			reqwest::Client::new(),
			"http://localhost:5000/",
			"/api/auth/login",
		);
		assert_eq!(boundary.login_url(), "http://localhost:5000/api/auth/login");
	}
}
