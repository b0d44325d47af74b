// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential submission and role routing for the civic portal client.
//!
//! - [`LoginForm`] submits credentials through an [`AuthBoundary`], saves the
//!   issued identity, and hands it to the [`RoleRouter`].
//! - [`RoleRouteTable`] is the one role to landing-page table.
//! - [`Redirector`] routes whatever identity is already persisted.

mod boundary;
mod error;
mod form;
mod router;
mod routes;

pub use boundary::{
	parse_auth_response, parse_rejection, AuthBoundary, Credentials, HttpAuthBoundary, Identifier,
	IssuedIdentity,
};
pub use error::AuthError;
pub use form::{
	FormOptions, FormStatus, LoginFailure, LoginForm, SubmitOutcome, DEFAULT_REDIRECT_DELAY,
};
pub use router::{Navigator, Redirector, RoleRouter, RouteDecision};
pub use routes::{
	Role, RoleRouteTable, ADMIN_DASHBOARD, CITIZEN_DASHBOARD, DEFAULT_ROLE, STAFF_DASHBOARD,
	SUPERVISOR_DASHBOARD,
};
