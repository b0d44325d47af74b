// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The role to landing-page table shared by every redirect entry point.

use std::fmt;

/// Landing page for the general public.
pub const CITIZEN_DASHBOARD: &str = "/citizen/dashboard";
pub const SUPERVISOR_DASHBOARD: &str = "/supervisor/dashboard";
pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
/// Shared landing page for officials, representatives and moderators.
pub const STAFF_DASHBOARD: &str = "/staff/dashboard";

/// Role applied when the portal issues a token without one.
pub const DEFAULT_ROLE: Role = Role::Citizen;

/// User classes the portal issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
	Citizen,
	Supervisor,
	Admin,
	Official,
	Representative,
	Moderator,
}

impl Role {
	pub const ALL: [Role; 6] = [
		Role::Citizen,
		Role::Supervisor,
		Role::Admin,
		Role::Official,
		Role::Representative,
		Role::Moderator,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Citizen => "citizen",
			Role::Supervisor => "supervisor",
			Role::Admin => "admin",
			Role::Official => "official",
			Role::Representative => "representative",
			Role::Moderator => "moderator",
		}
	}

	/// Parse a role name, ignoring surrounding whitespace and ASCII case.
	pub fn parse(s: &str) -> Option<Role> {
		let s = s.trim();
		Role::ALL
			.into_iter()
			.find(|role| role.as_str().eq_ignore_ascii_case(s))
	}

	pub fn dashboard(&self) -> &'static str {
		match self {
			Role::Citizen => CITIZEN_DASHBOARD,
			Role::Supervisor => SUPERVISOR_DASHBOARD,
			Role::Admin => ADMIN_DASHBOARD,
			Role::Official | Role::Representative | Role::Moderator => STAFF_DASHBOARD,
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Total mapping from any role string to a landing page.
///
/// Roles outside [`Role`] land on [`RoleRouteTable::DEFAULT_PATH`], the
/// least privileged destination. There is no input without a destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleRouteTable;

impl RoleRouteTable {
	pub const DEFAULT_PATH: &'static str = CITIZEN_DASHBOARD;

	pub fn destination(role: &str) -> &'static str {
		Role::parse(role)
			.map(|r| r.dashboard())
			.unwrap_or(Self::DEFAULT_PATH)
	}

	/// Every distinct path the table can produce.
	pub fn destinations() -> &'static [&'static str] {
		&[
			CITIZEN_DASHBOARD,
			SUPERVISOR_DASHBOARD,
			ADMIN_DASHBOARD,
			STAFF_DASHBOARD,
		]
	}
}
