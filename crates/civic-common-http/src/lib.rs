// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for the civic portal client.
//!
//! Every outbound request goes through a client built here so the portal sees
//! a consistent User-Agent and no call can wait forever.

mod client;

pub use client::{builder, new_client_with_timeout, user_agent, DEFAULT_TIMEOUT};
