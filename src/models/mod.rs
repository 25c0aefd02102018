// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod course;
pub mod user;

pub use course::{Course, CourseOutline};
pub use user::User;

use chrono::{SecondsFormat, Utc};

/// Current UTC time as RFC3339 with a `Z` suffix.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
