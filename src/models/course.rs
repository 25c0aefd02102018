// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Course and course outline models for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Course metadata stored in the `Courses` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Course {
    /// Document ID, assigned by the store on insert
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub level: String,
    pub thumbnail_url: Option<String>,
    pub created_at: String,
}

/// One section of a course outline, stored in `CourseOutlines`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourseOutline {
    /// Document ID, assigned by the store on insert
    #[serde(default)]
    pub id: String,
    /// Owning course (not checked against `Courses`)
    pub course_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Public path of the attached document, e.g. `/api/Uploads/Files/<name>.pdf`
    pub file_url: Option<String>,
    /// Public path of the attached video
    pub video_url: Option<String>,
    /// Position hint within the course, always positive
    pub order: i32,
    pub created_at: String,
}
