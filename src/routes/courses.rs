// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Course catalog routes (require authentication).

use super::outline_form::{read_sections, Attachment, SectionForm};
use super::{body_or_default, non_blank};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{now_rfc3339, Course, CourseOutline};
use crate::services::uploads::AttachmentKind;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Course routes. The auth middleware is applied in routes/mod.rs.
pub fn routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/CourseOutline",
            post(create_course_outline).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

// ─── Courses ─────────────────────────────────────────────────

/// List all courses.
async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Course>>> {
    Ok(Json(state.db.list_courses().await?))
}

/// Course creation body. Missing keys are treated as blank.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateCourseResponse {
    pub message: String,
    pub course_id: String,
}

/// Create a course.
async fn create_course(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CourseRequest>, JsonRejection>,
) -> Result<Json<CreateCourseResponse>> {
    let request = body_or_default(payload);

    let (Some(title), Some(description), Some(category), Some(level)) = (
        non_blank(&request.title),
        non_blank(&request.description),
        non_blank(&request.category),
        non_blank(&request.level),
    ) else {
        return Err(AppError::BadRequest(
            "All required fields must be provided.".to_string(),
        ));
    };

    let course = state
        .db
        .create_course(Course {
            id: String::new(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            level: level.to_string(),
            thumbnail_url: non_blank(&request.thumbnail_url).map(str::to_string),
            created_at: now_rfc3339(),
        })
        .await?;

    tracing::info!(
        course_id = %course.id,
        created_by = %user.email,
        creator_name = %user.name,
        token_id = %user.token_id,
        "Course created"
    );

    Ok(Json(CreateCourseResponse {
        message: "Course info added successfully!".to_string(),
        course_id: course.id,
    }))
}

// ─── Course Outline ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CourseOutlineResponse {
    pub message: String,
    pub outline_ids: Vec<String>,
}

/// An attachment that passed the allow-list, with its normalized extension.
#[derive(Debug)]
struct AcceptedAttachment {
    extension: String,
    bytes: axum::body::Bytes,
}

/// A section that passed validation and is ready to persist.
#[derive(Debug)]
struct ValidSection {
    course_id: String,
    title: String,
    description: Option<String>,
    order: i32,
    file: Option<AcceptedAttachment>,
    video: Option<AcceptedAttachment>,
}

fn accept_attachment(
    kind: AttachmentKind,
    attachment: Option<Attachment>,
    section_title: &str,
) -> Result<Option<AcceptedAttachment>> {
    attachment
        .map(|a| {
            kind.allowed_extension(&a.filename)
                .map(|extension| AcceptedAttachment {
                    extension,
                    bytes: a.bytes,
                })
                .ok_or_else(|| AppError::BadRequest(kind.rejection_message(section_title)))
        })
        .transpose()
}

fn validate_section(form: SectionForm) -> Result<ValidSection> {
    let order = form.order_value();

    let (Some(course_id), Some(title)) = (non_blank(&form.course_id), non_blank(&form.title))
    else {
        return Err(invalid_section(&form, order));
    };
    if order <= 0 {
        return Err(invalid_section(&form, order));
    }

    let course_id = course_id.to_string();
    let title = title.to_string();
    let description = non_blank(&form.description).map(str::to_string);

    Ok(ValidSection {
        file: accept_attachment(AttachmentKind::Document, form.file, &title)?,
        video: accept_attachment(AttachmentKind::Video, form.video, &title)?,
        course_id,
        title,
        description,
        order,
    })
}

fn invalid_section(form: &SectionForm, order: i32) -> AppError {
    AppError::BadRequest(format!(
        "Invalid section data: CourseId: {}, Title: {}, Order: {}. \
         All must be provided and Order must be a positive number.",
        form.course_id.as_deref().unwrap_or(""),
        form.title.as_deref().unwrap_or(""),
        order
    ))
}

/// Upload outline sections with optional document and video attachments.
///
/// All sections are validated before anything is written, so a rejected
/// request leaves no files or records behind. Store or disk failures during
/// the write phase are not rolled back.
async fn create_course_outline(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<CourseOutlineResponse>> {
    let forms = read_sections(multipart).await?;
    if forms.is_empty() {
        return Err(AppError::BadRequest(
            "At least one section is required.".to_string(),
        ));
    }

    let sections = forms
        .into_iter()
        .map(validate_section)
        .collect::<Result<Vec<_>>>()?;

    let mut outline_ids = Vec::with_capacity(sections.len());
    for section in sections {
        let file_url = match &section.file {
            Some(file) => Some(
                state
                    .uploads
                    .save(AttachmentKind::Document, &file.extension, &file.bytes)
                    .await?,
            ),
            None => None,
        };
        let video_url = match &section.video {
            Some(video) => Some(
                state
                    .uploads
                    .save(AttachmentKind::Video, &video.extension, &video.bytes)
                    .await?,
            ),
            None => None,
        };

        let outline = state
            .db
            .create_course_outline(CourseOutline {
                id: String::new(),
                course_id: section.course_id,
                title: section.title,
                description: section.description,
                file_url,
                video_url,
                order: section.order,
                created_at: now_rfc3339(),
            })
            .await?;

        tracing::debug!(
            outline_id = %outline.id,
            course_id = %outline.course_id,
            order = outline.order,
            "Course outline section stored"
        );
        outline_ids.push(outline.id);
    }

    tracing::info!(sections = outline_ids.len(), "Course outline uploaded");

    Ok(Json(CourseOutlineResponse {
        message: "Course outline uploaded successfully!".to_string(),
        outline_ids,
    }))
}
