// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Multipart decoding for course outline uploads.
//!
//! Sections arrive as indexed form fields, e.g.
//!
//! ```text
//! sections[0].courseId = 65f0...
//! sections[0].title    = Introduction
//! sections[0].order    = 1
//! sections[0].file     = <intro.pdf>
//! sections[1].title    = ...
//! ```
//!
//! Field names are matched case-insensitively.

use crate::error::{AppError, Result};
use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use std::collections::BTreeMap;

/// An uploaded file part.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Client-supplied name; only its extension is used
    pub filename: String,
    pub bytes: Bytes,
}

/// One section as submitted, before validation.
#[derive(Debug, Default)]
pub struct SectionForm {
    pub course_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<String>,
    pub file: Option<Attachment>,
    pub video: Option<Attachment>,
}

impl SectionForm {
    /// Submitted order, or 0 when missing or not an integer.
    pub fn order_value(&self) -> i32 {
        self.order
            .as_deref()
            .and_then(|o| o.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionField {
    CourseId,
    Title,
    Description,
    Order,
    File,
    Video,
}

/// Split `sections[<i>].<field>` into its index and field.
fn parse_field_name(name: &str) -> Option<(usize, SectionField)> {
    let lower = name.to_ascii_lowercase();
    let rest = lower.strip_prefix("sections[")?;
    let (index, field) = rest.split_once("].")?;
    let index = index.parse().ok()?;

    let field = match field {
        "courseid" => SectionField::CourseId,
        "title" => SectionField::Title,
        "description" => SectionField::Description,
        "order" => SectionField::Order,
        "file" => SectionField::File,
        "video" => SectionField::Video,
        _ => return None,
    };

    Some((index, field))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    AppError::BadRequest(format!("Failed to read multipart form: {}", err.body_text()))
}

/// Read every section from the form, ordered by index.
pub async fn read_sections(mut multipart: Multipart) -> Result<Vec<SectionForm>> {
    let mut sections: BTreeMap<usize, SectionForm> = BTreeMap::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        let Some((index, kind)) = parse_field_name(&name) else {
            tracing::debug!(field = %name, "Ignoring unknown form field");
            continue;
        };

        match kind {
            SectionField::File | SectionField::Video => {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                // Browsers send an empty part for an untouched file input.
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }

                let attachment = Some(Attachment { filename, bytes });
                let section = sections.entry(index).or_default();
                if kind == SectionField::File {
                    section.file = attachment;
                } else {
                    section.video = attachment;
                }
            }
            _ => {
                let value = Some(field.text().await.map_err(multipart_error)?);
                let section = sections.entry(index).or_default();
                match kind {
                    SectionField::CourseId => section.course_id = value,
                    SectionField::Title => section.title = value,
                    SectionField::Description => section.description = value,
                    _ => section.order = value,
                }
            }
        }
    }

    Ok(sections.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_name() {
        assert_eq!(
            parse_field_name("sections[0].courseId"),
            Some((0, SectionField::CourseId))
        );
        assert_eq!(
            parse_field_name("Sections[12].Title"),
            Some((12, SectionField::Title))
        );
        assert_eq!(
            parse_field_name("SECTIONS[3].VIDEO"),
            Some((3, SectionField::Video))
        );
        assert_eq!(
            parse_field_name("sections[1].description"),
            Some((1, SectionField::Description))
        );
    }

    #[test]
    fn test_parse_field_name_rejects_unknown() {
        assert_eq!(parse_field_name("title"), None);
        assert_eq!(parse_field_name("sections[].title"), None);
        assert_eq!(parse_field_name("sections[-1].title"), None);
        assert_eq!(parse_field_name("sections[0].thumbnail"), None);
        assert_eq!(parse_field_name("sections[0]title"), None);
    }

    #[test]
    fn test_order_value() {
        let mut form = SectionForm::default();
        assert_eq!(form.order_value(), 0);

        form.order = Some(" 3 ".to_string());
        assert_eq!(form.order_value(), 3);

        form.order = Some("first".to_string());
        assert_eq!(form.order_value(), 0);

        form.order = Some("-2".to_string());
        assert_eq!(form.order_value(), -2);
    }
}
