// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it. Without it they are skipped.

use devatlas_api::models::{now_rfc3339, Course, CourseOutline, User};

mod common;
use common::test_db;

/// Unique suffix for test isolation against a shared emulator.
fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[tokio::test]
async fn test_user_insert_and_find_by_email() {
    require_emulator!();

    let db = test_db().await;
    let email = format!("{}@example.com", unique_suffix());

    assert!(db.find_user_by_email(&email).await.unwrap().is_none());

    let created = db
        .create_user(User {
            id: String::new(),
            firstname: "Test".to_string(),
            lastname: "User".to_string(),
            email: email.clone(),
            password_hash: "pbkdf2-sha256$1000$AAAA$AAAA".to_string(),
            created_at: now_rfc3339(),
        })
        .await
        .unwrap();
    assert!(!created.id.is_empty());

    let fetched = db
        .find_user_by_email(&email)
        .await
        .unwrap()
        .expect("User should exist after creation");
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.firstname, "Test");
    assert_eq!(fetched.password_hash, created.password_hash);

    println!("✓ User created and found: {}", email);
}

#[tokio::test]
async fn test_course_insert_and_list() {
    require_emulator!();

    let db = test_db().await;
    let title = format!("Course {}", unique_suffix());

    let created = db
        .create_course(Course {
            id: String::new(),
            title: title.clone(),
            description: "Description".to_string(),
            category: "Programming".to_string(),
            level: "Beginner".to_string(),
            thumbnail_url: None,
            created_at: now_rfc3339(),
        })
        .await
        .unwrap();

    let courses = db.list_courses().await.unwrap();
    let found = courses
        .iter()
        .find(|c| c.id == created.id)
        .expect("Course should be listed");
    assert_eq!(found.title, title);
    assert!(found.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_outlines_listed_by_course_in_order() {
    require_emulator!();

    let db = test_db().await;
    let course_id = unique_suffix();

    for (order, title) in [(2, "Second"), (1, "First")] {
        db.create_course_outline(CourseOutline {
            id: String::new(),
            course_id: course_id.clone(),
            title: title.to_string(),
            description: None,
            file_url: Some("/api/Uploads/Files/x.pdf".to_string()),
            video_url: None,
            order,
            created_at: now_rfc3339(),
        })
        .await
        .unwrap();
    }

    let outlines = db.list_outlines_for_course(&course_id).await.unwrap();
    let titles: Vec<&str> = outlines.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
