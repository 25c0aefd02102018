// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process catalog store backed by concurrent maps.
//!
//! Mirrors the Firestore semantics the handlers rely on: insert-one,
//! find-by-field and list-all. Contents live only as long as the process.

use crate::models::{Course, CourseOutline, User};
use dashmap::DashMap;
use std::sync::Arc;

/// Document maps keyed by ID, shared across clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    courses: Arc<DashMap<String, Course>>,
    outlines: Arc<DashMap<String, CourseOutline>>,
}

impl MemoryStore {
    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone())
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn list_courses(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self.courses.iter().map(|e| e.value().clone()).collect();
        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        courses
    }

    pub fn insert_course(&self, course: Course) {
        self.courses.insert(course.id.clone(), course);
    }

    pub fn insert_outline(&self, outline: CourseOutline) {
        self.outlines.insert(outline.id.clone(), outline);
    }

    pub fn list_outlines_for_course(&self, course_id: &str) -> Vec<CourseOutline> {
        let mut outlines: Vec<CourseOutline> = self
            .outlines
            .iter()
            .filter(|e| e.course_id == course_id)
            .map(|e| e.value().clone())
            .collect();
        outlines.sort_by_key(|o| o.order);
        outlines
    }

    /// Total users stored.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Total outline sections stored, across all courses.
    pub fn outline_count(&self) -> usize {
        self.outlines.len()
    }
}
