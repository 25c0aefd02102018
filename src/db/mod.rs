//! Database layer (Firestore, with an in-memory stand-in).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreStore;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Course, CourseOutline, User};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "Users";
    pub const COURSES: &str = "Courses";
    pub const COURSE_OUTLINES: &str = "CourseOutlines";
}

/// Generate a new document ID.
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Catalog database handle shared by all handlers.
///
/// Every operation is a single find or insert; nothing here is transactional.
#[derive(Clone)]
pub enum CatalogDb {
    Firestore(FirestoreStore),
    Memory(MemoryStore),
}

impl CatalogDb {
    /// Connect to Firestore.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, database_id: &str) -> Result<Self, AppError> {
        Ok(Self::Firestore(
            FirestoreStore::new(project_id, database_id).await?,
        ))
    }

    /// Create an empty in-process database for tests.
    pub fn new_in_memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    // ─── Users ───────────────────────────────────────────────────

    /// Find a user by exact email match.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        match self {
            Self::Firestore(store) => store.find_user_by_email(email).await,
            Self::Memory(store) => Ok(store.find_user_by_email(email)),
        }
    }

    /// Insert a new user, assigning its ID.
    pub async fn create_user(&self, mut user: User) -> Result<User, AppError> {
        user.id = new_document_id();
        match self {
            Self::Firestore(store) => store.insert(collections::USERS, &user.id, &user).await?,
            Self::Memory(store) => store.insert_user(user.clone()),
        }
        Ok(user)
    }

    // ─── Courses ─────────────────────────────────────────────────

    /// List every course.
    pub async fn list_courses(&self) -> Result<Vec<Course>, AppError> {
        match self {
            Self::Firestore(store) => store.list_courses().await,
            Self::Memory(store) => Ok(store.list_courses()),
        }
    }

    /// Insert a new course, assigning its ID.
    pub async fn create_course(&self, mut course: Course) -> Result<Course, AppError> {
        course.id = new_document_id();
        match self {
            Self::Firestore(store) => {
                store
                    .insert(collections::COURSES, &course.id, &course)
                    .await?
            }
            Self::Memory(store) => store.insert_course(course.clone()),
        }
        Ok(course)
    }

    // ─── Course Outlines ─────────────────────────────────────────

    /// Insert one outline section, assigning its ID.
    pub async fn create_course_outline(
        &self,
        mut outline: CourseOutline,
    ) -> Result<CourseOutline, AppError> {
        outline.id = new_document_id();
        match self {
            Self::Firestore(store) => {
                store
                    .insert(collections::COURSE_OUTLINES, &outline.id, &outline)
                    .await?
            }
            Self::Memory(store) => store.insert_outline(outline.clone()),
        }
        Ok(outline)
    }

    /// Outline sections for a course, sorted by `order`.
    pub async fn list_outlines_for_course(
        &self,
        course_id: &str,
    ) -> Result<Vec<CourseOutline>, AppError> {
        match self {
            Self::Firestore(store) => store.list_outlines_for_course(course_id).await,
            Self::Memory(store) => Ok(store.list_outlines_for_course(course_id)),
        }
    }
}
