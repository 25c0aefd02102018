// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod password;
pub mod uploads;

pub use password::{dummy_hash, hash_password, verify_password, PasswordError};
pub use uploads::{AttachmentKind, UploadStore};
