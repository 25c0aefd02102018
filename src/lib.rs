// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! DevAtlas: course catalog backend
//!
//! This crate provides the HTTP API for account signup/login, course
//! metadata, and course outline uploads (documents and videos).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::CatalogDb;
use services::UploadStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: CatalogDb,
    pub uploads: UploadStore,
}
