//! Clubhouse Sports Club Management System
//!
//! A Rust REST JSON API mediating all reads and writes between the club's
//! admin UI and the relational store: students, payments, equipment
//! inventory, trainings, attendance, user accounts and activity logs.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
