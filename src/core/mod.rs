//! Core layer: authentication, the audit domain model and the services that
//! traverse the Google APIs.

pub mod auth;
pub mod models;
pub mod services;
