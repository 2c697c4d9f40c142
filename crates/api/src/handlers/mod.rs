//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod fabricator;
pub mod project;
