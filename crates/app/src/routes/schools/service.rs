//! Client-side access to the schools server functions.
//!
//! Each call forwards to the matching server function and turns the
//! transported error into a [`ServiceError`] the page can act on.

use std::collections::HashMap;
use std::fmt;

use dioxus::prelude::ServerFnError;
use shared_types::{
    AppError, AppErrorKind, ExportFormat, School, SchoolFormData, SchoolsFilter,
};

/// Why a schools call failed, as far as the page is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    AuthenticationRequired(String),
    PermissionDenied(String),
    NotFound(String),
    Validation {
        message: String,
        fields: HashMap<String, String>,
    },
    Transport(String),
}

impl ServiceError {
    pub fn message(&self) -> &str {
        match self {
            ServiceError::AuthenticationRequired(m)
            | ServiceError::PermissionDenied(m)
            | ServiceError::NotFound(m)
            | ServiceError::Transport(m) => m,
            ServiceError::Validation { message, .. } => message,
        }
    }

    /// Classify the text of a server function error.
    pub fn classify(raw: &str) -> Self {
        match AppError::from_server_error(raw) {
            Some(err) => Self::from(err),
            None => ServiceError::Transport(raw.to_string()),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err.kind {
            AppErrorKind::Unauthorized => ServiceError::AuthenticationRequired(err.message),
            AppErrorKind::Forbidden => ServiceError::PermissionDenied(err.message),
            AppErrorKind::NotFound => ServiceError::NotFound(err.message),
            AppErrorKind::ValidationError => ServiceError::Validation {
                message: err.message,
                fields: err.field_errors,
            },
            _ => ServiceError::Transport(err.message),
        }
    }
}

impl From<ServerFnError> for ServiceError {
    fn from(err: ServerFnError) -> Self {
        Self::classify(&err.to_string())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ServiceError {}

pub async fn get_schools(filter: SchoolsFilter) -> Result<Vec<School>, ServiceError> {
    Ok(server::api::list_schools(filter).await?)
}

pub async fn get_school(id: String) -> Result<Option<School>, ServiceError> {
    Ok(server::api::get_school(id).await?)
}

pub async fn create_school(form: SchoolFormData) -> Result<School, ServiceError> {
    Ok(server::api::create_school(form).await?)
}

pub async fn update_school(id: String, form: SchoolFormData) -> Result<School, ServiceError> {
    Ok(server::api::update_school(id, form).await?)
}

/// Delete a school. A missing id comes back as `NotFound`.
pub async fn delete_school(id: String) -> Result<(), ServiceError> {
    if server::api::delete_school(id.clone()).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("School {} not found", id)))
    }
}

/// Download location for an export of the school list.
pub async fn export_schools(format: ExportFormat) -> Result<String, ServiceError> {
    Ok(server::api::export_schools(format).await?.url)
}
