use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => {
                let friendly = if db_err.message().contains("email") {
                    "A record with this email already exists"
                } else {
                    "A record with this value already exists"
                };
                AppError::conflict(friendly)
            }
            // insufficient_privilege, raised by row-level security policies
            Some("42501") => AppError::forbidden(db_err.message().to_string()),
            // check_violation
            Some("23514") => AppError::bad_request(db_err.message().to_string()),
            _ => AppError::operation_failed(db_err.message()),
        },
        _ => AppError::operation_failed(&err),
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{AppErrorKind, SchoolFormData};

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err = sqlx_to_app_error(sqlx::Error::RowNotFound);
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[test]
    fn pool_timeout_is_an_operation_failure() {
        let err = sqlx_to_app_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, AppErrorKind::DatabaseError);
        assert!(err.message.starts_with("operation failed: "));
    }

    #[test]
    fn server_fn_error_carries_json_payload() {
        let err = AppError::forbidden("new row violates row-level security policy");
        let sfe = err.clone().into_server_fn_error();
        assert_eq!(AppError::from_server_error(&sfe.to_string()), Some(err));
    }

    #[test]
    fn validate_request_collects_field_messages() {
        let form = SchoolFormData {
            name: "A".into(),
            email: "not-an-email".into(),
            address: "12".into(),
            ..Default::default()
        };
        let err = form.validate_request().unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert_eq!(
            err.field_errors.get("name").map(String::as_str),
            Some("School name must be at least 2 characters.")
        );
        assert!(err.field_errors.contains_key("email"));
        assert!(err.field_errors.contains_key("address"));
    }
}
