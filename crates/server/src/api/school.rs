use dioxus::prelude::*;
use shared_types::{ExportFormat, ExportResponse, School, SchoolFormData, SchoolsFilter};

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::{current_caller, gateway};

/// List schools matching the filter, in its sort order.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_schools(filter: SchoolsFilter) -> Result<Vec<School>, ServerFnError> {
    gateway()?
        .list(&filter)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Get a single school, or `None` if no school has this ID.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_school(id: String) -> Result<Option<School>, ServerFnError> {
    gateway()?
        .get_by_id(&id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Create a school owned by the signed-in user.
#[cfg_attr(feature = "server", tracing::instrument(skip(form)))]
#[server]
pub async fn create_school(form: SchoolFormData) -> Result<School, ServerFnError> {
    let caller = current_caller();
    gateway()?
        .create(caller.as_ref(), &form)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "create_school failed");
            e.into_server_fn_error()
        })
}

/// Replace a school's editable fields. Omitting the logo keeps the stored one.
#[cfg_attr(feature = "server", tracing::instrument(skip(form)))]
#[server]
pub async fn update_school(id: String, form: SchoolFormData) -> Result<School, ServerFnError> {
    let caller = current_caller();
    gateway()?
        .update(caller.as_ref(), &id, &form)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "update_school failed");
            e.into_server_fn_error()
        })
}

/// Permanently delete a school. Returns `false` if it did not exist.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_school(id: String) -> Result<bool, ServerFnError> {
    let caller = current_caller();
    gateway()?
        .delete(caller.as_ref(), &id)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "delete_school failed");
            e.into_server_fn_error()
        })
}

/// Where the requested export can be downloaded.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn export_schools(format: ExportFormat) -> Result<ExportResponse, ServerFnError> {
    let url = gateway()?.export_url(format);
    tracing::info!(format = format.as_str(), "Export requested");
    Ok(ExportResponse { format, url })
}
