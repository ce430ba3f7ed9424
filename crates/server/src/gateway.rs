//! Query and command interface over the schools store.
//!
//! A single [`SchoolGateway`] is built at startup and handed to both the REST
//! handlers (through `AppState`) and the server functions (through a request
//! extension).

use std::sync::Arc;

use shared_types::{
    AppError, ExportFormat, School, SchoolFormData, SchoolsFilter,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::Caller;
use crate::error_convert::ValidateRequest;
use crate::repo::school::{self as school_repo, SchoolFields};
use crate::storage::LogoStore;

/// Message the store's write policy reports for callers without write access.
pub const WRITE_POLICY_VIOLATION: &str = "new row violates row-level security policy";

#[derive(Clone)]
pub struct SchoolGateway {
    pool: Pool<Postgres>,
    logos: Arc<LogoStore>,
    export_base_url: String,
}

impl SchoolGateway {
    pub fn new(pool: Pool<Postgres>, logos: LogoStore, export_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            logos: Arc::new(logos),
            export_base_url: export_base_url.into(),
        }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Schools matching `filter`, in its sort order.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, filter: &SchoolsFilter) -> Result<Vec<School>, AppError> {
        let rows = school_repo::list(&self.pool, filter).await?;
        Ok(rows.into_iter().map(School::from).collect())
    }

    /// Look up one school. An id that is not a UUID cannot exist, so it is `None`.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<School>, AppError> {
        let Some(uuid) = parse_id(id) else {
            return Ok(None);
        };
        let row = school_repo::find_by_id(&self.pool, uuid).await?;
        Ok(row.map(School::from))
    }

    #[tracing::instrument(skip(self, form), fields(name = %form.name))]
    pub async fn create(
        &self,
        caller: Option<&Caller>,
        form: &SchoolFormData,
    ) -> Result<School, AppError> {
        let caller = authorize_write(caller)?;
        let form = &form.normalized();
        form.validate_request()?;

        let logo = match &form.logo {
            Some(upload) => Some(self.logos.upload(caller.user_id, upload).await?),
            None => None,
        };

        let row = school_repo::create(&self.pool, fields_from(form), logo, caller.user_id).await?;
        tracing::info!(school_id = %row.id, user_id = caller.user_id, "School created");
        Ok(School::from(row))
    }

    /// Overwrite a school's writable fields. No new logo keeps the stored one.
    #[tracing::instrument(skip(self, form))]
    pub async fn update(
        &self,
        caller: Option<&Caller>,
        id: &str,
        form: &SchoolFormData,
    ) -> Result<School, AppError> {
        let caller = authorize_write(caller)?;
        let form = &form.normalized();
        form.validate_request()?;
        let uuid = parse_id(id).ok_or_else(|| school_not_found(id))?;

        let logo = match &form.logo {
            Some(upload) => Some(self.logos.upload(caller.user_id, upload).await?),
            None => None,
        };

        let row = school_repo::update(&self.pool, uuid, fields_from(form), logo)
            .await?
            .ok_or_else(|| school_not_found(id))?;
        tracing::info!(school_id = %row.id, user_id = caller.user_id, "School updated");
        Ok(School::from(row))
    }

    /// Hard-delete a school. `Ok(false)` when nothing had this id.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, caller: Option<&Caller>, id: &str) -> Result<bool, AppError> {
        let caller = authorize_write(caller)?;
        let Some(uuid) = parse_id(id) else {
            return Ok(false);
        };

        let removed = school_repo::delete(&self.pool, uuid).await?;
        if removed {
            tracing::info!(school_id = %uuid, user_id = caller.user_id, "School deleted");
        } else {
            tracing::warn!(school_id = %uuid, "Delete requested for a missing school");
        }
        Ok(removed)
    }

    /// Download location for an export. No file is generated yet.
    pub fn export_url(&self, format: ExportFormat) -> String {
        export_url(&self.export_base_url, format)
    }
}

pub fn export_url(base: &str, format: ExportFormat) -> String {
    format!("{}/schools.{}", base.trim_end_matches('/'), format.as_str())
}

/// Writes need a signed-in caller whose role passes the store's write policy.
pub fn authorize_write(caller: Option<&Caller>) -> Result<&Caller, AppError> {
    let caller = caller.ok_or_else(|| AppError::unauthorized("Authentication required"))?;
    if !caller.role.can_write() {
        tracing::warn!(user_id = caller.user_id, role = caller.role.as_str(), "Write rejected");
        return Err(AppError::forbidden(WRITE_POLICY_VIOLATION));
    }
    Ok(caller)
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn school_not_found(id: &str) -> AppError {
    AppError::not_found(format!("School {} not found", id))
}

/// Expects a form that already went through [`SchoolFormData::normalized`].
fn fields_from(form: &SchoolFormData) -> SchoolFields {
    SchoolFields {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone_value(),
        address: form.address.clone(),
        status: form.school_status(),
    }
}
