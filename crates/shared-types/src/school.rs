use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use uuid::Uuid;

/// Largest logo file accepted by the form and the upload path (2 MB).
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

/// Accepted logo MIME types.
pub const LOGO_CONTENT_TYPES: &[&str] = &["image/svg+xml", "image/png", "image/jpeg"];

// ── Enumerations ────────────────────────────────────────────────────

/// Whether a school is currently operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SchoolStatus {
    #[default]
    Active,
    Inactive,
}

impl SchoolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchoolStatus::Active => "active",
            SchoolStatus::Inactive => "inactive",
        }
    }

    /// Parse a stored status string. Anything other than "active" is inactive.
    pub fn from_str_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("active") {
            SchoolStatus::Active
        } else {
            SchoolStatus::Inactive
        }
    }

    pub fn from_active(active: bool) -> Self {
        if active {
            SchoolStatus::Active
        } else {
            SchoolStatus::Inactive
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SchoolStatus::Active)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SchoolStatus::Active => "Active",
            SchoolStatus::Inactive => "Inactive",
        }
    }
}

/// Status predicate applied by the list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    Active,
    Inactive,
    All,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
            StatusFilter::All => "all",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "inactive" => StatusFilter::Inactive,
            "all" => StatusFilter::All,
            _ => StatusFilter::Active,
        }
    }

    /// The concrete status to match, or `None` when every status passes.
    pub fn status(&self) -> Option<SchoolStatus> {
        match self {
            StatusFilter::Active => Some(SchoolStatus::Active),
            StatusFilter::Inactive => Some(SchoolStatus::Inactive),
            StatusFilter::All => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Active => "Active Only",
            StatusFilter::Inactive => "Inactive Only",
            StatusFilter::All => "All Statuses",
        }
    }
}

/// All status filter choices in display order.
pub const STATUS_FILTERS: &[StatusFilter] =
    &[StatusFilter::Active, StatusFilter::Inactive, StatusFilter::All];

/// Column the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
    ClassesCount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
            SortField::ClassesCount => "classes_count",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "created_at" | "createdAt" => SortField::CreatedAt,
            "updated_at" | "updatedAt" => SortField::UpdatedAt,
            "classes_count" | "classesCount" => SortField::ClassesCount,
            _ => SortField::Name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}

/// Sort choices offered by the filter bar: (select value, label).
pub const SORT_OPTIONS: &[(&str, &str)] = &[
    ("name-asc", "Name (A-Z)"),
    ("name-desc", "Name (Z-A)"),
    ("classes_count-desc", "Most Classes"),
    ("created_at-desc", "Recently Added"),
    ("updated_at-desc", "Last Modified"),
];

/// Target format for a schools export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Pdf];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "excel",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(ExportFormat::Csv),
            "excel" => Some(ExportFormat::Excel),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn menu_label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "Export as CSV",
            ExportFormat::Excel => "Export as Excel",
            ExportFormat::Pdf => "Export as PDF",
        }
    }
}

// ── Filter ──────────────────────────────────────────────────────────

/// Search, status and ordering that drive every list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema, utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SchoolsFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub sort_field: SortField,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl SchoolsFilter {
    /// Combined sort value used by the sort select, e.g. `"classes_count-desc"`.
    pub fn sort_key(&self) -> String {
        format!("{}-{}", self.sort_field.as_str(), self.sort_order.as_str())
    }

    /// Apply a sort select value. The order is the text after the last `-`.
    pub fn set_sort_key(&mut self, key: &str) {
        let (field, order) = key.rsplit_once('-').unwrap_or((key, "asc"));
        self.sort_field = SortField::from_str_or_default(field);
        self.sort_order = SortOrder::from_str_or_default(order);
    }

    /// Trimmed search text, or `None` when the search predicate is skipped.
    pub fn search_term(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

// ── School ──────────────────────────────────────────────────────────

/// Database row for a school, with derived counts joined in.
#[cfg(feature = "server")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SchoolRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub logo: Option<String>,
    pub status: String,
    pub classes_count: i64,
    pub admins_count: i64,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// API shape of a school.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct School {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub status: SchoolStatus,
    pub classes_count: i64,
    pub admins_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(feature = "server")]
impl From<SchoolRow> for School {
    fn from(r: SchoolRow) -> Self {
        Self {
            id: r.id.to_string(),
            name: r.name,
            email: r.email,
            phone: r.phone,
            address: r.address,
            logo: r.logo,
            status: SchoolStatus::from_str_or_default(&r.status),
            classes_count: r.classes_count,
            admins_count: r.admins_count,
            created_by: r.created_by,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

impl School {
    /// Calendar date of creation (`YYYY-MM-DD`), or the raw value if it does not parse.
    pub fn created_date(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.created_at.clone())
    }
}

/// Shorten `text` to `max_chars` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

// ── Submission payload ──────────────────────────────────────────────

/// A logo image picked in the form, carried as base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LogoUpload {
    pub file_name: String,
    pub content_type: String,
    /// Base64-encoded file bytes (standard alphabet).
    pub data: String,
}

impl LogoUpload {
    /// Decoded byte length implied by the base64 payload.
    pub fn decoded_len(&self) -> usize {
        let data = self.data.trim_end();
        let padding = data.chars().rev().take_while(|c| *c == '=').count();
        (data.len() / 4 * 3).saturating_sub(padding)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Client-writable school fields plus an optional new logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct SchoolFormData {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, message = "School name must be at least 2 characters."))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Please enter a valid email address."))
    )]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 5, message = "Address must be at least 5 characters."))
    )]
    pub address: String,
    /// `true` stores the school as active.
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_logo")))]
    pub logo: Option<LogoUpload>,
}

impl Default for SchoolFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            status: true,
            logo: None,
        }
    }
}

impl SchoolFormData {
    /// Pre-fill from an existing school. The logo stays `None` so an
    /// untouched edit keeps the stored logo.
    pub fn from_school(school: &School) -> Self {
        Self {
            name: school.name.clone(),
            email: school.email.clone(),
            phone: school.phone.clone().unwrap_or_default(),
            address: school.address.clone(),
            status: school.status.is_active(),
            logo: None,
        }
    }

    /// Copy with surrounding whitespace stripped from the text fields.
    /// Validation and storage both work on this copy.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            status: self.status,
            logo: self.logo.clone(),
        }
    }

    pub fn school_status(&self) -> SchoolStatus {
        SchoolStatus::from_active(self.status)
    }

    /// Phone as stored: blank input becomes `None`.
    pub fn phone_value(&self) -> Option<String> {
        let trimmed = self.phone.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[cfg(feature = "validation")]
fn validate_logo(logo: &LogoUpload) -> Result<(), validator::ValidationError> {
    if !logo.is_image() {
        return Err(validator::ValidationError::new("logo_type")
            .with_message("Logo must be an image file.".into()));
    }
    if logo.decoded_len() > MAX_LOGO_BYTES {
        return Err(validator::ValidationError::new("logo_size")
            .with_message("Logo must be 2MB or smaller.".into()));
    }
    Ok(())
}

/// Response for an export request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExportResponse {
    pub format: ExportFormat,
    pub url: String,
}
