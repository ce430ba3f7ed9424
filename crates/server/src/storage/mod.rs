use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    Client,
};
use base64::Engine;
use shared_types::{AppError, LogoUpload, LOGO_CONTENT_TYPES, MAX_LOGO_BYTES};

/// Read an env var, trying the primary name first then a fallback.
pub fn env_or(primary: &str, fallback: &str) -> Option<String> {
    std::env::var(primary)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

// ── Trait ────────────────────────────────────────────────────────────

/// Object storage for uploaded files.
#[allow(async_fn_in_trait)]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key` and return the URL it can be fetched from.
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<String, String>;
}

// ── S3 implementation ───────────────────────────────────────────────

/// S3-compatible object store (MinIO locally, Tigris/S3 in production).
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    endpoint: String,
    public_base: Option<String>,
}

impl S3ObjectStore {
    /// Build from environment variables.
    ///
    ///   - `AWS_ENDPOINT_URL_S3` / `S3_ENDPOINT`
    ///   - `AWS_ACCESS_KEY_ID`   / `S3_ACCESS_KEY`
    ///   - `AWS_SECRET_ACCESS_KEY` / `S3_SECRET_KEY`
    ///   - `AWS_REGION`          / `S3_REGION`
    ///   - `BUCKET_NAME`         / `S3_BUCKET` (default `school-logos`)
    ///   - `S3_PUBLIC_URL` overrides the public URL prefix
    pub fn from_env() -> Result<Self, String> {
        let endpoint = env_or("AWS_ENDPOINT_URL_S3", "S3_ENDPOINT")
            .ok_or("AWS_ENDPOINT_URL_S3 or S3_ENDPOINT must be set")?;
        let access_key = env_or("AWS_ACCESS_KEY_ID", "S3_ACCESS_KEY")
            .ok_or("AWS_ACCESS_KEY_ID or S3_ACCESS_KEY must be set")?;
        let secret_key = env_or("AWS_SECRET_ACCESS_KEY", "S3_SECRET_KEY")
            .ok_or("AWS_SECRET_ACCESS_KEY or S3_SECRET_KEY must be set")?;
        let region =
            env_or("AWS_REGION", "S3_REGION").unwrap_or_else(|| "us-east-1".to_string());
        let bucket =
            env_or("BUCKET_NAME", "S3_BUCKET").unwrap_or_else(|| "school-logos".to_string());

        let creds = Credentials::new(&access_key, &secret_key, None, None, "env");

        let config = aws_sdk_s3::Config::builder()
            .endpoint_url(&endpoint)
            .region(Region::new(region))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();

        Ok(Self {
            client: Client::from_conf(config),
            bucket,
            endpoint,
            public_base: std::env::var("S3_PUBLIC_URL").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Create the logo bucket if missing and allow anonymous reads.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();

        if !exists {
            tracing::info!("Creating logo bucket '{}'...", self.bucket);
            if let Err(e) = self.client.create_bucket().bucket(&self.bucket).send().await {
                tracing::warn!("Failed to create logo bucket '{}': {}", self.bucket, e);
                return;
            }
        }

        let policy = format!(
            r#"{{"Version":"2012-10-17","Statement":[{{"Effect":"Allow","Principal":"*","Action":["s3:GetObject"],"Resource":["arn:aws:s3:::{}/*"]}}]}}"#,
            self.bucket
        );
        if let Err(e) = self
            .client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(&policy)
            .send()
            .await
        {
            tracing::warn!("Failed to set bucket policy on '{}': {}", self.bucket, e);
        }
    }

    fn public_url(&self, key: &str) -> String {
        match &self.public_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), self.bucket, key),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, content_type: &str, body: Vec<u8>) -> Result<String, String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let svc = e.into_service_error();
                tracing::error!("S3 PutObject failed for key '{}': {:?}", key, svc);
                format!("S3 upload failed: {}", svc)
            })?;

        Ok(self.public_url(key))
    }
}

// ── Inline implementation ───────────────────────────────────────────

/// Keeps the file in the row itself as a `data:` URL. Used when S3 is off.
#[derive(Clone, Copy, Default)]
pub struct InlineObjectStore;

impl ObjectStore for InlineObjectStore {
    async fn put(&self, _key: &str, content_type: &str, body: Vec<u8>) -> Result<String, String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(body);
        Ok(format!("data:{};base64,{}", content_type, encoded))
    }
}

// ── Logo store ──────────────────────────────────────────────────────

/// Where school logos are written.
#[derive(Clone)]
pub enum LogoStore {
    S3(S3ObjectStore),
    Inline(InlineObjectStore),
}

impl LogoStore {
    /// S3 when the feature flag is on, inline otherwise.
    pub fn from_flags(s3_enabled: bool) -> Result<Self, String> {
        if s3_enabled {
            Ok(LogoStore::S3(S3ObjectStore::from_env()?))
        } else {
            Ok(LogoStore::Inline(InlineObjectStore))
        }
    }

    pub async fn ensure_ready(&self) {
        if let LogoStore::S3(store) = self {
            store.ensure_bucket().await;
        }
    }

    /// Decode, check and store a logo. Returns the reference to persist.
    #[tracing::instrument(skip(self, logo), fields(file = %logo.file_name))]
    pub async fn upload(&self, owner_id: i64, logo: &LogoUpload) -> Result<String, AppError> {
        let ext = logo_extension(&logo.content_type).ok_or_else(|| {
            AppError::bad_request(format!("Unsupported logo type: {}", logo.content_type))
        })?;
        let bytes = decode_logo(logo)?;
        let key = format!("schools/{}/{}.{}", owner_id, uuid::Uuid::new_v4(), ext);

        let result = match self {
            LogoStore::S3(store) => store.put(&key, &logo.content_type, bytes).await,
            LogoStore::Inline(store) => store.put(&key, &logo.content_type, bytes).await,
        };

        result.map_err(AppError::operation_failed)
    }
}

/// File extension for an accepted logo MIME type.
pub fn logo_extension(content_type: &str) -> Option<&'static str> {
    if !LOGO_CONTENT_TYPES.contains(&content_type) {
        return None;
    }
    match content_type {
        "image/svg+xml" => Some("svg"),
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        _ => None,
    }
}

/// Decode the base64 payload and enforce the size limit.
pub fn decode_logo(logo: &LogoUpload) -> Result<Vec<u8>, AppError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(logo.data.trim())
        .map_err(|_| AppError::bad_request("Logo data is not valid base64"))?;

    if bytes.is_empty() {
        return Err(AppError::bad_request("Logo file is empty"));
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(AppError::bad_request("Logo must be 2MB or smaller"));
    }
    Ok(bytes)
}
