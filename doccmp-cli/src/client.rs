//! HTTP transport for the upload endpoint

use crate::error::ClientError;
use doccmp_config::ServerConfig;
use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, ClientError>;

/// A file attached to the multipart body
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Multipart field name
    pub field: String,
    pub path: PathBuf,
    /// File name announced to the server
    pub file_name: String,
}

/// One multipart upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub url: String,
    pub files: Vec<FilePart>,
    /// Extra text fields, sent after the files
    pub fields: Vec<(String, String)>,
}

/// Sends an upload and returns the raw response body
pub trait Transport {
    fn send(&self, request: UploadRequest) -> impl Future<Output = Result<String>> + Send;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    strict_status: bool,
}

impl HttpTransport {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            client,
            strict_status: config.strict_status,
        })
    }

    async fn build_form(request: &UploadRequest) -> Result<Form> {
        let mut form = Form::new();
        for file in &request.files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| ClientError::ReadFile {
                    path: file.path.clone(),
                    source,
                })?;
            debug!("Attaching {} ({} bytes) as '{}'", file.file_name, bytes.len(), file.field);

            let part = Part::bytes(bytes)
                .file_name(file.file_name.clone())
                .mime_str(mime_for(&file.path))?;
            form = form.part(file.field.clone(), part);
        }
        for (key, value) in &request.fields {
            form = form.text(key.clone(), value.clone());
        }
        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: UploadRequest) -> Result<String> {
        let form = Self::build_form(&request).await?;

        let response = self.client.post(&request.url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if self.strict_status {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            warn!("Server answered {}, parsing body anyway", status);
        }

        Ok(body)
    }
}

/// Content type announced for an uploaded file, by extension
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}
