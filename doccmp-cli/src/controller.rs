//! Upload controller
//!
//! Owns the upload form state and issues at most one request at a time.
//! Whatever happens to the request, the caller always gets a
//! [`ComparisonResult`] back: transport and decoding failures are turned
//! into synthetic failure results so the renderer has something to paint.

use crate::client::{FilePart, Transport, UploadRequest};
use doccmp_config::{Config, FormConfig};
use doccmp_proto::ComparisonResult;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Prefix of the synthetic error produced for transport/decoding failures
pub const COMMUNICATION_ERROR: &str = "Communication with the server failed: ";

/// A file field of the upload form with its filename label
#[derive(Debug, Clone, PartialEq)]
pub struct FileInput {
    field: String,
    placeholder: String,
    selection: Option<PathBuf>,
    label: String,
}

impl FileInput {
    pub fn new(field: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            field: field.into(),
            label: placeholder.clone(),
            placeholder,
            selection: None,
        }
    }

    /// Change the selection; the label follows immediately
    pub fn select(&mut self, selection: Option<PathBuf>) {
        self.label = match &selection {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None => self.placeholder.clone(),
        };
        self.selection = selection;
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    fn to_part(&self) -> Option<FilePart> {
        self.selection.as_ref().map(|path| FilePart {
            field: self.field.clone(),
            path: path.clone(),
            file_name: self.label.clone(),
        })
    }
}

/// The upload form: both file inputs plus any extra text fields
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    pub pdf: FileInput,
    pub excel: FileInput,
    fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            pdf: FileInput::new(&config.pdf_field, &config.placeholder_label),
            excel: FileInput::new(&config.excel_field, &config.placeholder_label),
            fields: Vec::new(),
        }
    }

    /// Add an extra text field to the request body
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Build the multipart request, or name the first unselected input
    pub fn to_request(&self, url: &str) -> Result<UploadRequest, &str> {
        let pdf = self.pdf.to_part().ok_or(self.pdf.field())?;
        let excel = self.excel.to_part().ok_or(self.excel.field())?;
        Ok(UploadRequest {
            url: url.to_string(),
            files: vec![pdf, excel],
            fields: self.fields.clone(),
        })
    }
}

/// Submit control: enabled flag plus the label/busy-label pair
#[derive(Debug)]
pub struct SubmitControl {
    in_flight: AtomicBool,
    label: String,
    busy_label: String,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>, busy_label: impl Into<String>) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            label: label.into(),
            busy_label: busy_label.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }

    pub fn is_busy(&self) -> bool {
        !self.is_enabled()
    }

    /// The label currently visible on the control
    pub fn visible_label(&self) -> &str {
        if self.is_busy() {
            &self.busy_label
        } else {
            &self.label
        }
    }

    /// Disable the control; `None` if it is already disabled
    fn acquire(&self) -> Option<BusyGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard { control: self })
    }
}

/// Re-enables the submit control when dropped, including during unwinding
struct BusyGuard<'a> {
    control: &'a SubmitControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.in_flight.store(false, Ordering::Release);
        debug!("Submit control re-enabled");
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another request was still in flight; nothing was sent
    Rejected,
    Completed(ComparisonResult),
}

/// Drives one upload at a time through a [`Transport`]
pub struct UploadController<T> {
    transport: T,
    url: String,
    control: SubmitControl,
}

impl<T: Transport> UploadController<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            url: config.server.upload_url(),
            control: SubmitControl::new(&config.form.submit_label, &config.form.busy_label),
        }
    }

    pub fn control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Submit the form.
    ///
    /// Never fails: every error ends up as a failure result.
    pub async fn submit(&self, form: &UploadForm) -> SubmitOutcome {
        let Some(_guard) = self.control.acquire() else {
            warn!("Submission ignored, a request is already in flight");
            return SubmitOutcome::Rejected;
        };

        let request = match form.to_request(&self.url) {
            Ok(request) => request,
            Err(field) => {
                warn!("Submission without a file for '{}'", field);
                return SubmitOutcome::Completed(ComparisonResult::failure(
                    "Please select both a PDF and an Excel file.",
                ));
            }
        };

        info!(
            "{} {} + {} -> {}",
            self.control.visible_label(),
            form.pdf.label(),
            form.excel.label(),
            self.url
        );

        let result = match self.transport.send(request).await {
            Ok(body) => ComparisonResult::from_json(&body).unwrap_or_else(|e| {
                warn!("Response is not a comparison result: {}", e);
                ComparisonResult::failure(format!("{}{}", COMMUNICATION_ERROR, e))
            }),
            Err(e) => {
                warn!("Upload failed: {}", e);
                ComparisonResult::failure(format!("{}{}", COMMUNICATION_ERROR, e))
            }
        };

        SubmitOutcome::Completed(result)
    }
}
