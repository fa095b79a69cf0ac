//! End-to-end tests: submit through the controller with a scripted
//! transport, then render the result the way the CLI does.

use doccmp_cli::client::{Transport, UploadRequest};
use doccmp_cli::controller::{SubmitOutcome, UploadController, UploadForm, COMMUNICATION_ERROR};
use doccmp_cli::error::ClientError;
use doccmp_cli::render::{html, render, summary, PaneBody, RenderOptions};
use doccmp_config::Config;
use doccmp_proto::ComparisonResult;
use pretty_assertions::assert_eq;
use std::sync::Mutex;

/// Replies with a fixed body and records what was sent
struct ScriptedServer {
    body: Option<String>,
    requests: Mutex<Vec<UploadRequest>>,
}

impl ScriptedServer {
    fn replying(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            body: None,
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedServer {
    async fn send(&self, request: UploadRequest) -> Result<String, ClientError> {
        self.requests.lock().unwrap().push(request);
        match &self.body {
            Some(body) => Ok(body.clone()),
            None => Err(ClientError::Status {
                status: 502,
                body: "bad gateway".into(),
            }),
        }
    }
}

fn filled_form(config: &Config) -> UploadForm {
    let mut form = UploadForm::new(&config.form);
    form.pdf.select(Some("docs/report.pdf".into()));
    form.excel.select(Some("docs/figures.xlsx".into()));
    form
}

async fn compare(server: ScriptedServer) -> (ComparisonResult, Vec<UploadRequest>) {
    let config = Config::default();
    let form = filled_form(&config);
    let controller = UploadController::new(server, &config);

    let result = match controller.submit(&form).await {
        SubmitOutcome::Completed(result) => result,
        SubmitOutcome::Rejected => panic!("nothing else was in flight"),
    };
    assert!(controller.control().is_enabled());

    let requests = std::mem::take(&mut *controller_requests(&controller));
    (result, requests)
}

fn controller_requests(
    controller: &UploadController<ScriptedServer>,
) -> std::sync::MutexGuard<'_, Vec<UploadRequest>> {
    controller.transport().requests.lock().unwrap()
}

#[tokio::test]
async fn test_matching_documents() {
    let (result, requests) = compare(ScriptedServer::replying(
        r#"{"success": true, "pdf_text": "Hello World",
            "excel_data": {"Sheet1": [{"A": "Hello", "B": "World"}]},
            "differences": []}"#,
    ))
    .await;

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, "http://127.0.0.1:5000/upload");
    let fields: Vec<_> = requests[0].files.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, ["pdf_file", "excel_file"]);
    assert_eq!(requests[0].files[1].file_name, "figures.xlsx");

    let report = render(&result, &RenderOptions::default());
    assert!(report.success);
    assert_eq!(report.diff.body, PaneBody::NoDifferences);

    let page = html::to_html(&report, "Quarterly check");
    assert!(page.contains("id=\"diffContent\""));
    assert!(page.contains("Hello World"));
}

#[tokio::test]
async fn test_mismatch_is_listed_and_highlighted() {
    let (result, _) = compare(ScriptedServer::replying(
        r#"{"success": true, "pdf_text": "ABC",
            "excel_data": {"Sheet1": [{"A": "ABD"}]},
            "differences": [
                {"type": "only_in_pdf", "content": ["ABC"]},
                {"type": "only_in_excel", "content": ["ABD"]}
            ]}"#,
    ))
    .await;

    let report = render(&result, &RenderOptions::default());
    let text = summary::to_text(&report);
    assert!(text.contains("position 3: 'C' → 'D'"));
    assert!(text.contains("== PDF ==\n[ABC]"));
    assert!(text.contains("only in Excel: ABD"));
}

#[tokio::test]
async fn test_server_reported_failure() {
    let (result, _) = compare(ScriptedServer::replying(
        r#"{"success": false, "error": "PDF parse failed"}"#,
    ))
    .await;

    let report = render(&result, &RenderOptions::default());
    assert!(!report.success);
    for pane in report.panes() {
        assert_eq!(pane.body, PaneBody::Error("PDF parse failed".into()));
    }
}

#[tokio::test]
async fn test_transport_failure_becomes_failure_result() {
    let (result, requests) = compare(ScriptedServer::unreachable()).await;
    assert_eq!(requests.len(), 1);
    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.starts_with(COMMUNICATION_ERROR), "{}", error);
    assert!(error.contains("502"));
}

#[tokio::test]
async fn test_non_json_reply_becomes_failure_result() {
    let (result, _) = compare(ScriptedServer::replying("<html>oops</html>")).await;
    assert!(!result.success);
    assert!(result.error.unwrap().starts_with(COMMUNICATION_ERROR));
}

#[tokio::test]
async fn test_missing_file_sends_nothing() {
    let config = Config::default();
    let mut form = UploadForm::new(&config.form);
    form.pdf.select(Some("only.pdf".into()));
    assert_eq!(form.excel.label(), "Select a file");

    let controller = UploadController::new(ScriptedServer::replying("{}"), &config);
    match controller.submit(&form).await {
        SubmitOutcome::Completed(result) => assert!(!result.success),
        SubmitOutcome::Rejected => panic!("missing files are not a busy rejection"),
    }
    assert!(controller_requests(&controller).is_empty());
}

#[test]
fn test_saved_result_renders_offline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");
    let saved = ComparisonResult::from_json(
        r#"{"success": true, "pdf_text": "가나다", "excel_data": {"error": "locked workbook"}}"#,
    )
    .unwrap();
    std::fs::write(&path, saved.to_json_pretty().unwrap()).unwrap();

    let loaded = ComparisonResult::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, saved);

    let report = render(&loaded, &RenderOptions::default());
    assert_eq!(report.pdf.body.plain_text(), "가나다");
    assert!(report.excel.body.is_error());
    assert!(report.excel.body.plain_text().contains("locked workbook"));
    assert!(matches!(report.diff.body, PaneBody::Placeholder(_)));
}
