//! HTTP contract tests for `SheetsClient` against a mock Sheets API.

use rostercheck_core::{
    A1Range, CellValue, Color, Credential, CredentialSlot, Projection, SheetError, SheetSource,
};
use rostercheck_sheets::{SheetsClient, SheetsConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPREADSHEET: &str = "roster-id";

fn client_for(server: &MockServer, credentials: CredentialSlot) -> SheetsClient {
    let config = SheetsConfig {
        spreadsheet_id: SPREADSHEET.into(),
        base_url: format!("{}/v4/spreadsheets", server.uri()),
        timeout_seconds: 5,
    };
    SheetsClient::new(config, credentials).expect("valid config")
}

fn signed_in() -> CredentialSlot {
    CredentialSlot::with(Credential::bearer("test-token").expect("non-blank token"))
}

// ── Column reads ──────────────────────────────────────────────────

#[tokio::test]
async fn read_column_uses_values_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/roster-id/values/JUN!B:B"))
        .and(query_param("majorDimension", "COLUMNS"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "JUN!B1:B4",
            "majorDimension": "COLUMNS",
            "values": [["", "Name", "Alice", "Bob"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in());
    let names = client
        .read_column(&A1Range::new("JUN", "B:B"))
        .await
        .unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));

    assert_eq!(
        names,
        vec![
            None,
            Some("Name".to_string()),
            Some("Alice".to_string()),
            Some("Bob".to_string())
        ]
    );
}

// ── Grid reads ────────────────────────────────────────────────────

#[tokio::test]
async fn read_grids_sends_every_range_and_field_mask() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/roster-id"))
        .and(query_param("ranges", "KEY!A2:B31"))
        .and(query_param("ranges", "KEY!D2:E9"))
        .and(query_param(
            "fields",
            "sheets(data(rowData(values(effectiveValue,effectiveFormat/backgroundColor))))",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sheets": [{
                "data": [
                    {"rowData": [{"values": [
                        {"effectiveValue": {"stringValue": "Project X"}},
                        {"effectiveValue": {"stringValue": "PRJ-X"},
                         "effectiveFormat": {"backgroundColor": {"red": 0.2, "green": 0.6, "blue": 0.9}}}
                    ]}]},
                    {}
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in());
    let ranges = [A1Range::new("KEY", "A2:B31"), A1Range::new("KEY", "D2:E9")];
    let grids = client
        .read_grids(&ranges, Projection::ValuesAndBackground)
        .await
        .unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));

    assert_eq!(grids.len(), 2);
    let label = grids[0].cell(0, 0).expect("label cell");
    assert_eq!(label.value, Some(CellValue::Text("Project X".into())));
    let appearance = grids[0].cell(0, 1).expect("appearance cell");
    assert_eq!(appearance.background, Color::rgb(0.2, 0.6, 0.9));
    assert!(grids[1].rows.is_empty());
}

#[tokio::test]
async fn header_row_read_uses_values_only_mask() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/roster-id"))
        .and(query_param("ranges", "JUN!2:2"))
        .and(query_param("fields", "sheets(data(rowData(values(effectiveValue))))"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sheets": [{"data": [{"rowData": [{"values": [
                {}, {}, {"effectiveValue": {"numberValue": 1}}
            ]}]}]}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in());
    let grids = client
        .read_grids(&[A1Range::new("JUN", "2:2")], Projection::Values)
        .await
        .unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));

    let header = grids[0].first_row();
    assert_eq!(header.len(), 3);
    assert_eq!(header[0].as_ref().and_then(|c| c.value.clone()), None);
    assert_eq!(
        header[2].as_ref().and_then(|c| c.value.as_ref()?.as_number()),
        Some(1.0)
    );
}

// ── Failure modes ─────────────────────────────────────────────────

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, CredentialSlot::new());
    let result = client.read_column(&A1Range::new("JUN", "B:B")).await;
    assert!(matches!(result, Err(SheetError::Unauthenticated)));
}

#[tokio::test]
async fn signing_out_revokes_access() {
    let server = MockServer::start().await;
    let credentials = signed_in();
    let client = client_for(&server, credentials.clone());

    credentials.clear();
    let result = client
        .read_grids(&[A1Range::new("JUN", "2:2")], Projection::Values)
        .await;
    assert!(matches!(result, Err(SheetError::Unauthenticated)));
}

#[tokio::test]
async fn api_error_status_is_reported_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "error": {
                "code": 403,
                "message": "The caller does not have permission",
                "status": "PERMISSION_DENIED"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in());
    let err = client
        .read_column(&A1Range::new("JUN", "B:B"))
        .await
        .expect_err("403 should fail");

    match err {
        SheetError::Status { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("Expected Status, got: {other:?}"),
    }
    server.verify().await;
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, signed_in());
    let result = client
        .read_grids(&[A1Range::new("JUN", "J4:K4")], Projection::ValuesAndBackground)
        .await;
    assert!(matches!(result, Err(SheetError::Parse(_))));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = SheetsConfig {
        spreadsheet_id: SPREADSHEET.into(),
        base_url: "http://127.0.0.1:1/v4/spreadsheets".into(),
        timeout_seconds: 5,
    };
    let client = SheetsClient::new(config, signed_in()).expect("valid config");

    let result = client.read_column(&A1Range::new("JUN", "B:B")).await;
    assert!(matches!(result, Err(SheetError::Transport(_))));
}
