//! Cloud Firestore lead gateway
//!
//! Writes each lead with a single `documents:commit` call so that the document
//! creation, the server timestamp and the append-only precondition are applied
//! atomically by Firestore:
//! - `update` carries the five string fields
//! - `updateTransforms` sets `created_at` to the request time on the server
//! - `currentDocument.exists = false` refuses to overwrite an existing document

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{GatewayError, LeadGateway};
use crate::core::lead::{LeadField, LeadReceipt, LeadRecord};

/// Public Firestore REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Database used when none is configured
pub const DEFAULT_DATABASE: &str = "(default)";

/// Collection that receives lead documents
pub const DEFAULT_COLLECTION: &str = "collected_users";

/// Field stamped with the server time
const CREATED_AT_FIELD: &str = "created_at";

/// Length of generated document ids (same as Firestore client SDK auto ids)
const DOCUMENT_ID_LENGTH: usize = 20;

/// Connection parameters for a Firestore database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreSettings {
    /// REST API root, e.g. `https://firestore.googleapis.com/v1` or an emulator
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub collection: String,
    /// Web API key sent as the `key` query parameter
    pub api_key: Option<String>,
}

impl FirestoreSettings {
    /// Settings for `project_id` with default endpoint, database and collection
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            api_key: None,
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    fn database_path(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database)
    }

    /// Full resource name of a document in the lead collection
    pub fn document_name(&self, id: &str) -> String {
        format!(
            "{}/documents/{}/{}",
            self.database_path(),
            self.collection,
            id
        )
    }

    /// URL of the `documents:commit` endpoint
    pub fn commit_url(&self) -> String {
        format!(
            "{}/{}/documents:commit",
            self.base_url.trim_end_matches('/'),
            self.database_path()
        )
    }
}

/// Firestore implementation of [`LeadGateway`].
///
/// Holds the process-wide HTTP client. Without settings every write fails
/// with [`GatewayError::NotConfigured`].
#[derive(Clone)]
pub struct FirestoreGateway {
    client: reqwest::Client,
    settings: Option<Arc<FirestoreSettings>>,
}

impl FirestoreGateway {
    pub fn new(client: reqwest::Client, settings: Option<FirestoreSettings>) -> Self {
        Self {
            client,
            settings: settings.map(Arc::new),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_some()
    }
}

#[async_trait]
impl LeadGateway for FirestoreGateway {
    async fn save(&self, record: &LeadRecord) -> Result<LeadReceipt, GatewayError> {
        let settings = self.settings.as_deref().ok_or(GatewayError::NotConfigured)?;

        let id = new_document_id();
        let mut request = self
            .client
            .post(settings.commit_url())
            .json(&commit_body(settings, &id, record));
        if let Some(key) = settings.api_key.as_deref() {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = classify_failure(status, &body);
            tracing::warn!("Firestore commit failed with status {}: {}", status, err);
            return Err(err);
        }

        let commit: CommitResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        tracing::info!(
            "Lead document {} created in collection {}",
            id,
            settings.collection
        );

        Ok(LeadReceipt {
            id,
            created_at: commit.created_at(),
        })
    }
}

/// Random alphanumeric document id
pub fn new_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}

fn commit_body(settings: &FirestoreSettings, id: &str, record: &LeadRecord) -> Value {
    let fields: serde_json::Map<String, Value> = LeadField::ALL
        .into_iter()
        .map(|field| {
            (
                field.name().to_string(),
                json!({ "stringValue": record.get(field) }),
            )
        })
        .collect();

    json!({
        "writes": [{
            "update": {
                "name": settings.document_name(id),
                "fields": fields,
            },
            "updateTransforms": [{
                "fieldPath": CREATED_AT_FIELD,
                "setToServerValue": "REQUEST_TIME",
            }],
            "currentDocument": { "exists": false },
        }]
    })
}

fn classify_failure(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::PermissionDenied(message),
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => GatewayError::Unavailable(message),
        _ => GatewayError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitResponse {
    #[serde(default)]
    write_results: Vec<WriteResult>,
    commit_time: Option<DateTime<Utc>>,
}

impl CommitResponse {
    /// Server timestamp applied by the transform, or the commit time
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.write_results
            .iter()
            .flat_map(|result| &result.transform_results)
            .find_map(|transform| transform.timestamp_value)
            .or(self.commit_time)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteResult {
    #[serde(default)]
    transform_results: Vec<TransformResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransformResult {
    timestamp_value: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::State,
        http::Uri,
        response::{IntoResponse, Response},
    };
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct FakeFirestore {
        requests: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
        fail_with: Option<(u16, Value)>,
    }

    async fn fake_commit(
        State(fake): State<FakeFirestore>,
        uri: Uri,
        Json(body): Json<Value>,
    ) -> Response {
        fake.requests.lock().unwrap().push((
            uri.path().to_string(),
            uri.query().map(str::to_string),
            body,
        ));

        match &fake.fail_with {
            Some((status, error)) => (
                axum::http::StatusCode::from_u16(*status).unwrap(),
                Json(error.clone()),
            )
                .into_response(),
            None => Json(json!({
                "writeResults": [{
                    "updateTime": "2026-10-19T09:30:00.654321Z",
                    "transformResults": [{ "timestampValue": "2026-10-19T09:30:00.654321Z" }]
                }],
                "commitTime": "2026-10-19T09:30:00.654321Z"
            }))
            .into_response(),
        }
    }

    async fn serve(fake: FakeFirestore) -> String {
        let router = Router::new().fallback(fake_commit).with_state(fake);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn jane() -> LeadRecord {
        LeadRecord::new("Jane Doe", "jane@x.com", "+1555")
    }

    #[test]
    fn test_settings_paths() {
        let settings = FirestoreSettings::new("acme-leads");

        assert_eq!(
            settings.commit_url(),
            "https://firestore.googleapis.com/v1/projects/acme-leads/databases/(default)/documents:commit"
        );
        assert_eq!(
            settings.document_name("abc"),
            "projects/acme-leads/databases/(default)/documents/collected_users/abc"
        );
    }

    #[test]
    fn test_commit_url_trims_trailing_slash() {
        let settings = FirestoreSettings::new("p").base_url("http://localhost:8080/v1/");
        assert_eq!(
            settings.commit_url(),
            "http://localhost:8080/v1/projects/p/databases/(default)/documents:commit"
        );
    }

    #[test]
    fn test_document_id_shape() {
        let id = new_document_id();
        assert_eq!(id.len(), DOCUMENT_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(new_document_id(), id);
    }

    #[test]
    fn test_commit_body_shape() {
        let settings = FirestoreSettings::new("p").collection("leads");
        let record = jane().with_goal("More bookings");

        let body = commit_body(&settings, "doc1", &record);
        let write = &body["writes"][0];

        assert_eq!(
            write["update"]["name"],
            "projects/p/databases/(default)/documents/leads/doc1"
        );
        assert_eq!(write["update"]["fields"]["full_name"]["stringValue"], "Jane Doe");
        assert_eq!(write["update"]["fields"]["email"]["stringValue"], "jane@x.com");
        assert_eq!(write["update"]["fields"]["telephone"]["stringValue"], "+1555");
        assert_eq!(write["update"]["fields"]["business_name"]["stringValue"], "");
        assert_eq!(write["update"]["fields"]["goal"]["stringValue"], "More bookings");
        assert!(write["update"]["fields"].get("created_at").is_none());
        assert_eq!(write["updateTransforms"][0]["fieldPath"], "created_at");
        assert_eq!(write["updateTransforms"][0]["setToServerValue"], "REQUEST_TIME");
        assert_eq!(write["currentDocument"]["exists"], false);
    }

    #[test]
    fn test_created_at_falls_back_to_commit_time() {
        let commit: CommitResponse = serde_json::from_value(json!({
            "writeResults": [{ "updateTime": "2026-10-19T09:30:00Z" }],
            "commitTime": "2026-10-19T09:30:01Z"
        }))
        .unwrap();

        assert_eq!(
            commit.created_at().unwrap().to_rfc3339(),
            "2026-10-19T09:30:01+00:00"
        );
    }

    #[test]
    fn test_classify_failure() {
        let body = r#"{"error":{"code":403,"message":"Missing or insufficient permissions.","status":"PERMISSION_DENIED"}}"#;
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, body),
            GatewayError::PermissionDenied(m) if m == "Missing or insufficient permissions."
        ));
        assert!(matches!(
            classify_failure(StatusCode::SERVICE_UNAVAILABLE, "down"),
            GatewayError::Unavailable(m) if m == "down"
        ));
        assert!(matches!(
            classify_failure(StatusCode::CONFLICT, "{}"),
            GatewayError::Rejected { status: 409, .. }
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_fails() {
        let gateway = FirestoreGateway::new(reqwest::Client::new(), None);

        assert!(!gateway.is_configured());
        assert!(matches!(
            gateway.save(&jane()).await,
            Err(GatewayError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn test_save_commits_document_with_server_timestamp() {
        let fake = FakeFirestore::default();
        let base_url = serve(fake.clone()).await;
        let settings = FirestoreSettings::new("demo-project")
            .base_url(base_url)
            .api_key("test-key");
        let gateway = FirestoreGateway::new(reqwest::Client::new(), Some(settings));

        let receipt = gateway.save(&jane()).await.unwrap();

        assert_eq!(receipt.id.len(), DOCUMENT_ID_LENGTH);
        assert_eq!(
            receipt.created_at.unwrap().to_rfc3339(),
            "2026-10-19T09:30:00.654321+00:00"
        );

        let requests = fake.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (path, query, body) = &requests[0];
        assert!(path.starts_with("/v1/projects/demo-project/databases/"));
        assert!(path.ends_with("/documents:commit"));
        assert_eq!(query.as_deref(), Some("key=test-key"));

        let name = body["writes"][0]["update"]["name"].as_str().unwrap();
        assert!(name.ends_with(&format!("/documents/collected_users/{}", receipt.id)));
        assert_eq!(
            body["writes"][0]["update"]["fields"]["full_name"]["stringValue"],
            "Jane Doe"
        );
        assert_eq!(
            body["writes"][0]["updateTransforms"][0]["setToServerValue"],
            "REQUEST_TIME"
        );
    }

    #[tokio::test]
    async fn test_save_without_api_key_sends_no_query() {
        let fake = FakeFirestore::default();
        let base_url = serve(fake.clone()).await;
        let settings = FirestoreSettings::new("demo-project").base_url(base_url);
        let gateway = FirestoreGateway::new(reqwest::Client::new(), Some(settings));

        gateway.save(&jane()).await.unwrap();

        let requests = fake.requests.lock().unwrap();
        assert_eq!(requests[0].1, None);
    }

    #[tokio::test]
    async fn test_save_reports_permission_error() {
        let fake = FakeFirestore {
            fail_with: Some((
                403,
                json!({ "error": { "code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED" } }),
            )),
            ..Default::default()
        };
        let base_url = serve(fake).await;
        let gateway = FirestoreGateway::new(
            reqwest::Client::new(),
            Some(FirestoreSettings::new("demo-project").base_url(base_url)),
        );

        let err = gateway.save(&jane()).await.unwrap_err();

        assert!(matches!(err, GatewayError::PermissionDenied(_)));
        assert_eq!(
            err.to_string(),
            "Lead store denied the write: Missing or insufficient permissions."
        );
    }

    #[tokio::test]
    async fn test_save_reports_transport_error() {
        // Nothing listens on port 9 locally
        let settings = FirestoreSettings::new("p").base_url("http://127.0.0.1:9/v1");
        let gateway = FirestoreGateway::new(reqwest::Client::new(), Some(settings));

        assert!(matches!(
            gateway.save(&jane()).await,
            Err(GatewayError::Transport(_))
        ));
    }
}
