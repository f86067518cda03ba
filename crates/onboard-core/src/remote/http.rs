//! Supabase/PostgREST implementation of [`RemoteStore`].
//!
//! Inserts POST to `{base}/rest/v1/{table}` with the project `apikey` and a
//! bearer token from the injected session; owner columns are stamped from
//! the session's user id. Rejection bodies (`{code, message, ...}`) are
//! classified into [`RejectionKind`] from the Postgres error code.

use crate::config::{NetworkConfig, SupabaseConfig};
use crate::error::{OnboardError, RejectionKind, Result};
use crate::models::remote::{
    EmployeeInsert, GalleryItemInsert, MissionInsert, PeopleNoteInsert, RequirementInsert,
    TagInsert, TaskInsert,
};
use crate::remote::{CreatedRecord, RemoteStore};
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// Authenticated identity for remote calls.
///
/// Produced by the host application's auth flow; this crate never logs in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: String,
}

/// HTTP client for the hosted persistence API.
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
    session: RwLock<Option<AuthSession>>,
}

impl SupabaseClient {
    /// Create a client for the given project.
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(NetworkConfig::REQUEST_TIMEOUT)
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| OnboardError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    /// Install or clear the authenticated session.
    pub fn set_session(&self, session: Option<AuthSession>) {
        *self.session.write().unwrap() = session;
    }

    fn session(&self) -> Result<AuthSession> {
        self.session
            .read()
            .unwrap()
            .clone()
            .ok_or(OnboardError::AuthRequired)
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        // `Url::join` treats a non-slash-terminated path as a file and
        // replaces its last segment, which would eat a reverse-proxy
        // prefix. Normalize before joining.
        let mut base = self.config.base_url.clone();
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        base.join(&format!("{}/{}", NetworkConfig::REST_PATH, table))
            .map_err(|e| OnboardError::Config {
                message: format!("Invalid remote URL for table {}: {}", table, e),
            })
    }

    /// Serialize `input`, stamp owner columns, and insert it, returning the
    /// created row.
    async fn insert_owned<T: Serialize>(
        &self,
        table: &str,
        input: &T,
        owner_columns: &[&str],
    ) -> Result<Value> {
        let session = self.session()?;
        let mut payload = serde_json::to_value(input)?;
        stamp_owner(&mut payload, owner_columns, &session.user_id)?;
        self.post_returning(table, &payload, &session).await
    }

    /// POST one row, asking for the created representation back.
    async fn post_returning(
        &self,
        table: &str,
        body: &Value,
        session: &AuthSession,
    ) -> Result<Value> {
        let url = self.table_url(table)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let rows: Vec<Value> = response.json().await?;
        rows.into_iter().next().ok_or_else(|| {
            OnboardError::Other(format!("Insert into {} returned no representation", table))
        })
    }

    /// POST rows without asking for a representation back.
    async fn post_minimal(&self, table: &str, body: &Value, session: &AuthSession) -> Result<()> {
        let url = self.table_url(table)?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, table: &str, id: &str, session: &AuthSession) -> Result<()> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(rejection_from_response(status, &body))
    }
}

/// Stamp owner columns into an insert payload.
fn stamp_owner(payload: &mut Value, columns: &[&str], user_id: &str) -> Result<()> {
    let map = payload.as_object_mut().ok_or_else(|| {
        OnboardError::Other("Insert payload must serialize to a JSON object".into())
    })?;
    for column in columns {
        map.insert((*column).to_string(), Value::String(user_id.to_string()));
    }
    Ok(())
}

/// Decode a non-success PostgREST response into a structured error.
fn rejection_from_response(status: StatusCode, body: &str) -> OnboardError {
    if status == StatusCode::UNAUTHORIZED {
        return OnboardError::AuthRequired;
    }

    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let code = parsed.get("code").and_then(Value::as_str).unwrap_or("");
    let raw_message = parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status));
    let kind = RejectionKind::from_code(code);

    OnboardError::Rejected {
        kind,
        message: friendly_message(kind, raw_message),
    }
}

fn friendly_message(kind: RejectionKind, raw: String) -> String {
    match kind {
        RejectionKind::AlreadyExists => "This record already exists".to_string(),
        RejectionKind::ForeignKeyViolation => {
            "This record references data that does not exist".to_string()
        }
        RejectionKind::PermissionDenied => {
            "You do not have permission to perform this action".to_string()
        }
        RejectionKind::NotFound => "No data found".to_string(),
        RejectionKind::Other => raw,
    }
}

#[async_trait]
impl RemoteStore for SupabaseClient {
    async fn create_tag(&self, input: &TagInsert) -> Result<CreatedRecord> {
        let row = self.insert_owned("tags", input, &["user_id"]).await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn create_task(&self, input: &TaskInsert) -> Result<CreatedRecord> {
        let row = self.insert_owned("tasks", input, &["user_id"]).await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn add_task_tags(&self, task_id: &str, tags: &[String]) -> Result<()> {
        let session = self.session()?;
        let rows: Vec<Value> = tags
            .iter()
            .map(|tag| json!({ "task_id": task_id, "tag": tag }))
            .collect();
        self.post_minimal("task_tags", &Value::Array(rows), &session)
            .await
    }

    async fn create_mission(
        &self,
        input: &MissionInsert,
        requirements: &[RequirementInsert],
    ) -> Result<CreatedRecord> {
        let session = self.session()?;
        let row = self.insert_owned("missions", input, &["user_id"]).await?;
        let created: CreatedRecord = serde_json::from_value(row)?;

        if !requirements.is_empty() {
            let mut rows = Vec::with_capacity(requirements.len());
            for requirement in requirements {
                let mut value = serde_json::to_value(requirement)?;
                if let Some(map) = value.as_object_mut() {
                    map.insert(
                        "mission_id".to_string(),
                        Value::String(created.id.clone()),
                    );
                }
                rows.push(value);
            }
            if let Err(e) = self
                .post_minimal("mission_requirements", &Value::Array(rows), &session)
                .await
            {
                warn!(
                    "Requirement insert failed for mission {}, rolling back: {}",
                    created.id, e
                );
                if let Err(del) = self.delete_by_id("missions", &created.id, &session).await {
                    warn!("Rollback delete failed for mission {}: {}", created.id, del);
                }
                return Err(e);
            }
        }

        Ok(created)
    }

    async fn create_gallery_item(&self, input: &GalleryItemInsert) -> Result<CreatedRecord> {
        let row = self
            .insert_owned("gallery_items", input, &["user_id"])
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn add_gallery_tags(&self, item_id: &str, tags: &[String]) -> Result<()> {
        let session = self.session()?;
        let rows: Vec<Value> = tags
            .iter()
            .map(|tag| json!({ "item_id": item_id, "tag": tag }))
            .collect();
        self.post_minimal("gallery_tags", &Value::Array(rows), &session)
            .await
    }

    async fn delete_gallery_item(&self, item_id: &str) -> Result<()> {
        let session = self.session()?;
        self.delete_by_id("gallery_items", item_id, &session).await
    }

    async fn create_employee(&self, input: &EmployeeInsert) -> Result<CreatedRecord> {
        // Employees additionally carry creator/modifier stamps.
        let row = self
            .insert_owned(
                "employees",
                input,
                &["user_id", "created_by", "last_modified_by"],
            )
            .await?;
        Ok(serde_json::from_value(row)?)
    }

    async fn create_people_note(&self, input: &PeopleNoteInsert) -> Result<CreatedRecord> {
        let row = self
            .insert_owned("people_notes", input, &["user_id"])
            .await?;
        Ok(serde_json::from_value(row)?)
    }
}
