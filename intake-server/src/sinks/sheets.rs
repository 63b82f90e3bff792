//! Google Sheets lead sink (REST, no SDK dependency)
//!
//! Flow per append:
//! 1. Service-account JWT is exchanged for an access token (cached until shortly before expiry)
//! 2. Spreadsheet is resolved by name through Drive, unless an id is configured
//! 3. The first worksheet's title is read once and cached with the id
//! 4. `values:append` adds one row below the existing data

use std::path::Path;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use shared::models::Lead;
use shared::util::now_millis;
use tokio::sync::Mutex;

use super::{LeadSink, SinkError};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive.metadata.readonly";
const SHEETS_BASE: &str = "https://sheets.googleapis.com/v4";
const DRIVE_BASE: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
/// Refresh the access token this many seconds before Google expires it
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Fields of a service-account credential file the sink needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read credentials {}: {e}", path.display()))?;
        Ok(serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid credentials {}: {e}", path.display()))?)
    }
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    value: String,
    /// Unix seconds
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now_secs: i64) -> bool {
        now_secs + TOKEN_REFRESH_MARGIN_SECS < self.expires_at
    }
}

#[derive(Debug, Clone)]
struct ResolvedSheet {
    spreadsheet_id: String,
    sheet_title: String,
}

#[derive(Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

/// Appends leads to the first worksheet of a Google spreadsheet
pub struct SheetsSink {
    http: reqwest::Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    sheet_name: String,
    sheet_id: Option<String>,
    sheets_base: String,
    drive_base: String,
    token: Mutex<Option<CachedToken>>,
    resolved: Mutex<Option<ResolvedSheet>>,
}

impl SheetsSink {
    /// Build the sink; fails when the private key cannot be parsed
    pub fn new(
        key: ServiceAccountKey,
        sheet_name: impl Into<String>,
        sheet_id: Option<String>,
    ) -> Result<Self, BoxError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| format!("Invalid service account private key: {e}"))?;
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            key,
            signing_key,
            sheet_name: sheet_name.into(),
            sheet_id,
            sheets_base: SHEETS_BASE.to_string(),
            drive_base: DRIVE_BASE.to_string(),
            token: Mutex::new(None),
            resolved: Mutex::new(None),
        })
    }

    /// Point the Sheets and Drive calls at other base URLs
    pub fn with_endpoints(mut self, sheets_base: &str, drive_base: &str) -> Self {
        self.sheets_base = sheets_base.trim_end_matches('/').to_string();
        self.drive_base = drive_base.trim_end_matches('/').to_string();
        self
    }

    async fn access_token(&self) -> Result<String, SinkError> {
        let now = now_millis() / 1000;
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref()
            && token.is_fresh(now)
        {
            return Ok(token.value.clone());
        }

        let claims = AssertionClaims {
            iss: &self.key.client_email,
            scope: SCOPES,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let assertion =
            jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
                .map_err(|e| SinkError::Authentication(format!("cannot sign assertion: {e}")))?;

        let resp = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(network)?;

        // The token endpoint answers 400 invalid_grant for a revoked or unknown key
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    SinkError::Authentication(format!("token exchange {status}: {}", clip(&body)))
                }
                _ => classify(status, "token exchange", &body),
            });
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| SinkError::Decode(e.to_string()))?;
        tracing::debug!(expires_in = token.expires_in, "Obtained Sheets access token");
        let value = token.access_token.clone();
        *cached = Some(CachedToken {
            value: token.access_token,
            expires_at: now + token.expires_in,
        });
        Ok(value)
    }

    async fn resolve(&self, token: &str) -> Result<ResolvedSheet, SinkError> {
        let mut resolved = self.resolved.lock().await;
        if let Some(sheet) = resolved.as_ref() {
            return Ok(sheet.clone());
        }

        let spreadsheet_id = match &self.sheet_id {
            Some(id) => id.clone(),
            None => self.find_spreadsheet(token).await?,
        };

        let resp = self
            .http
            .get(format!("{}/spreadsheets/{spreadsheet_id}", self.sheets_base))
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties.title")])
            .send()
            .await
            .map_err(network)?;
        let meta: SpreadsheetMeta = check(resp, "spreadsheet metadata")
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(e.to_string()))?;
        let sheet_title = meta
            .sheets
            .into_iter()
            .next()
            .map(|s| s.properties.title)
            .ok_or_else(|| SinkError::NotFound(format!("spreadsheet {spreadsheet_id} has no sheets")))?;

        tracing::info!(spreadsheet_id = %spreadsheet_id, sheet = %sheet_title, "Resolved lead spreadsheet");
        let sheet = ResolvedSheet {
            spreadsheet_id,
            sheet_title,
        };
        *resolved = Some(sheet.clone());
        Ok(sheet)
    }

    async fn find_spreadsheet(&self, token: &str) -> Result<String, SinkError> {
        let resp = self
            .http
            .get(format!("{}/files", self.drive_base))
            .bearer_auth(token)
            .query(&[
                ("q", drive_query(&self.sheet_name).as_str()),
                ("fields", "files(id,name)"),
                ("pageSize", "10"),
            ])
            .send()
            .await
            .map_err(network)?;
        let list: DriveFileList = check(resp, "drive lookup")
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(e.to_string()))?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| {
                SinkError::NotFound(format!(
                    "no spreadsheet named '{}' is shared with {}",
                    self.sheet_name, self.key.client_email
                ))
            })
    }
}

#[async_trait]
impl LeadSink for SheetsSink {
    async fn append(&self, lead: &Lead) -> Result<(), SinkError> {
        let token = self.access_token().await?;
        let sheet = self.resolve(&token).await?;

        let resp = self
            .http
            .post(append_url(&self.sheets_base, &sheet.spreadsheet_id, &sheet.sheet_title)?)
            .bearer_auth(&token)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({
                "majorDimension": "ROWS",
                "values": [lead.row()],
            }))
            .send()
            .await
            .map_err(network)?;

        match check(resp, "append").await {
            Ok(_) => Ok(()),
            Err(err) => {
                // Spreadsheet may have been deleted or renamed; look it up again next time
                if matches!(err, SinkError::NotFound(_)) {
                    *self.resolved.lock().await = None;
                }
                Err(err)
            }
        }
    }

    fn name(&self) -> &'static str {
        "sheets"
    }
}

fn network(e: reqwest::Error) -> SinkError {
    SinkError::Network(e.to_string())
}

async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response, SinkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(classify(status, what, &body))
}

fn classify(status: StatusCode, what: &str, body: &str) -> SinkError {
    let detail = format!("{what} {status}: {}", clip(body));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SinkError::Authentication(detail),
        StatusCode::NOT_FOUND => SinkError::NotFound(detail),
        _ => SinkError::Upstream {
            status: status.as_u16(),
            message: detail,
        },
    }
}

fn clip(body: &str) -> &str {
    match body.char_indices().nth(300) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Drive `q` expression matching a live spreadsheet by exact name
fn drive_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{escaped}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false")
}

/// A1 range anchoring the append at the top of the sheet
fn sheet_range(title: &str) -> String {
    format!("'{}'!A1", title.replace('\'', "''"))
}

fn append_url(
    sheets_base: &str,
    spreadsheet_id: &str,
    sheet_title: &str,
) -> Result<reqwest::Url, SinkError> {
    let range = format!("{}:append", sheet_range(sheet_title));
    let mut url =
        reqwest::Url::parse(sheets_base).map_err(|e| SinkError::Decode(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| SinkError::Decode("sheets base url cannot take a path".into()))?
        .pop_if_empty()
        .extend(["spreadsheets", spreadsheet_id, "values", range.as_str()]);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_query_escapes_quotes() {
        assert_eq!(
            drive_query("Joe's Leads"),
            "name = 'Joe\\'s Leads' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false"
        );
    }

    #[test]
    fn test_sheet_range_quotes_title() {
        assert_eq!(sheet_range("Sheet1"), "'Sheet1'!A1");
        assert_eq!(sheet_range("Bob's"), "'Bob''s'!A1");
    }

    #[test]
    fn test_append_url_encodes_range() {
        let url = append_url(SHEETS_BASE, "abc123", "Match Day").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'Match%20Day'!A1:append"
        );
    }

    #[test]
    fn test_classify_statuses() {
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, "append", ""),
            SinkError::Authentication(_)
        ));
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, "append", ""),
            SinkError::Authentication(_)
        ));
        assert!(matches!(
            classify(StatusCode::NOT_FOUND, "append", ""),
            SinkError::NotFound(_)
        ));
        assert!(matches!(
            classify(StatusCode::TOO_MANY_REQUESTS, "append", ""),
            SinkError::Upstream { status: 429, .. }
        ));
    }

    #[test]
    fn test_clip_long_body() {
        let body = "x".repeat(1000);
        assert_eq!(clip(&body).len(), 300);
        assert_eq!(clip("short"), "short");
    }

    #[test]
    fn test_token_freshness_margin() {
        let token = CachedToken {
            value: "t".into(),
            expires_at: 1_000,
        };
        assert!(token.is_fresh(900));
        assert!(!token.is_fresh(940));
        assert!(!token.is_fresh(1_000));
    }

    #[test]
    fn test_service_account_key_defaults_token_uri() {
        let key: ServiceAccountKey = serde_json::from_str(
            r#"{"type":"service_account","client_email":"bot@proj.iam.gserviceaccount.com","private_key":"pem"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_invalid_private_key_rejected() {
        let key = ServiceAccountKey {
            client_email: "bot@example.com".into(),
            private_key: "not a pem".into(),
            token_uri: default_token_uri(),
        };
        assert!(SheetsSink::new(key, "Leads", None).is_err());
    }

    #[test]
    fn test_missing_credentials_file() {
        let err = ServiceAccountKey::from_file(Path::new("/nonexistent/creds.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read credentials"));
    }
}
