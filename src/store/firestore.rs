//! Firestore REST implementation of [`DocumentStore`].
//!
//! Talks to the Firestore v1 REST API (`runQuery`, `runAggregationQuery`,
//! document GET) and authenticates with a service-account key: a self-signed
//! RS256 JWT is exchanged for an OAuth access token, which is cached until
//! shortly before expiry. Firestore's typed values are decoded into plain
//! JSON so the model layer sees one uniform dynamic value space; reference
//! values become `{"id": ..., "path": ...}` objects.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;

use super::{Document, DocumentStore, StoreError};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
const OAUTH_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// The subset of a service-account key file the client needs.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    project_id: String,
    private_key: String,
    client_email: String,
    token_uri: String,
}

#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Firestore-backed document store.
pub struct FirestoreStore {
    http: reqwest::Client,
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    documents_url: String,
    token: Mutex<Option<CachedToken>>,
}

impl FirestoreStore {
    /// Build a store from the raw service-account key JSON. Fails fast on a
    /// malformed key so a bad credential is a startup error, not a
    /// per-request one.
    pub fn new(raw_key: &str) -> Result<Self, StoreError> {
        let key: ServiceAccountKey = serde_json::from_str(raw_key)
            .map_err(|e| StoreError::Auth(format!("invalid service account key: {}", e)))?;
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| StoreError::Auth(format!("invalid service account private key: {}", e)))?;
        let documents_url = format!(
            "{}/projects/{}/databases/(default)/documents",
            FIRESTORE_BASE_URL, key.project_id
        );
        Ok(Self {
            http: reqwest::Client::new(),
            key,
            signing_key,
            documents_url,
            token: Mutex::new(None),
        })
    }

    /// Fully qualified document name, as used in reference values and
    /// query cursors.
    fn document_name(&self, collection: &str, id: &str) -> String {
        format!(
            "projects/{}/databases/(default)/documents/{}/{}",
            self.key.project_id, collection, id
        )
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() + Duration::from_secs(30) {
                return Ok(cached.value.clone());
            }
        }

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            iss: &self.key.client_email,
            scope: OAUTH_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + 3600,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.signing_key)
            .map_err(|e| StoreError::Auth(format!("failed to sign token request: {}", e)))?;

        let resp = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await
            .map_err(|e| StoreError::Auth(format!("token exchange failed: {}", e)))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Auth(format!(
                "token exchange returned {}: {}",
                status, body
            )));
        }
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("token response: {}", e)))?;

        let value = token.access_token.clone();
        *guard = Some(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in.saturating_sub(60)),
        });
        Ok(value)
    }

    async fn run_query<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
    ) -> Result<T, StoreError> {
        let token = self.access_token().await?;
        let url = format!("{}:{}", self.documents_url, method);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Transport(format!(
                "{} returned {}: {}",
                method, status, body
            )));
        }
        resp.json()
            .await
            .map_err(|e| StoreError::Decode(format!("{} response: {}", method, e)))
    }

    fn status_query(&self, collection: &str, status: &str) -> Value {
        json!({
            "from": [{"collectionId": collection}],
            "where": {
                "fieldFilter": {
                    "field": {"fieldPath": "status"},
                    "op": "EQUAL",
                    "value": {"stringValue": status}
                }
            }
        })
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn list(
        &self,
        collection: &str,
        status: &str,
        start_after: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut query = self.status_query(collection, status);
        query["orderBy"] = json!([{"field": {"fieldPath": "__name__"}, "direction": "ASCENDING"}]);
        if let Some(cursor) = start_after {
            // before=false makes the cursor exclusive: resume strictly after it
            query["startAt"] = json!({
                "values": [{"referenceValue": self.document_name(collection, cursor)}],
                "before": false
            });
        }
        if let Some(limit) = limit {
            query["limit"] = json!(limit);
        }

        let items: Vec<QueryResultItem> = self
            .run_query("runQuery", &json!({"structuredQuery": query}))
            .await?;
        Ok(items
            .into_iter()
            .filter_map(|item| item.document)
            .map(decode_document)
            .collect())
    }

    async fn count(&self, collection: &str, status: &str) -> Result<u64, StoreError> {
        let body = json!({
            "structuredAggregationQuery": {
                "structuredQuery": self.status_query(collection, status),
                "aggregations": [{"alias": "total", "count": {}}]
            }
        });
        let items: Vec<AggregationResultItem> =
            self.run_query("runAggregationQuery", &body).await?;
        items
            .into_iter()
            .find_map(|item| item.result)
            .and_then(|r| {
                r.aggregate_fields
                    .get("total")
                    .and_then(|v| v.get("integerValue"))
                    .and_then(Value::as_str)
                    .and_then(|s| s.parse::<u64>().ok())
            })
            .ok_or_else(|| StoreError::Decode("aggregation result missing count".to_string()))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let token = self.access_token().await?;
        let url = format!("{}/{}/{}", self.documents_url, collection, id);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Transport(format!(
                "document fetch returned {}: {}",
                status, body
            )));
        }
        let raw: RawDocument = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(format!("document response: {}", e)))?;
        Ok(Some(decode_document(raw)))
    }
}

#[derive(Deserialize)]
struct QueryResultItem {
    document: Option<RawDocument>,
}

#[derive(Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
struct AggregationResultItem {
    result: Option<AggregationResult>,
}

#[derive(Deserialize)]
struct AggregationResult {
    #[serde(rename = "aggregateFields")]
    aggregate_fields: Map<String, Value>,
}

fn decode_document(raw: RawDocument) -> Document {
    let id = raw
        .name
        .rsplit('/')
        .next()
        .unwrap_or(raw.name.as_str())
        .to_string();
    let fields = raw
        .fields
        .into_iter()
        .map(|(k, v)| (k, decode_value(&v)))
        .collect();
    Document { id, fields }
}

/// Decode one Firestore typed value into plain JSON.
fn decode_value(value: &Value) -> Value {
    let map = match value.as_object() {
        Some(map) => map,
        None => return value.clone(),
    };
    if let Some(v) = map.get("stringValue") {
        return v.clone();
    }
    if let Some(v) = map.get("integerValue") {
        // Firestore sends 64-bit integers as strings
        return v
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .unwrap_or_else(|| v.clone());
    }
    if let Some(v) = map.get("doubleValue") {
        return v.clone();
    }
    if let Some(v) = map.get("booleanValue") {
        return v.clone();
    }
    if map.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(v) = map.get("timestampValue") {
        return v.clone();
    }
    if let Some(v) = map.get("referenceValue") {
        return v.as_str().map(decode_reference).unwrap_or_else(|| v.clone());
    }
    if let Some(v) = map.get("arrayValue") {
        let values = v.get("values").and_then(Value::as_array);
        return Value::Array(
            values
                .map(|vs| vs.iter().map(decode_value).collect())
                .unwrap_or_default(),
        );
    }
    if let Some(v) = map.get("mapValue") {
        let fields = v.get("fields").and_then(Value::as_object);
        return Value::Object(
            fields
                .map(|fs| fs.iter().map(|(k, v)| (k.clone(), decode_value(v))).collect())
                .unwrap_or_default(),
        );
    }
    value.clone()
}

/// Decode a fully qualified reference into `{"id", "path"}`.
fn decode_reference(name: &str) -> Value {
    let path = name.split("/documents/").nth(1).unwrap_or(name);
    let id = path.rsplit('/').next().unwrap_or(path);
    json!({"id": id, "path": path})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalar_values() {
        assert_eq!(decode_value(&json!({"stringValue": "hi"})), json!("hi"));
        assert_eq!(decode_value(&json!({"integerValue": "42"})), json!(42));
        assert_eq!(decode_value(&json!({"booleanValue": true})), json!(true));
        assert_eq!(decode_value(&json!({"nullValue": null})), Value::Null);
        assert_eq!(
            decode_value(&json!({"timestampValue": "2024-05-01T08:30:00Z"})),
            json!("2024-05-01T08:30:00Z")
        );
    }

    #[test]
    fn test_decode_reference_value() {
        let decoded = decode_value(&json!({
            "referenceValue": "projects/p/databases/(default)/documents/members/abc"
        }));
        assert_eq!(decoded, json!({"id": "abc", "path": "members/abc"}));
    }

    #[test]
    fn test_decode_nested_array_of_references() {
        let decoded = decode_value(&json!({
            "arrayValue": {"values": [
                {"referenceValue": "projects/p/databases/(default)/documents/focuses/f1"},
                {"stringValue": "f2"}
            ]}
        }));
        assert_eq!(
            decoded,
            json!([{"id": "f1", "path": "focuses/f1"}, "f2"])
        );
    }

    #[test]
    fn test_decode_empty_array() {
        assert_eq!(decode_value(&json!({"arrayValue": {}})), json!([]));
    }

    #[test]
    fn test_decode_document_extracts_id() {
        let doc = decode_document(RawDocument {
            name: "projects/p/databases/(default)/documents/members/m1".to_string(),
            fields: json!({"name": {"stringValue": "Kai"}})
                .as_object()
                .unwrap()
                .clone(),
        });
        assert_eq!(doc.id, "m1");
        assert_eq!(doc.fields.get("name"), Some(&json!("Kai")));
    }
}
