//! Thin client for the Port REST API
//!
//! Wraps the three vendor endpoints this tool touches: the client-credentials
//! token exchange, resource listing, and per-entity upsert. The bearer token
//! is cached on the client instance for the life of the process; there is no
//! refresh or expiry handling.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AuthConfig;
use crate::domain::{CatalogEntity, DomainError, ObjectKind, RemoteTeam, RemoteUser};
use crate::infrastructure::http_client::HttpClientTrait;

/// Field projection requested when listing users
const USER_FIELD_PROJECTION: &[&str] = &[
    "email",
    "firstName",
    "lastName",
    "status",
    "providers",
    "createdAt",
    "teams.name",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenResponse {
    access_token: String,
}

/// Query parameters for a resource listing.
///
/// `fields` serializes as repeated `fields=` pairs ahead of the remaining
/// ordinary parameters.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    pub fields: Vec<String>,
    pub params: Vec<(String, String)>,
}

impl ResourceQuery {
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            params: Vec::new(),
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| ("fields".to_string(), field.clone()))
            .chain(self.params.iter().cloned())
            .collect()
    }
}

/// Client for the Port API, generic over the HTTP transport for testing
#[derive(Debug)]
pub struct PortClient<C: HttpClientTrait> {
    http: C,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: RwLock<String>,
}

impl<C: HttpClientTrait> PortClient<C> {
    #[cfg(test)]
    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    pub fn new(http: C, base_url: impl Into<String>, auth: &AuthConfig) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: auth.client_id.clone(),
            client_secret: auth.client_secret.clone(),
            token: RwLock::new(String::new()),
        }
    }

    /// Exchange the client credentials for a bearer token and cache it.
    pub async fn authenticate(&self) -> Result<String, DomainError> {
        let url = format!("{}/auth/access_token", self.base_url);
        let body = serde_json::to_value(AccessTokenRequest {
            client_id: &self.client_id,
            client_secret: &self.client_secret,
        })
        .map_err(|e| DomainError::decode(e.to_string()))?;

        let response = self.http.post_json(&url, vec![], &body).await?;

        let token_response: AccessTokenResponse = serde_json::from_value(response)
            .map_err(|e| DomainError::auth(format!("Unexpected token response: {}", e)))?;

        *self.token.write().expect("token lock poisoned") = token_response.access_token.clone();

        Ok(token_response.access_token)
    }

    /// The cached bearer token, authenticating first if needed.
    ///
    /// A failed token exchange is logged and yields an empty string, so
    /// subsequent calls proceed and fail with the remote auth error rather
    /// than aborting the run.
    pub async fn access_token(&self) -> String {
        {
            let token = self.token.read().expect("token lock poisoned");
            if !token.is_empty() {
                return token.clone();
            }
        }

        match self.authenticate().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Error getting access token: {}", e);
                String::new()
            }
        }
    }

    async fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token().await)
    }

    /// List a resource collection, returning the raw record array.
    ///
    /// The response body must carry `ok: true` and an array under the
    /// kind-named key; anything else is an error.
    pub async fn fetch_resource(
        &self,
        kind: ObjectKind,
        query: &ResourceQuery,
    ) -> Result<Vec<Value>, DomainError> {
        debug!("Requesting data for path: {} with params: {:?}", kind, query);

        let url = format!("{}/{}", self.base_url, kind);
        let auth_header = self.auth_header().await;
        let pairs = query.to_pairs();

        let response = self
            .http
            .get_json(&url, &pairs, vec![("Authorization", &auth_header)])
            .await?;

        let ok = response
            .get("ok")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !ok {
            let message = response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("no message in response");
            return Err(DomainError::api(
                200,
                format!("Error retrieving {}: {}", kind, message),
            ));
        }

        let records = response
            .get(kind.as_str())
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                DomainError::decode(format!("Response missing '{}' array", kind))
            })?;

        debug!("Received size {} {}", records.len(), kind);
        Ok(records)
    }

    /// List users with the fixed field projection.
    pub async fn fetch_users(&self) -> Result<Vec<RemoteUser>, DomainError> {
        let query = ResourceQuery::with_fields(USER_FIELD_PROJECTION.iter().copied());
        let records = self.fetch_resource(ObjectKind::Users, &query).await?;

        serde_json::from_value(Value::Array(records))
            .map_err(|e| DomainError::decode(format!("Failed to decode users: {}", e)))
    }

    /// List teams (no projection).
    pub async fn fetch_teams(&self) -> Result<Vec<RemoteTeam>, DomainError> {
        let records = self
            .fetch_resource(ObjectKind::Teams, &ResourceQuery::default())
            .await?;

        serde_json::from_value(Value::Array(records))
            .map_err(|e| DomainError::decode(format!("Failed to decode teams: {}", e)))
    }

    /// Upsert a single entity into the given blueprint.
    ///
    /// Create-or-merge semantics are delegated to the remote service via the
    /// `upsert=true&merge=true` query flags.
    pub async fn upsert_entity(
        &self,
        blueprint_id: &str,
        entity: &CatalogEntity,
    ) -> Result<Value, DomainError> {
        let url = format!(
            "{}/blueprints/{}/entities?upsert=true&merge=true",
            self.base_url, blueprint_id
        );
        let auth_header = self.auth_header().await;
        let body =
            serde_json::to_value(entity).map_err(|e| DomainError::decode(e.to_string()))?;

        self.http
            .post_json(&url, vec![("Authorization", &auth_header)], &body)
            .await
            .map_err(|e| match e {
                // Prefer the remote's own message field when the body is JSON
                DomainError::Api { status, message } => match extract_remote_message(&message) {
                    Some(remote) => DomainError::api(status, remote),
                    None => DomainError::Api { status, message },
                },
                other => other,
            })
    }
}

/// Pull the `message` field out of a JSON error body, if there is one
fn extract_remote_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
