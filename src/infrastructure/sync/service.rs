//! One-shot sync pipeline: fetch remote users and teams, upsert catalog
//! entities.
//!
//! Every remote operation returns an explicit `Result`; this service is the
//! only place failures are downgraded to warnings so a single bad record or
//! call never aborts the run.

use tracing::{info, warn};

use crate::domain::{
    CatalogEntity, RemoteTeam, RemoteUser, RESERVED_EMAIL_PREFIX, TEAM_BLUEPRINT, USER_BLUEPRINT,
};
use crate::infrastructure::http_client::HttpClientTrait;
use crate::infrastructure::port::PortClient;

/// Outcome counts for a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub teams_upserted: usize,
    pub teams_failed: usize,
    pub users_upserted: usize,
    pub users_failed: usize,
    pub users_skipped: usize,
}

impl SyncReport {
    pub fn total_failed(&self) -> usize {
        self.teams_failed + self.users_failed
    }
}

/// Sequential sync of identity-source users and teams into the catalog
#[derive(Debug)]
pub struct SyncService<C: HttpClientTrait> {
    client: PortClient<C>,
}

impl<C: HttpClientTrait> SyncService<C> {
    pub fn new(client: PortClient<C>) -> Self {
        Self { client }
    }

    /// Run the full pipeline once.
    ///
    /// Teams are upserted before users so the `team` relations on user
    /// entities resolve against already-present targets.
    pub async fn run(&self) -> SyncReport {
        let users = match self.client.fetch_users().await {
            Ok(users) => users,
            Err(e) => {
                warn!("Error occurred while retrieving data for users: {}", e);
                Vec::new()
            }
        };

        let teams = match self.client.fetch_teams().await {
            Ok(teams) => teams,
            Err(e) => {
                warn!("Error occurred while retrieving data for teams: {}", e);
                Vec::new()
            }
        };

        let mut report = SyncReport::default();
        self.sync_teams(&teams, &mut report).await;
        self.sync_users(&users, &mut report).await;

        info!(
            "Sync finished: {} teams upserted ({} failed), {} users upserted ({} failed, {} skipped)",
            report.teams_upserted,
            report.teams_failed,
            report.users_upserted,
            report.users_failed,
            report.users_skipped,
        );

        report
    }

    /// Upsert each team entity, one call at a time in list order.
    pub async fn sync_teams(&self, teams: &[RemoteTeam], report: &mut SyncReport) {
        info!("Upserting {} team entities to Port", teams.len());

        for team in teams {
            let entity = CatalogEntity::from_team(team);
            match self.client.upsert_entity(TEAM_BLUEPRINT, &entity).await {
                Ok(response) => {
                    info!("Upserted team '{}': {}", entity.identifier, response);
                    report.teams_upserted += 1;
                }
                Err(e) => {
                    warn!("Error adding team '{}' to Port: {}", entity.identifier, e);
                    report.teams_failed += 1;
                }
            }
        }
    }

    /// Upsert each user entity, skipping reserved tooling accounts.
    pub async fn sync_users(&self, users: &[RemoteUser], report: &mut SyncReport) {
        info!("Upserting {} user entities to Port", users.len());

        for user in users {
            if user.email.starts_with(RESERVED_EMAIL_PREFIX) {
                report.users_skipped += 1;
                continue;
            }

            let entity = CatalogEntity::from_user(user);
            match self.client.upsert_entity(USER_BLUEPRINT, &entity).await {
                Ok(response) => {
                    info!("Upserted user '{}': {}", entity.identifier, response);
                    report.users_upserted += 1;
                }
                Err(e) => {
                    warn!("Error adding user '{}' to Port: {}", entity.identifier, e);
                    report.users_failed += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::infrastructure::http_client::mock::{MockHttpClient, RecordedPost};

    const BASE: &str = "https://port.test/v1";

    fn recorded_posts(service: &SyncService<MockHttpClient>) -> Vec<RecordedPost> {
        service.client.http().recorded_posts()
    }

    fn service_with(mock: MockHttpClient) -> SyncService<MockHttpClient> {
        let auth = AuthConfig {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
        };
        SyncService::new(PortClient::new(mock, BASE, &auth))
    }

    fn token_response() -> (String, serde_json::Value) {
        (
            format!("{}/auth/access_token", BASE),
            serde_json::json!({"accessToken": "tok"}),
        )
    }

    fn upsert_url(blueprint: &str) -> String {
        format!("{}/blueprints/{}/entities?upsert=true&merge=true", BASE, blueprint)
    }

    #[tokio::test]
    async fn test_end_to_end_one_team_one_user() {
        let (token_url, token_body) = token_response();
        let mock = MockHttpClient::new()
            .with_response(token_url, token_body)
            .with_response(
                format!("{}/users", BASE),
                serde_json::json!({
                    "ok": true,
                    "users": [{
                        "email": "a@b.com",
                        "firstName": "A",
                        "lastName": "B",
                        "status": "active",
                        "createdAt": "2024-01-15T10:30:00Z",
                        "providers": [],
                        "teams": [{"name": "SRE"}]
                    }]
                }),
            )
            .with_response(
                format!("{}/teams", BASE),
                serde_json::json!({"ok": true, "teams": [{"name": "SRE"}]}),
            )
            .with_response(upsert_url("team"), serde_json::json!({"ok": true}))
            .with_response(upsert_url("user"), serde_json::json!({"ok": true}));

        let service = service_with(mock);
        let report = service.run().await;

        assert_eq!(report.teams_upserted, 1);
        assert_eq!(report.users_upserted, 1);
        assert_eq!(report.total_failed(), 0);

        let posts = recorded_posts(&service);
        let upserts: Vec<_> = posts
            .iter()
            .filter(|p| p.url.contains("/blueprints/"))
            .collect();

        // Exactly two upserts: the team first, then the user
        assert_eq!(upserts.len(), 2);
        assert_eq!(upserts[0].url, upsert_url("team"));
        assert_eq!(upserts[1].url, upsert_url("user"));
        assert_eq!(
            upserts[1].body["relations"]["team"],
            serde_json::json!(["SRE"])
        );
    }

    #[tokio::test]
    async fn test_reserved_prefix_user_is_skipped() {
        let (token_url, token_body) = token_response();
        let mock = MockHttpClient::new().with_response(token_url, token_body);
        let service = service_with(mock);

        let user: RemoteUser = serde_json::from_value(serde_json::json!({
            "email": "devops-port-bot@x.com",
            "firstName": "Bot",
            "lastName": "Account",
            "status": "active",
            "createdAt": "2024-01-15T10:30:00Z"
        }))
        .unwrap();

        let mut report = SyncReport::default();
        service.sync_users(&[user], &mut report).await;

        assert_eq!(report.users_skipped, 1);
        assert_eq!(report.users_upserted, 0);

        let upserts: Vec<_> = recorded_posts(&service)
            .into_iter()
            .filter(|p| p.url.contains("/blueprints/"))
            .collect();
        assert!(upserts.is_empty());
    }

    #[tokio::test]
    async fn test_team_with_null_description() {
        let (token_url, token_body) = token_response();
        let mock = MockHttpClient::new()
            .with_response(token_url, token_body)
            .with_response(upsert_url("team"), serde_json::json!({"ok": true}));
        let service = service_with(mock);

        let team = RemoteTeam {
            name: "Core Infra".to_string(),
            description: None,
        };

        let mut report = SyncReport::default();
        service.sync_teams(&[team], &mut report).await;

        assert_eq!(report.teams_upserted, 1);

        let posts = recorded_posts(&service);
        let upsert = posts.iter().find(|p| p.url.contains("/blueprints/")).unwrap();
        assert_eq!(upsert.body["identifier"], "Core-Infra");
        assert_eq!(upsert.body["properties"]["description"], serde_json::Value::Null);
        assert_eq!(upsert.body["relations"], serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_upsert_failure_continues_with_next_entity() {
        let (token_url, token_body) = token_response();
        // No mock for the user upsert URL, so every upsert errors
        let mock = MockHttpClient::new().with_response(token_url, token_body);
        let service = service_with(mock);

        let users: Vec<RemoteUser> = serde_json::from_value(serde_json::json!([
            {
                "email": "a@b.com",
                "firstName": "A",
                "lastName": "B",
                "status": "active",
                "createdAt": "2024-01-15T10:30:00Z"
            },
            {
                "email": "c@d.com",
                "firstName": "C",
                "lastName": "D",
                "status": "active",
                "createdAt": "2024-01-16T10:30:00Z"
            }
        ]))
        .unwrap();

        let mut report = SyncReport::default();
        service.sync_users(&users, &mut report).await;

        // Both attempted, both failed, run not aborted
        assert_eq!(report.users_failed, 2);
        assert_eq!(report.users_upserted, 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_run() {
        let (token_url, token_body) = token_response();
        // Listing endpoints have no mock responses, so both fetches fail
        let mock = MockHttpClient::new().with_response(token_url, token_body);
        let service = service_with(mock);

        let report = service.run().await;

        assert_eq!(report, SyncReport::default());
    }
}
