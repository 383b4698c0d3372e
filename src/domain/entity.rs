//! Catalog entity model and the remote-record field mappings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::identifier;
use super::remote::{RemoteTeam, RemoteUser};

/// Blueprint receiving user entities
pub const USER_BLUEPRINT: &str = "user";
/// Blueprint receiving team entities
pub const TEAM_BLUEPRINT: &str = "team";

/// Emails starting with this prefix belong to tooling accounts and are
/// never synced into the catalog.
pub const RESERVED_EMAIL_PREFIX: &str = "devops-port";

/// A single catalog record, uniquely identified within its blueprint.
///
/// Known fields are fixed; `properties` stays an open map because the
/// blueprint schema is owned by the remote service, not by this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub identifier: String,
    pub title: String,
    pub properties: Map<String, Value>,
    pub relations: BTreeMap<String, Vec<String>>,
}

impl CatalogEntity {
    /// Map a remote user to its catalog entity under the `user` blueprint.
    ///
    /// The `team` relation points at sanitized team-name identifiers so it
    /// lines up with the entities produced by [`CatalogEntity::from_team`].
    pub fn from_user(user: &RemoteUser) -> Self {
        let mut properties = Map::new();
        properties.insert("status".into(), Value::String(user.status.clone()));
        properties.insert(
            "createdAt".into(),
            serde_json::to_value(user.created_at).unwrap_or(Value::Null),
        );
        properties.insert("userInPort".into(), Value::String(user.email.clone()));
        properties.insert(
            "providers".into(),
            serde_json::to_value(&user.providers).unwrap_or(Value::Null),
        );

        let team_relations = user
            .teams
            .iter()
            .map(|team| identifier::sanitize(&team.name))
            .collect();

        let mut relations = BTreeMap::new();
        relations.insert("team".to_string(), team_relations);

        Self {
            identifier: identifier::sanitize(&user.email),
            title: format!("{} {}", user.first_name, user.last_name),
            properties,
            relations,
        }
    }

    /// Map a remote team to its catalog entity under the `team` blueprint.
    pub fn from_team(team: &RemoteTeam) -> Self {
        let mut properties = Map::new();
        properties.insert(
            "description".into(),
            team.description
                .as_ref()
                .map(|d| Value::String(d.clone()))
                .unwrap_or(Value::Null),
        );

        Self {
            identifier: identifier::sanitize(&team.name),
            title: team.name.clone(),
            properties,
            relations: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::remote::TeamRef;
    use chrono::TimeZone;

    fn sample_user() -> RemoteUser {
        RemoteUser {
            email: "a@b.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            status: "active".to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            providers: vec!["okta".to_string()],
            teams: vec![TeamRef {
                name: "SRE".to_string(),
            }],
        }
    }

    #[test]
    fn test_user_entity_mapping() {
        let entity = CatalogEntity::from_user(&sample_user());

        assert_eq!(entity.identifier, "a@b.com");
        assert_eq!(entity.title, "A B");
        assert_eq!(entity.properties["status"], "active");
        assert_eq!(entity.properties["userInPort"], "a@b.com");
        assert_eq!(
            entity.properties["providers"],
            serde_json::json!(["okta"])
        );
        assert_eq!(entity.relations["team"], vec!["SRE".to_string()]);
    }

    #[test]
    fn test_user_team_relation_is_sanitized() {
        let mut user = sample_user();
        user.teams = vec![TeamRef {
            name: "Core Infra".to_string(),
        }];

        let entity = CatalogEntity::from_user(&user);
        assert_eq!(entity.relations["team"], vec!["Core-Infra".to_string()]);
    }

    #[test]
    fn test_team_entity_with_null_description() {
        let team = RemoteTeam {
            name: "Core Infra".to_string(),
            description: None,
        };

        let entity = CatalogEntity::from_team(&team);

        assert_eq!(entity.identifier, "Core-Infra");
        assert_eq!(entity.title, "Core Infra");
        assert_eq!(entity.properties["description"], Value::Null);
        assert!(entity.relations.is_empty());
    }

    #[test]
    fn test_team_entity_with_description() {
        let team = RemoteTeam {
            name: "SRE".to_string(),
            description: Some("Site reliability".to_string()),
        };

        let entity = CatalogEntity::from_team(&team);
        assert_eq!(entity.properties["description"], "Site reliability");
    }
}
