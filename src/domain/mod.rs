//! Domain types: remote records, catalog entities, and the pure
//! transformations between them.

mod entity;
mod error;
pub mod identifier;
mod remote;
mod resource;

pub use entity::{CatalogEntity, RESERVED_EMAIL_PREFIX, TEAM_BLUEPRINT, USER_BLUEPRINT};
pub use error::DomainError;
pub use remote::{RemoteTeam, RemoteUser, TeamRef};
pub use resource::ObjectKind;
