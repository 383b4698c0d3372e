use serde::{Deserialize, Serialize};

/// Remote resource collections exposed by the Port API.
///
/// The rendered name is both the URL path segment (`GET /{kind}`) and the
/// key under which the response body carries the result array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Users,
    Teams,
}

impl ObjectKind {
    /// The response-body key holding the resource array
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Teams => "teams",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_path_segment() {
        assert_eq!(ObjectKind::Users.to_string(), "users");
        assert_eq!(ObjectKind::Teams.to_string(), "teams");
    }
}
