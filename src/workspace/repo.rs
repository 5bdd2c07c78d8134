//! Repository selection
//!
//! A workspace clones exactly one repository per provisioning cycle: either
//! a fixed catalog entry or a custom override URL.

use crate::config::schema::RepoConfig;
use crate::error::{WsforgeError, WsforgeResult};

/// Fixed catalog of known starter repositories
pub const REPOSITORY_CATALOG: &[(&str, &str)] = &[
    (
        "envbuilder-starter",
        "https://github.com/coder/envbuilder-starter-devcontainer",
    ),
    ("coder", "https://github.com/coder/coder"),
    ("vscode-remote-try-go", "https://github.com/microsoft/vscode-remote-try-go"),
    ("vscode-remote-try-rust", "https://github.com/microsoft/vscode-remote-try-rust"),
];

/// The active repository choice for one provisioning cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositorySelection {
    /// A named entry from the fixed catalog
    Catalog(String),
    /// A custom repository URL
    Custom(String),
}

impl RepositorySelection {
    /// Resolve the selection from configuration. A non-empty custom URL wins;
    /// otherwise the catalog entry named by `repo.name` must exist.
    pub fn from_config(repo: &RepoConfig) -> WsforgeResult<Self> {
        if !repo.custom_url.is_empty() {
            return Ok(Self::Custom(repo.custom_url.clone()));
        }

        if repo.name.is_empty() {
            return Err(WsforgeError::RepositoryNotConfigured);
        }

        if catalog_url(&repo.name).is_some() {
            Ok(Self::Catalog(repo.name.clone()))
        } else {
            Err(WsforgeError::RepositoryUnknown(repo.name.clone()))
        }
    }

    /// The repository URL to clone
    pub fn url(&self) -> &str {
        match self {
            Self::Catalog(name) => {
                catalog_url(name).expect("catalog entry validated at construction")
            }
            Self::Custom(url) => url,
        }
    }
}

fn catalog_url(name: &str) -> Option<&'static str> {
    REPOSITORY_CATALOG
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, url)| *url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_url_wins_over_catalog() {
        let repo = RepoConfig {
            name: "coder".to_string(),
            custom_url: "https://example.com/org/repo".to_string(),
        };
        let selection = RepositorySelection::from_config(&repo).unwrap();
        assert_eq!(selection, RepositorySelection::Custom("https://example.com/org/repo".to_string()));
        assert_eq!(selection.url(), "https://example.com/org/repo");
    }

    #[test]
    fn catalog_entry_resolves() {
        let repo = RepoConfig {
            name: "coder".to_string(),
            custom_url: String::new(),
        };
        let selection = RepositorySelection::from_config(&repo).unwrap();
        assert_eq!(selection.url(), "https://github.com/coder/coder");
    }

    #[test]
    fn unknown_catalog_entry_is_rejected() {
        let repo = RepoConfig {
            name: "no-such-repo".to_string(),
            custom_url: String::new(),
        };
        let err = RepositorySelection::from_config(&repo).unwrap_err();
        assert!(matches!(err, WsforgeError::RepositoryUnknown(_)));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let repo = RepoConfig {
            name: String::new(),
            custom_url: String::new(),
        };
        let err = RepositorySelection::from_config(&repo).unwrap_err();
        assert!(matches!(err, WsforgeError::RepositoryNotConfigured));
    }
}
