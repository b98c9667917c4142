//! API models

use serde::{Deserialize, Deserializer, Serialize};

/// Observed state of one managed stack, as reported by `GET /stacks`
///
/// Field order matters: the derived ordering sorts by `name` first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackStatus {
    /// Stack name, unique within a snapshot
    #[serde(rename = "Name", alias = "name")]
    pub name: String,

    /// Last reconciliation error; empty when the last attempt succeeded
    #[serde(
        rename = "Error",
        alias = "error",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub error: String,

    /// Revision (commit) the stack was last deployed from
    #[serde(rename = "Revision", alias = "revision")]
    pub revision: String,

    /// Repository the stack is deployed from
    #[serde(rename = "RepoURL", alias = "repoURL", alias = "repo_url")]
    pub repo_url: String,

    /// Path of the stack's template inside the repository; empty when absent
    #[serde(
        rename = "TemplatePath",
        alias = "templatePath",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub template_path: String,

    /// Path of the rendered compose file; empty when absent
    #[serde(
        rename = "ComposePath",
        alias = "composePath",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub compose_path: String,
}

impl StackStatus {
    /// Whether the last reconciliation attempt failed
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// All field values in declaration order
    pub fn field_values(&self) -> [&str; 6] {
        [
            &self.name,
            &self.error,
            &self.revision,
            &self.repo_url,
            &self.template_path,
            &self.compose_path,
        ]
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
