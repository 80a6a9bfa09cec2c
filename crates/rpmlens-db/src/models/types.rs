use serde::{Deserialize, Serialize};

/// Entry of a package group's `packages` array.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GroupPackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
}

/// Extracts member names from a group's `packages` JSON.
///
/// Malformed JSON yields an empty member list.
pub fn group_package_names(json: &str) -> Vec<String> {
    serde_json::from_str::<Vec<GroupPackage>>(json)
        .map(|members| members.into_iter().map(|m| m.name).collect())
        .unwrap_or_default()
}

/// Parses a JSON array of strings. Malformed or `null` input yields an empty list.
pub fn string_list(json: &str) -> Vec<String> {
    serde_json::from_str::<Option<Vec<String>>>(json)
        .ok()
        .flatten()
        .unwrap_or_default()
}
