use serde::{Deserialize, Serialize};

/// Stored form of a family, as read from a family file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRecord {
    #[serde(default)]
    pub name: Option<String>,
    /// Member names in `"First Last"` form
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, alias = "subFamilies")]
    pub subfamilies: Vec<FamilyRecord>,
}

/// Top level of a JSON or TOML family file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyFile {
    #[serde(default)]
    pub families: Vec<FamilyRecord>,
}
