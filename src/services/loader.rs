use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Family, FamilyError, FamilyFile, FamilyRecord};

/// Errors that can occur while loading a family file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON family file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML family file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid XML family file: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    #[error("cannot tell the format of {} from its extension", .0.display())]
    UnknownFormat(PathBuf),

    #[error(transparent)]
    Family(#[from] FamilyError),
}

/// Format of a family file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension
    #[default]
    Auto,
    Json,
    Toml,
    Xml,
}

impl InputFormat {
    /// Resolve `Auto` against the extension of `path`
    pub fn resolve(self, path: &Path) -> Result<Self, LoadError> {
        if self != Self::Auto {
            return Ok(self);
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("xml") => Ok(Self::Xml),
            _ => Err(LoadError::UnknownFormat(path.to_path_buf())),
        }
    }
}

// XML layout:
// <root><Families><Family Name="..."><Subfamilies>...</Subfamilies>
// <Members><Member>First Last</Member></Members></Family></Families></root>

#[derive(Debug, Deserialize)]
struct XmlRoot {
    #[serde(rename = "Families", default)]
    families: XmlFamilies,
}

#[derive(Debug, Default, Deserialize)]
struct XmlFamilies {
    #[serde(rename = "Family", default)]
    family: Vec<XmlFamily>,
}

#[derive(Debug, Deserialize)]
struct XmlFamily {
    #[serde(rename = "@Name", default)]
    name: Option<String>,
    #[serde(rename = "Subfamilies", default)]
    subfamilies: XmlFamilies,
    #[serde(rename = "Members", default)]
    members: XmlMembers,
}

#[derive(Debug, Default, Deserialize)]
struct XmlMembers {
    #[serde(rename = "Member", default)]
    member: Vec<String>,
}

impl From<XmlFamily> for FamilyRecord {
    fn from(xml: XmlFamily) -> Self {
        Self {
            name: xml.name,
            members: xml.members.member,
            subfamilies: xml.subfamilies.family.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parse the root family records from file contents
///
/// `format` must already be resolved, `Auto` is treated as JSON.
pub fn parse_records(contents: &str, format: InputFormat) -> Result<Vec<FamilyRecord>, LoadError> {
    let records = match format {
        InputFormat::Json | InputFormat::Auto => {
            serde_json::from_str::<FamilyFile>(contents)?.families
        }
        InputFormat::Toml => toml::from_str::<FamilyFile>(contents)?.families,
        InputFormat::Xml => quick_xml::de::from_str::<XmlRoot>(contents)?
            .families
            .family
            .into_iter()
            .map(Into::into)
            .collect(),
    };

    Ok(records)
}

pub fn load_records(path: &Path, format: InputFormat) -> Result<Vec<FamilyRecord>, LoadError> {
    let format = format.resolve(path)?;

    tracing::debug!("Reading {:?} family file {}", format, path.display());

    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_records(&contents, format)
}

/// Read a family file and build one tree per root family
pub fn load_forest(path: &Path, format: InputFormat) -> Result<Vec<Family>, LoadError> {
    let records = load_records(path, format)?;
    let forest = Family::forest(&records)?;

    tracing::info!(
        "Loaded {} families ({} people) from {}",
        forest.len(),
        forest.iter().map(|f| f.all_members().len()).sum::<usize>(),
        path.display()
    );

    Ok(forest)
}
