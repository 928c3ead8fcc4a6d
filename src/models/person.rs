use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::models::family::{FamilyError, FamilyId};

/// A participant in the draw
///
/// Equality and hashing only look at the first and last name. Two people
/// with the same name are the same person as far as the draw is concerned.
#[derive(Debug, Clone)]
pub struct Person {
    first_name: String,
    last_name: String,
    family: Option<FamilyId>,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            family: None,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Id of the family this person was added to directly, if any
    pub fn family(&self) -> Option<FamilyId> {
        self.family
    }

    pub(crate) fn set_family(&mut self, family: FamilyId) {
        self.family = Some(family);
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name && self.last_name == other.last_name
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.first_name.hash(state);
        self.last_name.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// Parse `"First Last"`, splitting on the first space
impl FromStr for Person {
    type Err = FamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(' ') {
            Some((first, last)) if !first.is_empty() && !last.is_empty() => {
                Ok(Self::new(first, last))
            }
            _ => Err(FamilyError::MalformedName(s.to_string())),
        }
    }
}

impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
