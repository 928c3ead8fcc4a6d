use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::person::Person;
use crate::models::records::FamilyRecord;

/// Errors raised while building a family tree
#[derive(Debug, Error)]
pub enum FamilyError {
    #[error("{person} is already a member of a sub-family of this family and cannot be added again")]
    Conflict { person: Person },

    #[error("{person} from the new sub-family is already a member of an existing sub-family")]
    SubFamilyConflict { person: Person },

    #[error("malformed member name {0:?}, expected \"First Last\"")]
    MalformedName(String),
}

/// Opaque identity of a family node
///
/// People refer back to their direct family through this id rather than a
/// reference, the family owns the person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FamilyId(Uuid);

impl FamilyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FamilyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A node in the family tree
///
/// Holds the people added to it directly plus any nested sub-families. No
/// person may appear twice below the same root, with one known exception:
/// a sub-family is only checked against the other sub-families, never
/// against the direct members of the parent.
#[derive(Debug, Default)]
pub struct Family {
    id: FamilyId,
    name: Option<String>,
    direct_members: Vec<Person>,
    sub_families: Vec<Family>,
}

impl Family {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn id(&self) -> FamilyId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn direct_members(&self) -> &[Person] {
        &self.direct_members
    }

    /// Immediate sub-families, in insertion order
    pub fn sub_families(&self) -> std::slice::Iter<'_, Family> {
        self.sub_families.iter()
    }

    /// Every person in this family and all of its sub-families
    ///
    /// Direct members come first, then each sub-family's members in order.
    /// Recomputed on every call.
    pub fn all_members(&self) -> Vec<Person> {
        let mut members = self.direct_members.clone();
        for sub_family in &self.sub_families {
            members.extend(sub_family.all_members());
        }
        members
    }

    /// Iterate over [`Family::all_members`]
    pub fn members(&self) -> std::vec::IntoIter<Person> {
        self.all_members().into_iter()
    }

    /// Add a person as a direct member
    ///
    /// Fails if the person already belongs to one of the sub-families. The
    /// family is left untouched on failure.
    pub fn add_person(&mut self, mut person: Person) -> Result<(), FamilyError> {
        if self
            .sub_families
            .iter()
            .any(|f| f.all_members().contains(&person))
        {
            return Err(FamilyError::Conflict { person });
        }

        person.set_family(self.id);
        self.direct_members.push(person);
        Ok(())
    }

    pub fn add_member(
        &mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), FamilyError> {
        self.add_person(Person::new(first_name, last_name))
    }

    /// Attach a nested family
    ///
    /// Fails if any of its members already belongs to an attached
    /// sub-family. Direct members of `self` are not checked.
    pub fn add_family(&mut self, sub_family: Family) -> Result<(), FamilyError> {
        let incoming = sub_family.all_members();

        for existing in &self.sub_families {
            let existing_members = existing.all_members();
            if let Some(person) = incoming.iter().find(|p| existing_members.contains(p)) {
                return Err(FamilyError::SubFamilyConflict {
                    person: person.clone(),
                });
            }
        }

        self.sub_families.push(sub_family);
        Ok(())
    }

    /// Direct members of the family with the given id, searching this tree
    pub fn direct_members_of(&self, id: FamilyId) -> Option<&[Person]> {
        if self.id == id {
            return Some(&self.direct_members);
        }
        self.sub_families
            .iter()
            .find_map(|f| f.direct_members_of(id))
    }

    /// Build a family tree from its stored form
    ///
    /// Sub-families are attached before members so that both membership
    /// checks run against the complete set of sub-families.
    pub fn from_record(record: &FamilyRecord) -> Result<Self, FamilyError> {
        let mut family = Self {
            name: record.name.clone(),
            ..Self::default()
        };

        for sub_record in &record.subfamilies {
            family.add_family(Self::from_record(sub_record)?)?;
        }

        for member in &record.members {
            family.add_person(member.parse()?)?;
        }

        Ok(family)
    }

    /// Build one tree per root record
    pub fn forest(records: &[FamilyRecord]) -> Result<Vec<Self>, FamilyError> {
        records.iter().map(Self::from_record).collect()
    }
}

/// A clone is a new family: every node gets a fresh id and the copied
/// direct members point back at their new family.
impl Clone for Family {
    fn clone(&self) -> Self {
        let id = FamilyId::new();

        let direct_members = self
            .direct_members
            .iter()
            .cloned()
            .map(|mut person| {
                person.set_family(id);
                person
            })
            .collect();

        Self {
            id,
            name: self.name.clone(),
            direct_members,
            sub_families: self.sub_families.clone(),
        }
    }
}

impl<'a> IntoIterator for &'a Family {
    type Item = &'a Family;
    type IntoIter = std::slice::Iter<'a, Family>;

    fn into_iter(self) -> Self::IntoIter {
        self.sub_families()
    }
}
