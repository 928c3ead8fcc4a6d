use serde::Serialize;

use crate::models::person::Person;

/// One giver and the person they draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pairing {
    pub giver: Person,
    pub recipient: Person,
}

/// Complete result of a successful draw over one family
///
/// Pairings are kept in the order givers were enumerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    pairings: Vec<Pairing>,
}

impl Assignment {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            pairings: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, giver: Person, recipient: Person) {
        self.pairings.push(Pairing { giver, recipient });
    }

    pub fn recipient_for(&self, giver: &Person) -> Option<&Person> {
        self.pairings
            .iter()
            .find(|p| &p.giver == giver)
            .map(|p| &p.recipient)
    }

    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pairing> {
        self.pairings.iter()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Pairing;
    type IntoIter = std::slice::Iter<'a, Pairing>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Draw results for one root family
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyDraw {
    pub family: Option<String>,
    pub pairings: Assignment,
}

impl FamilyDraw {
    /// Label used when rendering, unnamed families get a placeholder
    pub fn label(&self) -> &str {
        self.family.as_deref().unwrap_or("(unnamed)")
    }
}

/// Results of drawing every root family of a forest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DrawTable {
    draws: Vec<FamilyDraw>,
}

impl DrawTable {
    pub fn get(&self, family: &str) -> Option<&Assignment> {
        self.draws
            .iter()
            .find(|d| d.family.as_deref() == Some(family))
            .map(|d| &d.pairings)
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FamilyDraw> {
        self.draws.iter()
    }
}

impl FromIterator<FamilyDraw> for DrawTable {
    fn from_iter<I: IntoIterator<Item = FamilyDraw>>(iter: I) -> Self {
        Self {
            draws: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_giver() {
        let mut assignment = Assignment::default();
        assignment.push(Person::new("Alice", "Smith"), Person::new("Carl", "Jones"));

        let recipient = assignment.recipient_for(&Person::new("Alice", "Smith"));
        assert_eq!(recipient, Some(&Person::new("Carl", "Jones")));
        assert!(assignment
            .recipient_for(&Person::new("Carl", "Jones"))
            .is_none());
    }

    #[test]
    fn test_serializes_names() {
        let mut assignment = Assignment::default();
        assignment.push(Person::new("Alice", "Smith"), Person::new("Carl", "Jones"));

        let json = serde_json::to_value(&assignment).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "giver": "Alice Smith", "recipient": "Carl Jones" }])
        );
    }

    #[test]
    fn test_unnamed_label() {
        let draw = FamilyDraw {
            family: None,
            pairings: Assignment::default(),
        };
        assert_eq!(draw.label(), "(unnamed)");
    }
}
