// Model exports
pub mod assignment;
pub mod family;
pub mod person;
pub mod records;

pub use assignment::{Assignment, DrawTable, FamilyDraw, Pairing};
pub use family::{Family, FamilyError, FamilyId};
pub use person::Person;
pub use records::{FamilyFile, FamilyRecord};
