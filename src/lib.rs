//! Gift Draw - gift-exchange assignment that keeps immediate family apart
//!
//! People are organised in a tree of nested families. Everyone in a root
//! family draws one recipient from the same tree, never themselves and never
//! someone from their own direct family.

pub mod config;
pub mod core;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{draw_forest, draw_forest_parallel, DrawError, MatchError, Matcher};
pub use crate::models::{Assignment, DrawTable, Family, FamilyError, FamilyRecord, Pairing, Person};
pub use crate::services::{load_forest, InputFormat, LoadError, OutputFormat};
