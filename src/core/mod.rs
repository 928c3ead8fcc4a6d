// Core algorithm exports
pub mod candidates;
pub mod draw;
pub mod matcher;

pub use candidates::{candidates_for, is_eligible};
pub use draw::{draw_forest, draw_forest_parallel, DrawError};
pub use matcher::{Matcher, MatchError, DEFAULT_MAX_ATTEMPTS};
