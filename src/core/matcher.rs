use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::candidates::candidates_for;
use crate::models::{Assignment, Family, Person};

/// Attempts made before giving up on a family
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Errors raised by the matcher
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("unable to pair every member after {attempts} attempts ({members} members)")]
    ExhaustedRetries { attempts: usize, members: usize },
}

/// Randomized pairing of givers to recipients
///
/// # Algorithm
/// Each attempt walks the members in enumeration order and draws a
/// recipient uniformly from everyone still eligible: not the giver, not a
/// direct member of the giver's family, not already drawn. An attempt that
/// strands a giver with no candidates is thrown away whole and a new one is
/// started. There is no backtracking, so a family that has a valid
/// assignment can still fail if every attempt is unlucky.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    max_attempts: usize,
}

impl Matcher {
    /// `max_attempts` is raised to one if zero
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn with_default_attempts() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Pair every member of `family` with a recipient
    ///
    /// # Arguments
    /// * `family` - Root of the tree to draw, all of its members take part
    /// * `rng` - Source of every random choice, seed it for reproducible draws
    ///
    /// # Returns
    /// The first complete assignment found, never a partial one
    pub fn pair_up<R: Rng + ?Sized>(
        &self,
        family: &Family,
        rng: &mut R,
    ) -> Result<Assignment, MatchError> {
        let members = family.all_members();

        // Exclusions depend only on the tree, resolve them once
        let relatives: Vec<&[Person]> = members
            .iter()
            .map(|m| {
                m.family()
                    .and_then(|id| family.direct_members_of(id))
                    .unwrap_or(&[])
            })
            .collect();

        for attempt in 1..=self.max_attempts {
            if let Some(assignment) = Self::attempt(&members, &relatives, &mut *rng) {
                info!(
                    family = family.name().unwrap_or_default(),
                    members = members.len(),
                    attempt,
                    "Paired every member"
                );
                return Ok(assignment);
            }
            debug!(attempt, "Attempt stranded a giver, starting over");
        }

        warn!(
            family = family.name().unwrap_or_default(),
            members = members.len(),
            attempts = self.max_attempts,
            "Exhausted pairing attempts"
        );

        Err(MatchError::ExhaustedRetries {
            attempts: self.max_attempts,
            members: members.len(),
        })
    }

    /// [`Matcher::pair_up`] with a freshly seeded generator
    pub fn pair_up_with_entropy(&self, family: &Family) -> Result<Assignment, MatchError> {
        let mut rng = StdRng::from_entropy();
        self.pair_up(family, &mut rng)
    }

    fn attempt<R: Rng + ?Sized>(
        members: &[Person],
        relatives: &[&[Person]],
        rng: &mut R,
    ) -> Option<Assignment> {
        let mut assignment = Assignment::with_capacity(members.len());
        let mut givers: HashSet<&Person> = HashSet::with_capacity(members.len());
        let mut claimed: HashSet<&Person> = HashSet::with_capacity(members.len());

        for (giver, relatives) in members.iter().zip(relatives) {
            // A name seen twice cannot be a unique giver
            if !givers.insert(giver) {
                return None;
            }

            let candidates = candidates_for(giver, relatives, members, &claimed);
            if candidates.is_empty() {
                return None;
            }

            let recipient = candidates[rng.gen_range(0..candidates.len())];
            claimed.insert(recipient);
            assignment.push(giver.clone(), recipient.clone());
        }

        (assignment.len() == members.len()).then_some(assignment)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_attempts()
    }
}
