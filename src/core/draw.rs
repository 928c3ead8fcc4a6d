use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::matcher::{MatchError, Matcher};
use crate::models::{DrawTable, Family, FamilyDraw};

/// A family of the forest could not be drawn
#[derive(Debug, Error)]
#[error("failed to draw family {}: {source}", .family.as_deref().unwrap_or("(unnamed)"))]
pub struct DrawError {
    pub family: Option<String>,
    #[source]
    pub source: MatchError,
}

fn draw_one<R: Rng + ?Sized>(
    matcher: &Matcher,
    family: &Family,
    rng: &mut R,
) -> Result<FamilyDraw, DrawError> {
    let family_name = family.name().map(str::to_string);

    match matcher.pair_up(family, rng) {
        Ok(pairings) => Ok(FamilyDraw {
            family: family_name,
            pairings,
        }),
        Err(source) => {
            debug!(family = family.name().unwrap_or_default(), "Draw failed: {}", source);
            Err(DrawError {
                family: family_name,
                source,
            })
        }
    }
}

/// Draw every root family in order
///
/// Stops at the first family that cannot be paired, nothing is returned for
/// the families drawn before it.
pub fn draw_forest<R: Rng + ?Sized>(
    matcher: &Matcher,
    families: &[Family],
    rng: &mut R,
) -> Result<DrawTable, DrawError> {
    info!("Drawing {} families", families.len());

    families
        .iter()
        .map(|family| draw_one(matcher, family, &mut *rng))
        .collect()
}

/// Draw every root family on the rayon pool
///
/// One seed per family is taken from `rng` up front and each task runs on
/// its own generator, so a seeded `rng` gives the same table as any other
/// run with that seed.
pub fn draw_forest_parallel<R: Rng + ?Sized>(
    matcher: &Matcher,
    families: &[Family],
    rng: &mut R,
) -> Result<DrawTable, DrawError> {
    info!("Drawing {} families in parallel", families.len());

    let seeds: Vec<u64> = families.iter().map(|_| rng.gen()).collect();

    families
        .par_iter()
        .zip(seeds)
        .map(|(family, seed)| draw_one(matcher, family, &mut StdRng::seed_from_u64(seed)))
        .collect::<Result<Vec<_>, _>>()
        .map(DrawTable::from_iter)
}
