//! Fact table and random fact selection.
//!
//! Every mood maps to a fixed, non-empty list of trivia facts. Selection is
//! uniform over that list and goes through [`RandomSource`] so callers can
//! pin it down in tests.

use crate::mood::MoodCategory;
use rand::Rng;
use std::collections::HashMap;

const ENERGETIC: &[&str] = &[
    "Hummingbirds can flap their wings up to 80 times per second!",
    "The fastest land animal, the cheetah, can accelerate faster than a sports car.",
];

const REFLECTIVE: &[&str] = &[
    "Petrichor is the smell of rain, created by oils plants release during dry periods.",
    "Your brain uses more energy when daydreaming than during some tasks.",
];

const CALM: &[&str] = &[
    "Sea otters hold hands when they sleep to avoid drifting apart.",
    "Listening to certain music can slow your heart rate and reduce stress.",
];

const ANXIOUS: &[&str] = &[
    "Deep breathing can activate the vagus nerve, calming your nervous system.",
    "Writing about your thoughts can reduce anxiety over time.",
];

const CURIOUS: &[&str] = &[
    "Octopuses have three hearts and blue blood.",
    "There are more stars in the universe than grains of sand on Earth.",
];

lazy_static::lazy_static! {
    /// Read-only for the life of the process.
    static ref FACTS: HashMap<MoodCategory, &'static [&'static str]> = HashMap::from([
        (MoodCategory::Energetic, ENERGETIC),
        (MoodCategory::Reflective, REFLECTIVE),
        (MoodCategory::Calm, CALM),
        (MoodCategory::Anxious, ANXIOUS),
        (MoodCategory::Curious, CURIOUS),
    ]);
}

/// Source of uniform indices.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn next_index(&mut self, len: usize) -> usize;
}

/// [`RandomSource`] backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Facts for a mood, falling back to the `Curious` list.
#[must_use]
pub fn facts_for(category: MoodCategory) -> &'static [&'static str] {
    FACTS
        .get(&category)
        .or_else(|| FACTS.get(&MoodCategory::Curious))
        .copied()
        .unwrap_or(CURIOUS)
}

/// Picks one fact for `category`, uniformly at random.
pub fn pick_fact(category: MoodCategory, rng: &mut dyn RandomSource) -> &'static str {
    let facts = facts_for(category);
    let index = rng.next_index(facts.len());
    log::trace!("Picked fact #{index} of {} for `{category}'.", facts.len());
    facts[index.min(facts.len() - 1)]
}

/// Same as [`pick_fact`] but keyed by label. Unknown labels use the
/// `Curious` facts.
pub fn pick_fact_for_label(label: &str, rng: &mut dyn RandomSource) -> &'static str {
    let category = MoodCategory::from_label(label).unwrap_or_else(|| {
        log::debug!("Unknown mood `{label}', falling back to Curious facts.");
        MoodCategory::Curious
    });
    pick_fact(category, rng)
}
