//! Mood classification from averaged audio features.
//!
//! Two numbers go in (valence and energy, both nominally in `[0, 1]`), one
//! of five moods comes out. The rules are checked in a fixed order and the
//! first match wins. They do not tile the unit square: whatever falls
//! between the rule regions is `Curious`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodCategory {
    Energetic,
    Reflective,
    Calm,
    Anxious,
    Curious,
}

impl MoodCategory {
    pub const ALL: [MoodCategory; 5] = [
        MoodCategory::Energetic,
        MoodCategory::Reflective,
        MoodCategory::Calm,
        MoodCategory::Anxious,
        MoodCategory::Curious,
    ];

    /// Label shown in the mood field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MoodCategory::Energetic => "Energetic",
            MoodCategory::Reflective => "Reflective",
            MoodCategory::Calm => "Calm",
            MoodCategory::Anxious => "Anxious",
            MoodCategory::Curious => "Curious",
        }
    }

    /// Case-insensitive inverse of [`MoodCategory::label`].
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mood| mood.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for MoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Valence/energy pair for one track, as reported by the streaming API.
///
/// Values are not range-checked locally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub valence: f64,
    pub energy: f64,
}

/// Maps a (valence, energy) pair to a mood.
///
/// Total: out-of-range values and NaN go through the same rule order
/// (NaN fails every comparison and lands on `Curious`).
///
/// ```
/// use moodfacts::mood::{classify, MoodCategory};
///
/// assert_eq!(classify(0.8, 0.8), MoodCategory::Energetic);
/// assert_eq!(classify(0.65, 0.3), MoodCategory::Curious);
/// ```
#[must_use]
pub fn classify(valence: f64, energy: f64) -> MoodCategory {
    if valence > 0.6 && energy > 0.6 {
        MoodCategory::Energetic
    } else if valence < 0.4 && energy < 0.4 {
        MoodCategory::Reflective
    } else if valence < 0.5 && energy > 0.5 {
        MoodCategory::Anxious
    } else if valence > 0.7 && energy < 0.5 {
        MoodCategory::Calm
    } else {
        MoodCategory::Curious
    }
}

/// Arithmetic mean of valence and of energy. `None` for an empty slice.
#[must_use]
pub fn average_features(features: &[AudioFeatures]) -> Option<AudioFeatures> {
    if features.is_empty() {
        return None;
    }

    let count = features.len() as f64;
    let (valence_sum, energy_sum) = features
        .iter()
        .fold((0.0, 0.0), |(v, e), sample| (v + sample.valence, e + sample.energy));

    Some(AudioFeatures {
        valence: valence_sum / count,
        energy: energy_sum / count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_classify_reference_points() {
        assert_eq!(classify(0.8, 0.8), MoodCategory::Energetic);
        assert_eq!(classify(0.2, 0.2), MoodCategory::Reflective);
        assert_eq!(classify(0.3, 0.7), MoodCategory::Anxious);
        assert_eq!(classify(0.9, 0.3), MoodCategory::Calm);
        assert_eq!(classify(0.5, 0.5), MoodCategory::Curious);
    }

    #[test]
    fn test_classify_rules_read_literally() {
        // Energy 0.55 misses the Energetic bound and valence 0.65 misses
        // both Anxious and Calm.
        assert_eq!(classify(0.65, 0.55), MoodCategory::Curious);
        assert_eq!(classify(0.65, 0.65), MoodCategory::Energetic);
        assert_eq!(classify(0.35, 0.35), MoodCategory::Reflective);
        assert_eq!(classify(0.45, 0.55), MoodCategory::Anxious);
        assert_eq!(classify(0.35, 0.45), MoodCategory::Curious);
    }

    #[test]
    fn test_classify_gap_falls_through_to_curious() {
        assert_eq!(classify(0.65, 0.3), MoodCategory::Curious);
        assert_eq!(classify(0.7, 0.3), MoodCategory::Curious);
    }

    #[test]
    fn test_classify_boundaries_are_strict() {
        assert_eq!(classify(0.6, 0.9), MoodCategory::Curious);
        assert_eq!(classify(0.4, 0.1), MoodCategory::Curious);
        assert_eq!(classify(0.1, 0.5), MoodCategory::Curious);
        assert_eq!(classify(0.9, 0.5), MoodCategory::Curious);
    }

    #[test]
    fn test_classify_accepts_any_input() {
        assert_eq!(classify(f64::NAN, 0.9), MoodCategory::Curious);
        assert_eq!(classify(2.0, 2.0), MoodCategory::Energetic);
        assert_eq!(classify(-1.0, -1.0), MoodCategory::Reflective);
    }

    #[test]
    fn test_classify_grid_hits_every_mood() {
        let mut seen = std::collections::HashSet::new();
        for v in 0..=20 {
            for e in 0..=20 {
                seen.insert(classify(f64::from(v) / 20.0, f64::from(e) / 20.0));
            }
        }
        assert_eq!(seen.len(), MoodCategory::ALL.len());
    }

    #[test]
    fn test_average_features() {
        let avg = average_features(&[
            AudioFeatures { valence: 0.2, energy: 0.4 },
            AudioFeatures { valence: 0.6, energy: 0.8 },
        ])
        .expect("non-empty input");

        assert!(approx(avg.valence, 0.4));
        assert!(approx(avg.energy, 0.6));
    }

    #[test]
    fn test_average_features_empty() {
        assert_eq!(average_features(&[]), None);
    }

    #[test]
    fn test_label_round_trip_is_case_insensitive() {
        assert_eq!(MoodCategory::from_label("calm"), Some(MoodCategory::Calm));
        assert_eq!(MoodCategory::from_label(" ANXIOUS "), Some(MoodCategory::Anxious));
        assert_eq!(MoodCategory::from_label("sleepy"), None);
        assert_eq!(MoodCategory::Energetic.to_string(), "Energetic");
    }
}
