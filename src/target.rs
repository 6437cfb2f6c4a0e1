use serde::Deserialize;

use crate::error::ConfigError;

/// The six perceptual roles a palette resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Vibrant,
    LightVibrant,
    DarkVibrant,
    Muted,
    LightMuted,
    DarkMuted,
}

impl Target {
    /// Resolution order used by the scorer.
    pub const ALL: [Target; 6] = [
        Target::Vibrant,
        Target::LightVibrant,
        Target::DarkVibrant,
        Target::Muted,
        Target::LightMuted,
        Target::DarkMuted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Target::Vibrant => "vibrant",
            Target::LightVibrant => "light-vibrant",
            Target::DarkVibrant => "dark-vibrant",
            Target::Muted => "muted",
            Target::LightMuted => "light-muted",
            Target::DarkMuted => "dark-muted",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A `min <= target <= max` triple inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub target: f32,
    pub max: f32,
}

impl Range {
    fn new(field: &'static str, min: f32, target: f32, max: f32) -> Result<Self, ConfigError> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !(in_unit(min) && in_unit(target) && in_unit(max)) || min > target || target > max {
            return Err(ConfigError::InvalidRange {
                field,
                min,
                target,
                max,
            });
        }
        Ok(Self { min, target, max })
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// `1 - |value - target| / span`, where span is the distance from target
    /// to the bound on the value's side. Clamped to `[0, 1]`.
    pub fn closeness(&self, value: f32) -> f32 {
        let span = if value < self.target {
            self.target - self.min
        } else {
            self.max - self.target
        };
        if span <= 0.0 {
            return if value == self.target { 1.0 } else { 0.0 };
        }
        (1.0 - (value - self.target).abs() / span).clamp(0.0, 1.0)
    }
}

/// Relative importance of each scoring criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub saturation: f32,
    pub lightness: f32,
    pub population: f32,
}

impl Weights {
    pub fn new(saturation: f32, lightness: f32, population: f32) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("saturation", saturation),
            ("lightness", lightness),
            ("population", population),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { field, value });
            }
        }
        Ok(Self {
            saturation,
            lightness,
            population,
        })
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            saturation: WEIGHT_SATURATION,
            lightness: WEIGHT_LIGHTNESS,
            population: WEIGHT_POPULATION,
        }
    }
}

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LIGHTNESS: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

const VIBRANT_SATURATION: Range = Range {
    min: 0.35,
    target: 1.0,
    max: 1.0,
};
const MUTED_SATURATION: Range = Range {
    min: 0.0,
    target: 0.3,
    max: 0.4,
};
const LIGHT_LIGHTNESS: Range = Range {
    min: 0.55,
    target: 0.74,
    max: 1.0,
};
const NORMAL_LIGHTNESS: Range = Range {
    min: 0.3,
    target: 0.5,
    max: 0.7,
};
const DARK_LIGHTNESS: Range = Range {
    min: 0.0,
    target: 0.26,
    max: 0.45,
};

/// Scoring criteria for one target role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetProfile {
    pub saturation: Range,
    pub lightness: Range,
    pub weights: Weights,
}

impl TargetProfile {
    /// Build a profile from `[min, target, max]` triples, rejecting any
    /// out-of-order or out-of-range values.
    pub fn new(
        saturation: [f32; 3],
        lightness: [f32; 3],
        weights: Weights,
    ) -> Result<Self, ConfigError> {
        let [s_min, s_target, s_max] = saturation;
        let [l_min, l_target, l_max] = lightness;
        Ok(Self {
            saturation: Range::new("saturation", s_min, s_target, s_max)?,
            lightness: Range::new("lightness", l_min, l_target, l_max)?,
            weights,
        })
    }

    /// Built-in profile for `target`.
    pub fn default_for(target: Target) -> Self {
        let (saturation, lightness) = match target {
            Target::Vibrant => (VIBRANT_SATURATION, NORMAL_LIGHTNESS),
            Target::LightVibrant => (VIBRANT_SATURATION, LIGHT_LIGHTNESS),
            Target::DarkVibrant => (VIBRANT_SATURATION, DARK_LIGHTNESS),
            Target::Muted => (MUTED_SATURATION, NORMAL_LIGHTNESS),
            Target::LightMuted => (MUTED_SATURATION, LIGHT_LIGHTNESS),
            Target::DarkMuted => (MUTED_SATURATION, DARK_LIGHTNESS),
        };
        Self {
            saturation,
            lightness,
            weights: Weights::default(),
        }
    }

    /// Whether a color with this saturation and lightness may be selected.
    pub fn accepts(&self, saturation: f32, lightness: f32) -> bool {
        self.saturation.contains(saturation) && self.lightness.contains(lightness)
    }
}

/// One profile per [`Target`].
#[derive(Debug, Clone, PartialEq)]
pub struct TargetTable {
    profiles: [TargetProfile; 6],
}

impl TargetTable {
    pub fn get(&self, target: Target) -> &TargetProfile {
        &self.profiles[target.index()]
    }

    pub fn set(&mut self, target: Target, profile: TargetProfile) {
        self.profiles[target.index()] = profile;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Target, &TargetProfile)> {
        Target::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

impl Default for TargetTable {
    fn default() -> Self {
        Self {
            profiles: Target::ALL.map(TargetProfile::default_for),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiles_are_ordered() {
        let table = TargetTable::default();
        for (target, profile) in table.iter() {
            for range in [profile.saturation, profile.lightness] {
                assert!(
                    range.min <= range.target && range.target <= range.max,
                    "{target}: {range:?}"
                );
            }
        }
    }

    #[test]
    fn table_lookup_matches_target() {
        let table = TargetTable::default();
        assert_eq!(table.get(Target::DarkMuted).lightness, DARK_LIGHTNESS);
        assert_eq!(table.get(Target::DarkMuted).saturation, MUTED_SATURATION);
        assert_eq!(table.get(Target::LightVibrant).lightness, LIGHT_LIGHTNESS);
    }

    #[test]
    fn rejects_min_above_target() {
        let err = TargetProfile::new([0.5, 0.4, 0.9], [0.0, 0.5, 1.0], Weights::default());
        assert!(matches!(
            err,
            Err(ConfigError::InvalidRange {
                field: "saturation",
                ..
            })
        ));
    }

    #[test]
    fn rejects_target_above_max() {
        let err = TargetProfile::new([0.0, 0.5, 1.0], [0.2, 0.8, 0.6], Weights::default());
        assert!(matches!(
            err,
            Err(ConfigError::InvalidRange {
                field: "lightness",
                ..
            })
        ));
    }

    #[test]
    fn rejects_values_outside_unit_interval() {
        assert!(TargetProfile::new([0.0, 0.5, 1.5], [0.0, 0.5, 1.0], Weights::default()).is_err());
    }

    #[test]
    fn rejects_negative_weight() {
        assert_eq!(
            Weights::new(0.2, -1.0, 0.2),
            Err(ConfigError::InvalidWeight {
                field: "lightness",
                value: -1.0
            })
        );
        assert!(Weights::new(f32::NAN, 0.5, 0.2).is_err());
    }

    #[test]
    fn closeness_peaks_at_target() {
        assert_eq!(NORMAL_LIGHTNESS.closeness(0.5), 1.0);
        assert!((NORMAL_LIGHTNESS.closeness(0.4) - 0.5).abs() < 1e-5);
        assert!((NORMAL_LIGHTNESS.closeness(0.6) - 0.5).abs() < 1e-5);
        assert_eq!(NORMAL_LIGHTNESS.closeness(0.3), 0.0);
        assert_eq!(NORMAL_LIGHTNESS.closeness(0.0), 0.0);
    }

    #[test]
    fn closeness_with_target_at_bound() {
        // Vibrant saturation has target == max.
        assert_eq!(VIBRANT_SATURATION.closeness(1.0), 1.0);
        assert!((VIBRANT_SATURATION.closeness(0.675) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn accepts_is_inclusive() {
        let profile = TargetProfile::default_for(Target::Muted);
        assert!(profile.accepts(0.4, 0.3));
        assert!(profile.accepts(0.0, 0.7));
        assert!(!profile.accepts(0.41, 0.5));
        assert!(!profile.accepts(0.2, 0.71));
    }
}
