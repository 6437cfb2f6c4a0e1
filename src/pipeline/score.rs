use std::cmp::Ordering;

use crate::swatch::Swatch;
use crate::target::{TargetProfile, TargetTable};

/// Selected swatch index per target, in [`crate::target::Target::ALL`] order.
pub type Selection = [Option<usize>; 6];

/// Weighted closeness of `swatch` to `profile`, or `None` when the swatch
/// falls outside the profile's saturation or lightness bounds.
pub fn score(swatch: &Swatch, profile: &TargetProfile, max_population: u64) -> Option<f32> {
    let hsl = swatch.hsl();
    if !profile.accepts(hsl.saturation, hsl.lightness) {
        return None;
    }
    let saturation = profile.saturation.closeness(hsl.saturation);
    let lightness = profile.lightness.closeness(hsl.lightness);
    let population = if max_population == 0 {
        0.0
    } else {
        (swatch.population() as f32 / max_population as f32).clamp(0.0, 1.0)
    };
    let w = &profile.weights;
    Some(w.saturation * saturation + w.lightness * lightness + w.population * population)
}

/// Pick the best eligible swatch for every target.
///
/// Highest score wins; ties go to the larger population, then the earlier
/// swatch. With `exclusive` set, a swatch taken by an earlier target is not
/// offered to later ones.
pub fn select_targets(swatches: &[Swatch], targets: &TargetTable, exclusive: bool) -> Selection {
    let max_population = swatches.iter().map(Swatch::population).max().unwrap_or(0);
    let mut selection: Selection = [None; 6];

    for (t, (target, profile)) in targets.iter().enumerate() {
        let mut best: Option<(usize, f32)> = None;
        for (i, swatch) in swatches.iter().enumerate() {
            if exclusive && selection[..t].contains(&Some(i)) {
                continue;
            }
            let Some(value) = score(swatch, profile, max_population) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((j, best_value)) => match value.total_cmp(&best_value) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    Ordering::Equal => swatch.population() > swatches[j].population(),
                },
            };
            if better {
                best = Some((i, value));
            }
        }

        match best {
            Some((i, value)) => log::debug!(
                "{target}: swatch {i} ({}) score {value:.3}",
                swatches[i].color()
            ),
            None => log::debug!("{target}: no eligible swatch"),
        }
        selection[t] = best.map(|(i, _)| i);
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::target::{Target, Weights};

    fn slot(target: Target) -> usize {
        Target::ALL.iter().position(|&t| t == target).unwrap()
    }

    #[test]
    fn saturated_red_is_vibrant_only() {
        let swatches = [Swatch::new(Color::new(200, 40, 40), 10_000)];
        let selection = select_targets(&swatches, &TargetTable::default(), false);
        assert_eq!(selection[slot(Target::Vibrant)], Some(0));
        for target in [
            Target::LightVibrant,
            Target::DarkVibrant,
            Target::Muted,
            Target::LightMuted,
            Target::DarkMuted,
        ] {
            assert_eq!(selection[slot(target)], None, "{target}");
        }
    }

    #[test]
    fn empty_swatch_list_selects_nothing() {
        assert_eq!(
            select_targets(&[], &TargetTable::default(), false),
            [None; 6]
        );
    }

    #[test]
    fn ineligible_swatch_is_never_selected() {
        // Gray has zero saturation: never vibrant, however populous.
        let swatches = [Swatch::new(Color::new(128, 128, 128), 1_000_000)];
        let profile = TargetProfile::default_for(Target::Vibrant);
        assert_eq!(score(&swatches[0], &profile, 1_000_000), None);
        let selection = select_targets(&swatches, &TargetTable::default(), false);
        assert_eq!(selection[slot(Target::Vibrant)], None);
        assert_eq!(selection[slot(Target::Muted)], Some(0));
    }

    #[test]
    fn closer_swatch_beats_more_populous_one() {
        // Both vibrant; the second sits right on the target lightness and is
        // fully saturated.
        let swatches = [
            Swatch::new(Color::new(200, 40, 40), 100),
            Swatch::new(Color::new(255, 0, 0), 60),
        ];
        let selection = select_targets(&swatches, &TargetTable::default(), false);
        assert_eq!(selection[slot(Target::Vibrant)], Some(1));
    }

    #[test]
    fn population_weight_breaks_close_calls() {
        let only_population = TargetProfile::new(
            [0.35, 1.0, 1.0],
            [0.3, 0.5, 0.7],
            Weights::new(0.0, 0.0, 1.0).unwrap(),
        )
        .unwrap();
        let mut table = TargetTable::default();
        table.set(Target::Vibrant, only_population);
        let swatches = [
            Swatch::new(Color::new(255, 0, 0), 10),
            Swatch::new(Color::new(200, 40, 40), 90),
        ];
        let selection = select_targets(&swatches, &table, false);
        assert_eq!(selection[slot(Target::Vibrant)], Some(1));
    }

    #[test]
    fn equal_scores_prefer_population_then_order() {
        let zero = TargetProfile::new(
            [0.0, 0.5, 1.0],
            [0.0, 0.5, 1.0],
            Weights::new(0.0, 0.0, 0.0).unwrap(),
        )
        .unwrap();
        let mut table = TargetTable::default();
        table.set(Target::Vibrant, zero);
        let swatches = [
            Swatch::new(Color::new(10, 200, 30), 5),
            Swatch::new(Color::new(200, 10, 30), 7),
            Swatch::new(Color::new(30, 10, 200), 7),
        ];
        let selection = select_targets(&swatches, &table, false);
        assert_eq!(selection[slot(Target::Vibrant)], Some(1));
    }

    #[test]
    fn shared_selection_when_not_exclusive() {
        // One swatch that satisfies two overlapping custom profiles.
        let wide = TargetProfile::new(
            [0.0, 0.5, 1.0],
            [0.0, 0.5, 1.0],
            Weights::default(),
        )
        .unwrap();
        let mut table = TargetTable::default();
        table.set(Target::Vibrant, wide);
        table.set(Target::LightVibrant, wide);
        let swatches = [Swatch::new(Color::new(200, 40, 40), 1)];

        let shared = select_targets(&swatches, &table, false);
        assert_eq!(shared[slot(Target::Vibrant)], Some(0));
        assert_eq!(shared[slot(Target::LightVibrant)], Some(0));

        let exclusive = select_targets(&swatches, &table, true);
        assert_eq!(exclusive[slot(Target::Vibrant)], Some(0));
        assert_eq!(exclusive[slot(Target::LightVibrant)], None);
    }

    #[test]
    fn selected_swatches_respect_bounds() {
        let swatches: Vec<Swatch> = (0..=10u8)
            .flat_map(|i| {
                let v = i * 25;
                [
                    Swatch::new(Color::new(v, 255 - v, 128), u64::from(i) + 1),
                    Swatch::new(Color::new(v, v / 2, v / 3), 11 - u64::from(i)),
                ]
            })
            .collect();
        let table = TargetTable::default();
        let selection = select_targets(&swatches, &table, false);
        for ((target, profile), picked) in table.iter().zip(selection) {
            if let Some(i) = picked {
                let hsl = swatches[i].hsl();
                assert!(
                    profile.accepts(hsl.saturation, hsl.lightness),
                    "{target} picked out-of-bounds swatch {hsl:?}"
                );
            }
        }
    }
}
