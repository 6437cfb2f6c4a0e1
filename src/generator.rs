use crate::color::Color;
use crate::config::PaletteConfig;
use crate::pipeline::histogram::build_histogram;
use crate::pipeline::quantize::quantize;
use crate::pipeline::score::{select_targets, Selection};
use crate::pipeline::source::PixelSample;
use crate::swatch::Swatch;
use crate::target::Target;

/// The swatches extracted from an image and the swatch chosen for each target.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    swatches: Vec<Swatch>,
    selection: Selection,
}

impl Palette {
    /// Run the full pipeline synchronously: filter and bucket the samples,
    /// median-cut them into at most `max_colors` swatches, then score the
    /// swatches against every target.
    pub fn generate(samples: &[PixelSample], config: &PaletteConfig) -> Self {
        let histogram = build_histogram(samples, &config.filter);
        let swatches = quantize(&histogram, config.max_colors());
        let selection = select_targets(&swatches, &config.targets, config.exclusive_targets);
        log::info!(
            "generated {} swatches from {} samples",
            swatches.len(),
            samples.len()
        );
        Self {
            swatches,
            selection,
        }
    }

    /// All swatches, in generation order.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn swatch(&self, target: Target) -> Option<&Swatch> {
        let slot = Target::ALL.iter().position(|&t| t == target)?;
        self.selection[slot].map(|i| &self.swatches[i])
    }

    /// The target's color, or `default` when no swatch qualified.
    pub fn color_or(&self, target: Target, default: Color) -> Color {
        self.swatch(target).map_or(default, Swatch::color)
    }

    /// The most populous swatch; the earliest one on ties.
    pub fn dominant_swatch(&self) -> Option<&Swatch> {
        self.swatches
            .iter()
            .reduce(|best, s| if s.population() > best.population() { s } else { best })
    }

    pub fn vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::Vibrant)
    }

    pub fn light_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::LightVibrant)
    }

    pub fn dark_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::DarkVibrant)
    }

    pub fn muted_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::Muted)
    }

    pub fn light_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::LightMuted)
    }

    pub fn dark_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch(Target::DarkMuted)
    }

    pub fn vibrant_color(&self, default: Color) -> Color {
        self.color_or(Target::Vibrant, default)
    }

    pub fn light_vibrant_color(&self, default: Color) -> Color {
        self.color_or(Target::LightVibrant, default)
    }

    pub fn dark_vibrant_color(&self, default: Color) -> Color {
        self.color_or(Target::DarkVibrant, default)
    }

    pub fn muted_color(&self, default: Color) -> Color {
        self.color_or(Target::Muted, default)
    }

    pub fn light_muted_color(&self, default: Color) -> Color {
        self.color_or(Target::LightMuted, default)
    }

    pub fn dark_muted_color(&self, default: Color) -> Color {
        self.color_or(Target::DarkMuted, default)
    }

    /// Serialize to the `key = value` text format, targets first.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for target in Target::ALL {
            match self.swatch(target) {
                Some(s) => out.push_str(&format!("{target} = {}\n", s.color().to_hex())),
                None => out.push_str(&format!("{target} = none\n")),
            }
        }
        for s in &self.swatches {
            out.push_str(&format!(
                "swatch = {} population={}\n",
                s.color().to_hex(),
                s.population()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: Color = Color::new(1, 2, 3);

    #[test]
    fn degenerate_red_image() {
        let samples = vec![PixelSample::opaque(200, 40, 40); 10_000];
        let palette = Palette::generate(&samples, &PaletteConfig::default());

        assert_eq!(palette.swatches().len(), 1);
        assert_eq!(palette.swatches()[0].population(), 10_000);
        assert_eq!(palette.swatches()[0].color(), Color::new(200, 40, 40));

        assert_eq!(
            palette.vibrant_swatch().map(Swatch::color),
            Some(Color::new(200, 40, 40))
        );
        assert!(palette.light_vibrant_swatch().is_none());
        assert!(palette.dark_vibrant_swatch().is_none());
        assert!(palette.muted_swatch().is_none());
        assert!(palette.light_muted_swatch().is_none());
        assert!(palette.dark_muted_swatch().is_none());
        assert_eq!(palette.muted_color(FALLBACK), FALLBACK);
        assert_eq!(palette.vibrant_color(FALLBACK), Color::new(200, 40, 40));
    }

    #[test]
    fn all_white_image_is_empty_not_an_error() {
        let samples = vec![PixelSample::opaque(255, 255, 255); 400];
        let palette = Palette::generate(&samples, &PaletteConfig::default());

        assert!(palette.swatches().is_empty());
        assert!(palette.dominant_swatch().is_none());
        for target in Target::ALL {
            assert!(palette.swatch(target).is_none(), "{target}");
            assert_eq!(palette.color_or(target, FALLBACK), FALLBACK);
        }
        assert_eq!(palette.vibrant_color(FALLBACK), FALLBACK);
        assert_eq!(palette.light_vibrant_color(FALLBACK), FALLBACK);
        assert_eq!(palette.dark_vibrant_color(FALLBACK), FALLBACK);
        assert_eq!(palette.light_muted_color(FALLBACK), FALLBACK);
        assert_eq!(palette.dark_muted_color(FALLBACK), FALLBACK);
    }

    #[test]
    fn dominant_swatch_is_most_populous() {
        let mut samples = vec![PixelSample::opaque(200, 40, 40); 30];
        samples.extend(vec![PixelSample::opaque(40, 40, 200); 70]);
        let palette = Palette::generate(&samples, &PaletteConfig::default());
        assert_eq!(
            palette.dominant_swatch().map(Swatch::color),
            Some(Color::new(40, 40, 200))
        );
    }

    #[test]
    fn serialize_lists_targets_then_swatches() {
        let samples = vec![PixelSample::opaque(200, 40, 40); 10];
        let palette = Palette::generate(&samples, &PaletteConfig::default());
        let expected = "\
vibrant = #c82828
light-vibrant = none
dark-vibrant = none
muted = none
light-muted = none
dark-muted = none
swatch = #c82828 population=10
";
        assert_eq!(palette.serialize(), expected);
    }

    #[test]
    fn generation_is_deterministic() {
        let samples: Vec<PixelSample> = (0..4096u32)
            .map(|i| {
                PixelSample::opaque(
                    (i * 7 % 256) as u8,
                    (i * 13 % 256) as u8,
                    (i * 31 % 256) as u8,
                )
            })
            .collect();
        let config = PaletteConfig::default();
        let first = Palette::generate(&samples, &config);
        let second = Palette::generate(&samples, &config);
        assert_eq!(first, second);
        assert_eq!(first.serialize(), second.serialize());
    }
}
