use crate::color::{Color, HslColor, BLACK, WHITE};

/// Relative luminance above which black text reads better than white.
const LABEL_LUMINANCE_THRESHOLD: f32 = 0.179;

/// A representative color and the number of sampled pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    color: Color,
    population: u64,
    hsl: HslColor,
}

impl Swatch {
    pub fn new(color: Color, population: u64) -> Self {
        Self {
            color,
            population,
            hsl: color.to_hsl(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn hsl(&self) -> HslColor {
        self.hsl
    }

    /// Black or white, whichever is more legible on top of this swatch.
    pub fn label_color(&self) -> Color {
        if self.color.relative_luminance() > LABEL_LUMINANCE_THRESHOLD {
            BLACK
        } else {
            WHITE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_black_on_light_swatch() {
        let swatch = Swatch::new(Color::new(240, 220, 120), 1);
        assert_eq!(swatch.label_color(), BLACK);
    }

    #[test]
    fn label_is_white_on_dark_swatch() {
        let swatch = Swatch::new(Color::new(40, 30, 90), 1);
        assert_eq!(swatch.label_color(), WHITE);
    }

    #[test]
    fn label_maximizes_contrast() {
        for color in [
            Color::new(200, 40, 40),
            Color::new(30, 160, 90),
            Color::new(120, 120, 120),
            Color::new(90, 140, 230),
        ] {
            let swatch = Swatch::new(color, 1);
            let label = swatch.label_color();
            let other = if label == BLACK { WHITE } else { BLACK };
            assert!(
                Color::contrast_ratio(&label, &color) >= Color::contrast_ratio(&other, &color),
                "{color}: label {label} has less contrast than {other}"
            );
        }
    }

    #[test]
    fn hsl_is_precomputed_from_color() {
        let swatch = Swatch::new(Color::new(200, 40, 40), 10);
        assert_eq!(swatch.hsl(), Color::new(200, 40, 40).to_hsl());
        assert_eq!(swatch.population(), 10);
    }
}
