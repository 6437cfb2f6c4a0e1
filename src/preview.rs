use std::io::Write;

use anyhow::Result;
use crossterm::queue;
use crossterm::style::{Color as TermColor, Print, PrintStyledContent, Stylize};

use crate::color::Color;
use crate::generator::Palette;
use crate::target::Target;

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Print each target and swatch as a colored block with its hex code.
pub fn write_preview<W: Write>(out: &mut W, palette: &Palette) -> Result<()> {
    for target in Target::ALL {
        match palette.swatch(target) {
            Some(swatch) => {
                let label = format!(" {:^14} ", target.name());
                queue!(
                    out,
                    PrintStyledContent(
                        label
                            .with(term_color(swatch.label_color()))
                            .on(term_color(swatch.color()))
                    ),
                    Print(format!(" {}\n", swatch.color()))
                )?;
            }
            None => queue!(out, Print(format!(" {:^14}  none\n", target.name())))?,
        }
    }

    queue!(out, Print("\n"))?;
    for swatch in palette.swatches() {
        queue!(
            out,
            PrintStyledContent("      ".on(term_color(swatch.color()))),
            Print(format!(" {} {:>8}\n", swatch.color(), swatch.population()))
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteConfig;
    use crate::pipeline::source::PixelSample;

    #[test]
    fn preview_mentions_every_target_and_swatch() {
        let mut samples = vec![PixelSample::opaque(200, 40, 40); 20];
        samples.extend(vec![PixelSample::opaque(90, 100, 110); 10]);
        let palette = Palette::generate(&samples, &PaletteConfig::default());

        let mut buf = Vec::new();
        write_preview(&mut buf, &palette).unwrap();
        let text = String::from_utf8(buf).unwrap();

        for target in Target::ALL {
            assert!(text.contains(target.name()), "missing {target}");
        }
        for swatch in palette.swatches() {
            assert!(text.contains(&swatch.color().to_hex()));
        }
        assert!(text.contains("none"));
    }
}
