use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::generator::Palette;
use crate::swatch::Swatch;
use crate::target::Target;

/// Renders the six target swatches followed by every extracted swatch.
/// The selected swatch gets an info line with its HSL and population.
pub struct PaletteWidget<'a> {
    palette: &'a Palette,
    selected: Option<usize>,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a Palette, selected: Option<usize>) -> Self {
        Self { palette, selected }
    }
}

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn swatch_style(swatch: &Swatch) -> Style {
    Style::default()
        .bg(to_color(swatch.color()))
        .fg(to_color(swatch.label_color()))
}

fn build_target_row(palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for target in Target::ALL {
        let label = format!("{:^14}", target.name());
        match palette.swatch(target) {
            Some(swatch) => spans.push(Span::styled(label, swatch_style(swatch))),
            None => spans.push(Span::styled(label, Style::default().fg(Color::DarkGray))),
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_swatch_row(swatches: &[Swatch], selected: Option<usize>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, swatch) in swatches.iter().enumerate() {
        let mut style = swatch_style(swatch);
        if selected == Some(i) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!("{:^6}", i), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_info_line(index: usize, swatch: &Swatch) -> Line<'static> {
    let hsl = swatch.hsl();
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("  {}  ", swatch.color()), swatch_style(swatch)),
        Span::raw(format!(
            "  #{index}  h {:.0}  s {:.2}  l {:.2}  population {}",
            hsl.hue,
            hsl.saturation,
            hsl.lightness,
            swatch.population()
        )),
    ])
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Palette");
        let inner = block.inner(area);
        block.render(area, buf);

        let swatches = self.palette.swatches();
        let mut lines = vec![
            Line::from("  Targets"),
            build_target_row(self.palette),
            Line::from(""),
            Line::from(format!("  Swatches ({})", swatches.len())),
        ];
        if swatches.is_empty() {
            lines.push(Line::from("  no colors survived filtering"));
        } else {
            lines.push(build_swatch_row(swatches, self.selected));
        }

        if let Some(i) = self.selected {
            if let Some(swatch) = swatches.get(i) {
                lines.push(Line::from(""));
                lines.push(build_info_line(i, swatch));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaletteConfig;
    use crate::pipeline::source::PixelSample;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn renders_targets_and_selected_info() {
        let samples = vec![PixelSample::opaque(200, 40, 40); 10];
        let palette = Palette::generate(&samples, &PaletteConfig::default());
        let area = Rect::new(0, 0, 110, 10);
        let mut buf = Buffer::empty(area);
        PaletteWidget::new(&palette, Some(0)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("vibrant"));
        assert!(text.contains("dark-muted"));
        assert!(text.contains("#c82828"));
        assert!(text.contains("population 10"));
        assert_eq!(buf[(3, 2)].bg, Color::Rgb(200, 40, 40));
    }

    #[test]
    fn renders_empty_palette() {
        let palette = Palette::generate(&[], &PaletteConfig::default());
        let area = Rect::new(0, 0, 110, 8);
        let mut buf = Buffer::empty(area);
        PaletteWidget::new(&palette, None).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("no colors survived filtering"));
    }
}
