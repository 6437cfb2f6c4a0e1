pub mod widgets;

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::DefaultTerminal;

use crate::generator::Palette;
use widgets::PaletteWidget;

/// State for the interactive palette viewer.
pub struct TuiApp {
    pub palette: Palette,
    pub image_path: PathBuf,
    pub selected: Option<usize>,
}

impl TuiApp {
    pub fn new(palette: Palette, image_path: PathBuf) -> Self {
        let selected = (!palette.swatches().is_empty()).then_some(0);
        Self {
            palette,
            image_path,
            selected,
        }
    }

    fn select_next(&mut self) {
        let len = self.palette.swatches().len();
        if let Some(i) = self.selected {
            self.selected = Some((i + 1) % len);
        }
    }

    fn select_prev(&mut self) {
        let len = self.palette.swatches().len();
        if let Some(i) = self.selected {
            self.selected = Some((i + len - 1) % len);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [header, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());
        frame.render_widget(
            Paragraph::new(format!(
                " {}   ←/→ select   q quit",
                self.image_path.display()
            )),
            header,
        );
        frame.render_widget(PaletteWidget::new(&self.palette, self.selected), body);
    }
}

/// Launch the TUI application. Returns when the user quits.
pub fn run(app: TuiApp) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, mut app: TuiApp) -> Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Char('l') => app.select_next(),
                KeyCode::Left | KeyCode::Char('h') => app.select_prev(),
                _ => {}
            }
        }
    }
}
