use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use typespeed::{
    session::Phase,
    view::{CharClass, SessionView, PLACEHOLDER},
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const TITLE: &str = "⚡ Typing Speed Tester";

/// Colors for the three character classes
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub pending: Style,
    pub correct: Style,
    pub incorrect: Style,
    pub accent: Style,
}

impl Theme {
    pub fn new(high_contrast: bool) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if high_contrast {
            Self {
                pending: Style::default().fg(Color::White),
                correct: bold.fg(Color::LightGreen),
                incorrect: bold.fg(Color::White).bg(Color::Red),
                accent: bold.fg(Color::LightCyan),
            }
        } else {
            Self {
                pending: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                correct: bold.fg(Color::Green),
                incorrect: bold.fg(Color::Red),
                accent: bold.fg(Color::Blue),
            }
        }
    }

    fn for_class(&self, class: CharClass) -> Style {
        match class {
            CharClass::Pending => self.pending,
            CharClass::Correct => self.correct,
            CharClass::Incorrect => self.incorrect,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = SessionView::from(&self.session);
        let theme = &self.theme;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let text_width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
        let reference_height = reference_lines(&view, text_width);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(2),                // title
                Constraint::Length(reference_height), // reference
                Constraint::Length(1),                // padding
                Constraint::Min(3),                   // input
                Constraint::Length(1),                // stats
                Constraint::Length(1),                // padding
                Constraint::Length(1),                // restart
                Constraint::Length(1),                // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(TITLE, theme.accent))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let spans = view
            .reference
            .iter()
            .map(|&(c, class)| {
                let shown = match (c, class) {
                    (' ', CharClass::Incorrect) => "·".to_owned(),
                    (c, _) => c.to_string(),
                };
                Span::styled(shown, theme.for_class(class))
            })
            .collect::<Vec<Span>>();

        // keep spaces that wrap to the start of a row, or colors drift off
        // their typed positions
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(chunks[1], buf);

        render_input(&view, theme, chunks[3], buf);

        let stats = Line::from(vec![
            Span::styled(view.time_left_label(), bold_style),
            Span::raw("   "),
            Span::styled(view.wpm_label(), bold_style),
            Span::raw("   "),
            Span::styled(view.accuracy_label(), bold_style),
        ]);
        Paragraph::new(stats)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        if view.restart_enabled {
            let button = Line::from(vec![
                Span::styled(" Restart ", theme.accent.add_modifier(Modifier::REVERSED)),
                Span::styled("  ctrl+r", dim_style),
            ]);
            Paragraph::new(button)
                .alignment(Alignment::Center)
                .render(chunks[6], buf);
        }

        let legend = match view.phase {
            Phase::Idle => "start typing to begin / (esc)ape",
            Phase::Running => "(enter) finish / (esc)ape",
            Phase::Finished => "finished / (esc)ape",
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
    }
}

fn render_input(view: &SessionView, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let (title, border_style) = if view.input_enabled {
        (" Input ", theme.accent)
    } else {
        (" Input (disabled) ", Style::default().add_modifier(Modifier::DIM))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    let line = if view.input.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))
    } else if view.input_enabled {
        Line::from(vec![
            Span::raw(view.input.as_str()),
            Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
        ])
    } else {
        Line::from(Span::styled(
            view.input.as_str(),
            Style::default().add_modifier(Modifier::DIM),
        ))
    };

    Paragraph::new(line)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

/// Rows the reference needs at `width` columns, with one spare for word wrap.
fn reference_lines(view: &SessionView, width: u16) -> u16 {
    let text: String = view.reference.iter().map(|(c, _)| *c).collect();
    let width = width.max(1) as usize;
    let cols = text.width();

    if cols <= width {
        1
    } else {
        (cols.div_ceil(width) + 1) as u16
    }
}

pub fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
