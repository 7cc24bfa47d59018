use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::events::{self, DdayEvent};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Name,
    Date,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Date,
            FormField::Date => FormField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub mode: FormMode,
    pub name: String,
    pub date: String,
    pub active_field: FormField,
}

impl FormState {
    /// Empty add form with the date field pre-filled with today.
    pub fn add(today: NaiveDate) -> Self {
        Self {
            mode: FormMode::Add,
            name: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            active_field: FormField::Name,
        }
    }

    pub fn edit(event: &DdayEvent) -> Self {
        Self {
            mode: FormMode::Edit { id: event.id.clone() },
            name: event.name.clone(),
            date: event.date.clone(),
            active_field: FormField::Name,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.active_field {
            FormField::Name => self.name.push(c),
            FormField::Date => self.date.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.active_field {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Date => {
                self.date.pop();
            }
        }
    }

    pub fn tab(&mut self) {
        self.active_field = self.active_field.next();
    }

    /// Name must be non-blank and the date well-shaped (after trimming, as
    /// submitted). Submit on an invalid form is a silent no-op: the dialog
    /// stays open and shows no message.
    pub fn is_valid(&self) -> bool {
        events::valid_name(&self.name) && events::valid_date(self.date.trim())
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &FormState) {
        let form_w = area.width.min(44).max(26);
        let form_h = area.height.min(8).max(6);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let title = match state.mode {
            FormMode::Add => " Add D-Day Event ",
            FormMode::Edit { .. } => " Edit D-Day Event ",
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // name
            Constraint::Length(1), // date
            Constraint::Length(1), // spacer
            Constraint::Length(1), // help
            Constraint::Min(0),
        ])
        .split(inner);

        render_field(frame, rows[0], "Name:", &state.name, state.active_field == FormField::Name);
        render_field(frame, rows[1], "Date:", &state.date, state.active_field == FormField::Date);

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Field ", theme::current().dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", theme::current().dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", theme::current().dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[3]);
    }
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let cursor = if active { "_" } else { "" };
    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!("{:<6}", label), theme::current().dim),
        Span::styled(format!("{}{}", value, cursor), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
