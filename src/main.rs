mod app;
mod components;
mod dday;
mod event;
mod events;
mod logging;
mod settings;
mod theme;
mod timer;
mod tui;

use std::time::Duration;

use app::{App, InputMode};
use chrono::Local;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use timer::MidnightTimer;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    let store = settings::FileStore::open_default()?;
    let mut app = App::new(Box::new(store));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    let mut midnight = MidnightTimer::new();

    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        if let Some(key) = event::next_key_event(Duration::from_millis(250))? {
            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                InputMode::Menu => handle_menu_input(app, key.code),
                InputMode::Form => handle_form_input(app, key.code),
                InputMode::Confirm => handle_confirm_input(app, key.code),
            }
        }

        if midnight.poll(Local::now()) {
            log::info!("midnight refresh");
            app.refresh();
        }

        // Store writes made by the handlers above repaint through here.
        app.process_store_changes();
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('m'), _) | (KeyCode::Enter, _) => app.open_menu(),
        (KeyCode::Char('a'), _) => app.open_add_form(),
        (KeyCode::Char('p'), _) => app.cycle_panel_position(),
        (KeyCode::Char('['), _) => app.nudge_panel_index(-1),
        (KeyCode::Char(']'), _) => app.nudge_panel_index(1),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn handle_menu_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('q') => app.close_menu(),
        KeyCode::Up | KeyCode::Char('k') => app.menu_up(),
        KeyCode::Down | KeyCode::Char('j') => app.menu_down(),
        KeyCode::Enter => app.menu_activate(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('e') => app.open_edit_form(),
        KeyCode::Char('d') => app.request_delete(),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(ref mut form) = app.form {
                form.tab();
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut form) = app.form {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut form) = app.form {
                form.input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Char('y') => app.confirm_delete(),
        KeyCode::Esc | KeyCode::Char('n') => app.cancel_delete(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(1), // panel bar
        Constraint::Min(0),
        Constraint::Length(1), // hint line
    ])
    .split(area);

    components::Panel::render(
        frame,
        layout[0],
        app.display.label(),
        app.panel_position,
        app.panel_index,
    );

    render_hints(frame, layout[2], app);

    if app.input_mode == InputMode::Menu
        || app.input_mode == InputMode::Form
        || app.input_mode == InputMode::Confirm
    {
        components::EventMenu::render(frame, area, &app.events, &app.selected_id, app.menu_cursor);
    }

    if let Some(ref form) = app.form {
        components::EventForm::render(frame, area, form);
    }

    if let Some(ref pending) = app.pending_delete {
        components::ConfirmDelete::render(frame, area, &pending.name);
    }

    if app.show_help {
        render_help(frame, area);
    }
}

fn render_hints(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::text::Span;
    use ratatui::widgets::Paragraph;

    let w = area.width as usize;
    let hints = match app.input_mode {
        InputMode::Normal if w >= 60 => {
            " m:Menu a:Add p:Position [ ]:Index ?:Help q:Quit"
        }
        InputMode::Normal => " m:Menu ?:Help q:Quit",
        _ => "",
    };

    let bar = Paragraph::new(Span::styled(hints, theme::current().dim));
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let popup_w = area.width.min(48).max(30);
    let popup_h = area.height.min(18).max(10);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let desc_style = Style::default();
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Panel", section_style)),
        Line::from(vec![
            Span::styled("  p         ", key_style),
            Span::styled("Cycle label position (left/center/right)", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::styled("Nudge label within its region", desc_style),
        ]),
        Line::from(""),
        Line::from(Span::styled("Events", section_style)),
        Line::from(vec![
            Span::styled("  m", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Enter ", key_style),
            Span::styled("Open the event menu", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  j/k       ", key_style),
            Span::styled("Move in the menu", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::styled("Show this event on the panel", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  a         ", key_style),
            Span::styled("Add a D-Day event", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::styled("Edit the highlighted event", desc_style),
        ]),
        Line::from(vec![
            Span::styled("  d         ", key_style),
            Span::styled("Delete the highlighted event", desc_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme::current().dim),
            Span::styled("Esc     ", key_style),
            Span::styled("Quit / close popup", desc_style),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::DdayEvent;
    use crate::settings::MemoryStore;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn every_overlay_renders_in_a_tiny_terminal() {
        let mut app = App::new(Box::new(MemoryStore::new()));
        app.open_menu();
        app.open_add_form();
        app.pending_delete = Some(DdayEvent {
            id: "a1".into(),
            name: "Launch".into(),
            date: "2999-01-01".into(),
        });
        app.show_help = true;

        // Panel, hint line, menu, form, confirm, and help all stacked into a
        // frame far smaller than any popup's minimum size.
        let mut terminal = Terminal::new(TestBackend::new(7, 2)).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();
    }
}
