use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::dday;
use crate::events::DdayEvent;
use crate::theme;

/// Popup menu over the panel: one row per event with its live countdown
/// text, a dot ornament on the selected event, and a trailing "Add" row.
/// The cursor index ranges over `0..=events.len()`, the last slot being the
/// Add row.
pub struct EventMenu;

impl EventMenu {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        events: &[DdayEvent],
        selected_id: &str,
        cursor: usize,
    ) {
        let menu_w = area.width.min(44).max(24);
        let menu_h = (events.len() as u16 + 6).min(area.height).max(7);
        let x = area.x + (area.width.saturating_sub(menu_w)) / 2;
        let y = area.y + u16::from(area.height > menu_h);
        // A tiny terminal must not push the popup out of the frame
        let menu_area = Rect::new(x, y, menu_w, menu_h).intersection(area);

        frame.render_widget(Clear, menu_area);

        let block = Block::default()
            .title(" D-Day Events ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(menu_area);
        frame.render_widget(block, menu_area);

        let inner_w = inner.width as usize;
        let mut items: Vec<ListItem> = Vec::new();

        if events.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                " No events yet",
                theme::current().dim,
            ))));
        }

        for (i, event) in events.iter().enumerate() {
            let ornament = if event.id == selected_id { "\u{25cf} " } else { "  " };
            let text = dday::compute(&event.name, &event.date);
            let row_style = if i == cursor {
                theme::current().selected
            } else {
                Style::default()
            };

            items.push(ListItem::new(Line::from(vec![
                Span::styled(ornament.to_string(), row_style),
                Span::styled(truncate(&text, inner_w.saturating_sub(2)), row_style),
            ])));
        }

        items.push(ListItem::new(Line::from(Span::styled(
            "\u{2500}".repeat(inner_w),
            theme::current().dim,
        ))));

        let add_style = if cursor == events.len() {
            theme::current().selected
        } else {
            Style::default()
        };
        items.push(ListItem::new(Line::from(Span::styled(
            "+ Add D-Day",
            add_style,
        ))));

        let list = List::new(items);
        frame.render_widget(list, inner);

        // Key hints on the bottom border line
        let hints = " Enter:Select e:Edit d:Del Esc:Close ";
        if (hints.len() as u16) < menu_area.width && menu_area.height > 1 {
            let hint_area = Rect::new(
                menu_area.x + 1,
                menu_area.y + menu_area.height - 1,
                hints.len() as u16,
                1,
            );
            frame.render_widget(
                Paragraph::new(Span::styled(hints, theme::current().dim)),
                hint_area,
            );
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{}...", cut)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("Launch D-5", 20), "Launch D-5");
        assert_eq!(truncate("A very long event name D-100", 10), "A very ...");
    }

    #[test]
    fn renders_inside_a_tiny_terminal() {
        use ratatui::{backend::TestBackend, Terminal};

        let events = vec![DdayEvent {
            id: "a1".into(),
            name: "Launch".into(),
            date: "2999-01-01".into(),
        }];

        // Smaller than the popup's minimum size; the clamped rect must keep
        // every widget inside the frame.
        let mut terminal = Terminal::new(TestBackend::new(10, 3)).unwrap();
        terminal
            .draw(|frame| EventMenu::render(frame, frame.area(), &events, "a1", 0))
            .unwrap();
    }
}
