use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

pub struct ConfirmDelete;

impl ConfirmDelete {
    pub fn render(frame: &mut Frame, area: Rect, name: &str) {
        let popup_w = area.width.min(40).max(24);
        let popup_h = area.height.min(7).max(5);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Delete Event ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(format!("Delete \"{}\"?", name)),
            Line::from(Span::styled(
                "This action cannot be undone.",
                theme::current().dim,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Delete ", theme::current().dim),
                Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(":Cancel", theme::current().dim),
            ]),
        ];

        let para = Paragraph::new(lines).wrap(Wrap { trim: false });
        frame.render_widget(para, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn renders_inside_a_tiny_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(9, 2)).unwrap();
        terminal
            .draw(|frame| ConfirmDelete::render(frame, frame.area(), "Launch"))
            .unwrap();
    }
}
