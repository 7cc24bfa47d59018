use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme;

/// Which region of the panel bar holds the countdown label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPosition {
    Left,
    Center,
    Right,
}

impl PanelPosition {
    /// Map the stored `panel-position` value; anything unrecognized falls
    /// back to the right region.
    pub fn from_key(value: &str) -> Self {
        match value {
            "left" => PanelPosition::Left,
            "center" => PanelPosition::Center,
            _ => PanelPosition::Right,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            PanelPosition::Left => "left",
            PanelPosition::Center => "center",
            PanelPosition::Right => "right",
        }
    }

    pub fn next(self) -> Self {
        match self {
            PanelPosition::Left => PanelPosition::Center,
            PanelPosition::Center => PanelPosition::Right,
            PanelPosition::Right => PanelPosition::Left,
        }
    }
}

pub struct Panel;

impl Panel {
    /// Render the one-line panel bar with the countdown label placed in the
    /// region given by `position`, inset by `index` cells (-1 = region
    /// default edge).
    pub fn render(frame: &mut Frame, area: Rect, label: &str, position: PanelPosition, index: i64) {
        let w = area.width as usize;
        let label_w = label.chars().count();

        let x = label_x(w, label_w, position, index);
        let left_pad = " ".repeat(x);
        let right_pad = " ".repeat(w.saturating_sub(x + label_w));

        let line = Line::from(vec![
            Span::styled(left_pad, theme::current().panel),
            Span::styled(label.to_string(), theme::current().label),
            Span::styled(right_pad, theme::current().panel),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn label_x(w: usize, label_w: usize, position: PanelPosition, index: i64) -> usize {
    let inset = index.max(0) as usize;
    let max_x = w.saturating_sub(label_w);

    let x = match position {
        PanelPosition::Left => inset,
        PanelPosition::Center => (max_x / 2).saturating_add(inset),
        PanelPosition::Right => max_x.saturating_sub(inset),
    };
    x.min(max_x)
}
