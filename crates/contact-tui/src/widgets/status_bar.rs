//! Status bar — bottom line with the popup mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ALTERNATE, C_MUTED, C_SECONDARY};

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, has_alternate: bool) {
    let label = Span::styled(
        " PICK ",
        Style::default().fg(C_SECONDARY).add_modifier(Modifier::BOLD),
    );

    let mut spans = vec![
        label,
        Span::styled(
            " ↑↓/jk select  Enter pick  ",
            Style::default().fg(C_MUTED),
        ),
    ];
    if has_alternate {
        spans.push(Span::styled("→/Tab", Style::default().fg(C_ALTERNATE)));
        spans.push(Span::styled(" alternate  ", Style::default().fg(C_MUTED)));
    }
    spans.push(Span::styled(
        "y copy  ? help  Esc dismiss",
        Style::default().fg(C_MUTED),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
