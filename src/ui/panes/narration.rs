//! Step title, explanation and a row of progress dots

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// What the narration pane shows
pub struct NarrationRenderData<'a> {
    pub topic_title: &'a str,
    pub step_title: &'a str,
    pub explanation: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
}

/// One dot per step: filled up to the current one
fn progress_dots(current: usize, total: usize) -> Line<'static> {
    let spans: Vec<Span> = (1..=total)
        .map(|n| {
            if n == current {
                Span::styled(
                    "● ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else if n < current {
                Span::styled("● ", Style::default().fg(DEFAULT_THEME.primary))
            } else {
                Span::styled("○ ", Style::default().fg(DEFAULT_THEME.comment))
            }
        })
        .collect();
    Line::from(spans)
}

pub fn render_narration_pane(frame: &mut Frame, area: Rect, data: &NarrationRenderData) {
    let block = Block::default()
        .title(format!(" {} ", data.topic_title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let lines = vec![
        progress_dots(data.current_step, data.total_steps),
        Line::default(),
        Line::from(Span::styled(
            format!("{}. {}", data.current_step, data.step_title),
            Style::default()
                .fg(DEFAULT_THEME.function)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            data.explanation.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
