//! Transport bar with keybindings and playback state

use crate::playback::Speed;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub current_step: usize,
    pub total_steps: usize,
    /// Fraction of the sequence reached, `0.0..=1.0`
    pub progress: f64,
    pub is_playing: bool,
    pub speed: Speed,
}

/// Step counter with completion percentage, e.g. ` Step 3/5 · 50% `
fn step_label(current: usize, total: usize, progress: f64) -> String {
    format!(
        " Step {}/{} · {:.0}% ",
        current,
        total,
        (progress * 100.0).clamp(0.0, 100.0)
    )
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let bar = Style::default().bg(DEFAULT_THEME.bar_bg);

    // Left side: step counter, speed and last message
    let left_spans = vec![
        Span::styled(
            step_label(data.current_step, data.total_steps, data.progress),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", data.speed), bar.fg(DEFAULT_THEME.secondary)),
        Span::styled("│", bar.fg(DEFAULT_THEME.comment)),
        Span::styled(format!(" {} ", data.message), bar.fg(DEFAULT_THEME.fg)),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(bar)
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds, then a state badge
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = bar.fg(DEFAULT_THEME.fg);
    let sep_style = bar.fg(DEFAULT_THEME.comment);

    let bindings = [
        (" ⎵ ", " play "),
        (" ←/→ ", " step "),
        (" 1-9 ", " seek "),
        (" +/- ", " speed "),
        (" r ", " reset "),
        (" tab ", " topic "),
        (" q ", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (idx, (key, desc)) in bindings.iter().enumerate() {
        if idx > 0 {
            right_spans.push(Span::styled("│", sep_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let (badge, badge_color) = if data.is_playing {
        (" ▶ PLAYING ", DEFAULT_THEME.secondary)
    } else if data.current_step >= data.total_steps {
        (" END ", DEFAULT_THEME.error)
    } else if data.current_step <= 1 {
        (" START ", DEFAULT_THEME.success)
    } else {
        (" ❚❚ PAUSED ", DEFAULT_THEME.comment)
    };

    right_spans.push(Span::styled("│", sep_style));
    right_spans.push(Span::styled(
        badge,
        Style::default()
            .bg(badge_color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    ));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(bar)
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
