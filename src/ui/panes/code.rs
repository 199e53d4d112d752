//! Code pane rendering with highlighted lines
//!
//! Renders the topic's source with a light keyword colouring and a marker
//! on every line the current step highlights. The view scrolls so the first
//! highlighted line sits near the middle of the pane.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Keyword colouring for JavaScript/JSX-like source
fn highlight_source_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Line comments run to the end
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush_word(&mut spans, &mut current_word, false);
            let rest: String = chars[i..].iter().collect();
            spans.push(Span::styled(rest, Style::default().fg(DEFAULT_THEME.comment)));
            break;
        }

        // Strings with any of the three quote styles
        if c == '"' || c == '\'' || c == '`' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            let literal: String = chars[i..end].iter().collect();
            spans.push(Span::styled(literal, Style::default().fg(DEFAULT_THEME.string)));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && c != '$' {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                '<' | '>' => Style::default().fg(DEFAULT_THEME.type_name),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, is_call: bool) {
    if word.is_empty() {
        return;
    }
    spans.push(Span::styled(word.clone(), word_style(word, is_call)));
    word.clear();
}

fn word_style(word: &str, is_call: bool) -> Style {
    match word {
        "function" | "return" | "const" | "let" | "var" | "if" | "else" | "for" | "while"
        | "new" | "async" | "await" | "class" | "import" | "export" | "from" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" | "null" | "undefined" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        _ if is_call => Style::default().fg(DEFAULT_THEME.function),
        _ if word.starts_with(char::is_uppercase) => Style::default().fg(DEFAULT_THEME.type_name),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll offset that keeps `anchor` (1-based) near the middle of the view
fn scroll_offset(anchor: Option<usize>, total_lines: usize, visible_height: usize) -> usize {
    if total_lines <= visible_height {
        return 0;
    }
    let max_scroll = total_lines - visible_height;
    match anchor {
        Some(line) => line
            .saturating_sub(1)
            .saturating_sub(visible_height / 2)
            .min(max_scroll),
        None => 0,
    }
}

/// Render the code pane
pub fn render_code_pane(
    frame: &mut Frame,
    area: Rect,
    source: &[String],
    language: &str,
    highlighted_lines: &[usize],
) {
    let title = if language.is_empty() {
        " Code ".to_string()
    } else {
        format!(" Code ({}) ", language)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let offset = scroll_offset(highlighted_lines.first().copied(), source.len(), visible_height);

    let visible_lines: Vec<Line> = source
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_highlighted = highlighted_lines.binary_search(&line_num).is_ok();

            let (marker, num_style) = if is_highlighted {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content = highlight_source_line(line);
            if is_highlighted {
                let bg = Style::default().bg(DEFAULT_THEME.highlight_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{}{:3} ", marker, line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_highlighting_preserves_text() {
        let src = "  console.log('a // b'); // trailing";
        assert_eq!(text(&highlight_source_line(src)), src);
    }

    #[test]
    fn test_unterminated_string_does_not_overrun() {
        let src = "const s = 'oops";
        assert_eq!(text(&highlight_source_line(src)), src);
    }

    #[test]
    fn test_scroll_centres_anchor() {
        assert_eq!(scroll_offset(Some(3), 10, 20), 0);
        assert_eq!(scroll_offset(Some(50), 100, 20), 39);
        assert_eq!(scroll_offset(Some(100), 100, 20), 80);
        assert_eq!(scroll_offset(None, 100, 20), 0);
    }
}
