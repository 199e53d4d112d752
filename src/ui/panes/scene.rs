//! Visualization pane
//!
//! Turns the current step's [`Scene`] into a list of styled lines. The pane
//! is a pure function of the scene: no state survives between frames.

use crate::topic::scene::{NodeStatus, Scene, StackFrame, TreeNode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    ))
}

fn empty_marker() -> Line<'static> {
    Line::from(Span::styled(
        "  (empty)",
        Style::default().fg(DEFAULT_THEME.comment),
    ))
}

/// A titled list of entries, newest last
fn section(lines: &mut Vec<Line<'static>>, title: &str, items: &[String], item_style: Style) {
    lines.push(header(title));
    if items.is_empty() {
        lines.push(empty_marker());
    } else {
        for item in items {
            lines.push(Line::from(vec![
                Span::styled("  │ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(item.clone(), item_style),
            ]));
        }
    }
    lines.push(Line::default());
}

fn stack_lines(lines: &mut Vec<Line<'static>>, frames: &[StackFrame]) {
    lines.push(header("Frames (top first)"));
    if frames.is_empty() {
        lines.push(empty_marker());
    }
    for (depth, frame) in frames.iter().enumerate().rev() {
        let is_top = depth + 1 == frames.len();
        let name_style = if is_top {
            Style::default()
                .fg(DEFAULT_THEME.function)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        lines.push(Line::from(vec![
            Span::styled(
                if is_top { "▶ " } else { "  " },
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
            Span::styled(frame.name.clone(), name_style),
        ]));
        for binding in &frame.locals {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(binding.name.clone(), Style::default().fg(DEFAULT_THEME.fg)),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    binding.value.clone(),
                    Style::default().fg(DEFAULT_THEME.number),
                ),
            ]));
        }
    }
    lines.push(Line::default());
}

fn node_style(status: NodeStatus) -> (Style, &'static str) {
    match status {
        NodeStatus::Unchanged => (Style::default().fg(DEFAULT_THEME.fg), ""),
        NodeStatus::Added => (Style::default().fg(DEFAULT_THEME.success), "  + added"),
        NodeStatus::Removed => (
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::CROSSED_OUT),
            "  - removed",
        ),
        NodeStatus::Updated => (Style::default().fg(DEFAULT_THEME.secondary), "  ~ updated"),
        NodeStatus::Visiting => (
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
            "  ◀ comparing",
        ),
    }
}

fn tree_lines(lines: &mut Vec<Line<'static>>, nodes: &[TreeNode]) {
    lines.push(header("Tree"));
    if nodes.is_empty() {
        lines.push(empty_marker());
    }
    for node in nodes {
        let (style, note) = node_style(node.status);
        let indent = if node.depth == 0 {
            String::new()
        } else {
            format!("{}└─ ", "   ".repeat(node.depth - 1))
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", indent), Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(node.label.clone(), style),
            Span::styled(note, style.remove_modifier(Modifier::CROSSED_OUT)),
        ]));
    }
    lines.push(Line::default());
}

/// Build the lines for a scene
pub fn scene_lines(scene: &Scene) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let item = Style::default().fg(DEFAULT_THEME.accent);
    let output = Style::default().fg(DEFAULT_THEME.fg);

    match scene {
        Scene::EventLoop {
            call_stack,
            web_apis,
            microtasks,
            macrotasks,
            console,
        } => {
            let stack: Vec<String> = call_stack.iter().rev().cloned().collect();
            section(&mut lines, "Call stack (top first)", &stack, item);
            section(&mut lines, "Web APIs", web_apis, item);
            section(&mut lines, "Microtask queue", microtasks, item);
            section(&mut lines, "Macrotask queue", macrotasks, item);
            section(&mut lines, "Console", console, output);
        }
        Scene::CallStack { frames, console } => {
            stack_lines(&mut lines, frames);
            section(&mut lines, "Console", console, output);
        }
        Scene::Tree { nodes, patches } => {
            tree_lines(&mut lines, nodes);
            section(&mut lines, "Patches", patches, item);
        }
        Scene::Route {
            url,
            history,
            matched,
            rendered,
        } => {
            lines.push(header("Address bar"));
            lines.push(Line::from(vec![
                Span::styled("  ⟶ ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    url.clone(),
                    Style::default()
                        .fg(DEFAULT_THEME.string)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::default());
            section(&mut lines, "History", history, output);
            section(&mut lines, "Matched routes", matched, item);
            section(
                &mut lines,
                "Rendered",
                rendered,
                Style::default().fg(DEFAULT_THEME.type_name),
            );
        }
    }

    lines
}

/// Render the visualization pane
pub fn render_scene_pane(frame: &mut Frame, area: Rect, scene: &Scene) {
    let block = Block::default()
        .title(format!(" {} ", scene.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let paragraph = Paragraph::new(scene_lines(scene))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(scene: &Scene) -> Vec<String> {
        scene_lines(scene)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_event_loop_stack_is_top_first() {
        let scene = Scene::EventLoop {
            call_stack: vec!["<script>".into(), "console.log".into()],
            web_apis: vec![],
            microtasks: vec![],
            macrotasks: vec![],
            console: vec![],
        };
        let lines = rendered(&scene);
        let top = lines.iter().position(|l| l.contains("console.log")).unwrap();
        let bottom = lines.iter().position(|l| l.contains("<script>")).unwrap();
        assert!(top < bottom);
        assert!(lines.iter().any(|l| l.contains("(empty)")));
    }

    #[test]
    fn test_tree_marks_status() {
        let scene = Scene::Tree {
            nodes: vec![
                TreeNode {
                    label: "<ul>".into(),
                    depth: 0,
                    status: NodeStatus::Unchanged,
                },
                TreeNode {
                    label: "<li>".into(),
                    depth: 1,
                    status: NodeStatus::Added,
                },
            ],
            patches: vec!["insert li".into()],
        };
        let lines = rendered(&scene);
        assert!(lines.iter().any(|l| l.contains("└─ <li>") && l.contains("added")));
        assert!(lines.iter().any(|l| l.contains("insert li")));
    }
}
