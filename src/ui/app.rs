//! Main TUI application state and logic

use crate::playback::{PlaybackController, Speed};
use crate::topic::{Catalog, Scene, Topic, TopicError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Upper bound on how long the loop blocks waiting for input
const INPUT_POLL: Duration = Duration::from_millis(50);

/// The main application state
pub struct App {
    catalog: Catalog,

    /// Topic on screen
    topic: Arc<Topic>,

    /// Playback session for `topic`; replaced (and disposed) on topic switch
    session: PlaybackController<Scene>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Open `topic_id` from `catalog` at the given speed
    pub fn new(catalog: Catalog, topic_id: &str, speed: Speed) -> Result<Self, TopicError> {
        let topic = catalog.topic(topic_id)?;
        let mut session = PlaybackController::new(Arc::clone(&topic.sequence));
        session.set_speed(speed);

        Ok(App {
            catalog,
            topic,
            session,
            should_quit: false,
            status_message: String::from("Ready!"),
        })
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn session(&self) -> &PlaybackController<Scene> {
        &self.session
    }

    /// Start autoplay
    pub fn play(&mut self) {
        self.session.play();
        self.status_message = "Playing...".to_string();
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            if self.session.poll() && !self.session.is_playing() {
                self.status_message = "Playback complete".to_string();
            }

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Wake up in time for the next scheduled advance
            let timeout = self
                .session
                .time_until_advance()
                .map_or(INPUT_POLL, |wait| wait.min(INPUT_POLL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left: narration (top) | code (bottom). Right: scene.
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(0)])
            .split(columns[0]);

        let step = self.session.current_step();

        super::panes::render_narration_pane(
            frame,
            left_rows[0],
            &super::panes::NarrationRenderData {
                topic_title: &self.topic.title,
                step_title: &step.title,
                explanation: &step.explanation,
                current_step: self.session.current_index(),
                total_steps: self.session.len(),
            },
        );

        super::panes::render_code_pane(
            frame,
            left_rows[1],
            &self.topic.source,
            &self.topic.language,
            self.session.current_highlighted_lines(),
        );

        super::panes::render_scene_pane(frame, columns[1], self.session.current_payload());

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &super::panes::StatusRenderData {
                message: &self.status_message,
                current_step: self.session.current_index(),
                total_steps: self.session.len(),
                progress: self.session.progress(),
                is_playing: self.session.is_playing(),
                speed: self.session.speed(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.session.toggle();
                self.status_message = if self.session.is_playing() {
                    "Playing...".to_string()
                } else {
                    "Paused".to_string()
                };
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.status_message = if self.session.next() {
                    "Stepped forward".to_string()
                } else {
                    "Already at the last step".to_string()
                };
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.status_message = if self.session.prev() {
                    "Stepped backward".to_string()
                } else {
                    "Already at the first step".to_string()
                };
            }
            // Number keys jump straight to a step
            KeyCode::Char(c @ '1'..='9') => {
                let requested = c.to_digit(10).map_or(1, |d| d as usize);
                let reached = self.session.seek(requested);
                self.status_message = format!("Jumped to step {}", reached);
            }
            KeyCode::Home | KeyCode::Backspace | KeyCode::Char('r') => {
                self.session.reset();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::End | KeyCode::Enter => {
                let last = self.session.len();
                self.session.seek(last);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.session.set_speed(self.session.speed().faster());
                self.status_message = format!("Speed {}", self.session.speed());
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.session.set_speed(self.session.speed().slower());
                self.status_message = format!("Speed {}", self.session.speed());
            }
            KeyCode::Tab | KeyCode::Char('n') => self.switch_topic(1),
            KeyCode::BackTab | KeyCode::Char('p') => self.switch_topic(-1),
            _ => {}
        }
    }

    /// Replace the session with a fresh one for a neighbouring topic.
    ///
    /// The old session is disposed first so its pending advance can never
    /// touch the new one. Speed carries over; position does not.
    fn switch_topic(&mut self, offset: isize) {
        let Some(next_id) = self.catalog.neighbour(&self.topic.id, offset) else {
            return;
        };
        let Ok(topic) = self.catalog.topic(next_id) else {
            return;
        };

        let speed = self.session.speed();
        let mut session = PlaybackController::new(Arc::clone(&topic.sequence));
        session.set_speed(speed);
        std::mem::replace(&mut self.session, session).dispose();

        info!(id = %topic.id, "switched topic");
        self.status_message = format!("Opened {}", topic.title);
        self.topic = topic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app() -> App {
        App::new(Catalog::builtin().unwrap(), "event-loop", Speed::Normal).unwrap()
    }

    #[test]
    fn test_unknown_topic_rejected() {
        let result = App::new(Catalog::builtin().unwrap(), "no-such-topic", Speed::Normal);
        assert!(matches!(result, Err(TopicError::UnknownTopic(_))));
    }

    #[test]
    fn test_space_toggles_playback() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session().is_playing());
        assert_eq!(app.session().pending_advances(), 1);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.session().is_playing());
        assert_eq!(app.session().pending_advances(), 0);
    }

    #[test]
    fn test_digit_seeks_and_clamps() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session().current_index(), 3);
        assert!(!app.session().is_playing());

        let mut app = App::new(Catalog::builtin().unwrap(), "reconciliation", Speed::Normal).unwrap();
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session().current_index(), app.session().len());
    }

    #[test]
    fn test_arrows_step_and_stop_at_bounds() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().current_index(), 1);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().current_index(), 3);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().current_index(), app.session().len());
    }

    #[test]
    fn test_speed_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.session().speed(), Speed::OneAndHalf);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.session().speed(), Speed::Half);
    }

    #[test]
    fn test_topic_switch_starts_fresh_session() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('4'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session().is_playing());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.topic().id, "call-stack");
        assert_eq!(app.session().current_index(), 1);
        assert!(!app.session().is_playing());
        assert_eq!(app.session().pending_advances(), 0);
        assert_eq!(app.session().speed(), Speed::OneAndHalf);

        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.topic().id, "client-routing");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
