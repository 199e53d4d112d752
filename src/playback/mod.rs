//! Step playback: the controller, its timer queue, clocks and speeds.
//!
//! - [`controller`]: the play/pause/seek state machine
//! - [`timer`]: deadline-ordered queue with cancel tokens
//! - [`clock`]: real and manual time sources
//! - [`speed`]: the supported speed multipliers

pub mod clock;
pub mod controller;
pub mod speed;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use controller::{PlaybackController, PlaybackState};
pub use speed::{Speed, SpeedError};
pub use timer::{TimerQueue, TimerToken};
