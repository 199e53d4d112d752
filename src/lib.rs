//! # Introduction
//!
//! conceptty plays scripted, step-based animations of programming concepts
//! (the event loop, the call stack, list reconciliation, client-side routing)
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Topic JSON → Catalog → StepSequence → PlaybackController → TUI panes
//! ```
//!
//! 1. [`topic`]: topic documents, validation, and the [`topic::Catalog`]
//!    that serves each topic's immutable [`topic::StepSequence`].
//! 2. [`playback`]: the [`playback::PlaybackController`] state machine that
//!    moves a cursor through a sequence, by hand or on a timer, with
//!    cancel-safe scheduling.
//! 3. [`ui`]: the code pane, the scene pane and the transport bar; each only
//!    reads the controller's current step.
//! 4. [`config`] and [`logging`]: command line and log setup for the binary.

pub mod config;
pub mod logging;
pub mod playback;
pub mod topic;
pub mod ui;
