//! Step-playback state machine
//!
//! A [`PlaybackController`] is one playback session over a fixed
//! [`StepSequence`]. It moves a 1-based cursor either on demand (transport
//! operations) or under autoplay, where each step stays up for its authored
//! duration divided by the current [`Speed`].
//!
//! # Timer discipline
//!
//! - While playing there is exactly one pending advance; while stopped there
//!   are none.
//! - Every operation that changes the cursor or the play state out of band
//!   cancels the pending advance before mutating anything.
//! - Each (re)schedule issues a fresh [`TimerToken`]. Delivering a token that
//!   is not the current pending one does nothing.
//!
//! Timers only fire from [`PlaybackController::poll`] (or an explicit
//! [`PlaybackController::fire`]), so the controller never runs code behind
//! its owner's back.

use super::clock::{Clock, MonotonicClock};
use super::speed::Speed;
use super::timer::{TimerQueue, TimerToken};
use crate::topic::{Step, StepSequence};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Whether autoplay is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

/// Playback session over one step sequence
#[derive(Debug)]
pub struct PlaybackController<P, C: Clock = MonotonicClock> {
    sequence: Arc<StepSequence<P>>,
    clock: C,
    timers: TimerQueue,

    /// 1-based cursor, always in `1..=sequence.len()`
    current: usize,
    state: PlaybackState,
    speed: Speed,

    /// Token of the single advance allowed to fire
    pending: Option<TimerToken>,
}

impl<P> PlaybackController<P, MonotonicClock> {
    /// Start a session on the real clock
    pub fn new(sequence: Arc<StepSequence<P>>) -> Self {
        Self::with_clock(sequence, MonotonicClock::new())
    }
}

impl<P, C: Clock> PlaybackController<P, C> {
    /// Start a session at step 1, stopped, at 1x
    pub fn with_clock(sequence: Arc<StepSequence<P>>, clock: C) -> Self {
        debug!(steps = sequence.len(), "playback session created");
        PlaybackController {
            sequence,
            clock,
            timers: TimerQueue::new(),
            current: 1,
            state: PlaybackState::Stopped,
            speed: Speed::default(),
            pending: None,
        }
    }

    // ---- transport -------------------------------------------------------

    /// Start autoplay. From the last step, playback restarts at step 1.
    pub fn play(&mut self) {
        self.cancel_pending();
        if self.is_at_end() {
            self.current = 1;
        }
        self.state = PlaybackState::Playing;
        let now = self.clock.now();
        self.schedule_from(now);
        debug!(step = self.current, speed = %self.speed, "play");
    }

    /// Stop autoplay, keeping the current step
    pub fn pause(&mut self) {
        self.cancel_pending();
        self.state = PlaybackState::Stopped;
        debug!(step = self.current, "pause");
    }

    /// Play if stopped, pause if playing
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Stopped => self.play(),
        }
    }

    /// Move one step forward. No-op on the last step.
    ///
    /// Does not change the play state; while playing, the new step gets its
    /// own full wait.
    pub fn next(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.move_to(self.current + 1);
        true
    }

    /// Move one step back. No-op on the first step.
    pub fn prev(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.move_to(self.current - 1);
        true
    }

    /// Stop and return to step 1
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.state = PlaybackState::Stopped;
        self.current = 1;
        debug!("reset");
    }

    /// Jump to step `index`, stopping playback.
    ///
    /// Out-of-range positions clamp to the nearest valid step. Returns the
    /// step actually selected.
    pub fn seek(&mut self, index: usize) -> usize {
        self.cancel_pending();
        self.state = PlaybackState::Stopped;
        let clamped = index.clamp(1, self.len());
        if clamped != index {
            debug!(requested = index, clamped, "seek clamped");
        }
        self.current = clamped;
        debug!(step = self.current, "seek");
        clamped
    }

    /// Change speed. While playing, the current step's wait restarts at the
    /// new speed.
    pub fn set_speed(&mut self, speed: Speed) {
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        if self.is_playing() {
            self.cancel_pending();
            let now = self.clock.now();
            self.schedule_from(now);
        }
        debug!(%speed, "speed changed");
    }

    /// End the session, cancelling any pending advance
    pub fn dispose(mut self) {
        self.shutdown();
    }

    // ---- timer delivery --------------------------------------------------

    /// Fire the advance if it is due. Returns `true` if anything changed.
    ///
    /// At most one step is taken per call, however late the call is, so
    /// every step is shown before the next one replaces it.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        match self.timers.pop_due(now) {
            Some((token, _)) => self.deliver(token),
            None => false,
        }
    }

    /// Deliver one timer by token, as an external scheduler would.
    ///
    /// A token that is not the current pending advance is ignored and
    /// `false` is returned.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending != Some(token) {
            warn!(%token, "ignoring stale timer");
            return false;
        }
        self.timers.cancel(token);
        self.deliver(token)
    }

    fn deliver(&mut self, token: TimerToken) -> bool {
        if self.pending != Some(token) || !self.is_playing() {
            warn!(%token, "ignoring stale timer");
            return false;
        }
        self.pending = None;

        if self.current < self.len() {
            self.current += 1;
            trace!(step = self.current, "advance");
            // The new step gets its full wait from the moment it is shown.
            let now = self.clock.now();
            self.schedule_from(now);
        } else {
            self.state = PlaybackState::Stopped;
            debug!(step = self.current, "playback finished");
        }
        true
    }

    // ---- accessors -------------------------------------------------------

    /// 1-based position of the current step
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Sequences are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn is_at_start(&self) -> bool {
        self.current == 1
    }

    pub fn is_at_end(&self) -> bool {
        self.current == self.len()
    }

    pub fn sequence(&self) -> &Arc<StepSequence<P>> {
        &self.sequence
    }

    pub fn current_step(&self) -> &Step<P> {
        self.sequence
            .get(self.current)
            .unwrap_or_else(|| self.sequence.first())
    }

    pub fn current_payload(&self) -> &P {
        &self.current_step().payload
    }

    pub fn current_highlighted_lines(&self) -> &[usize] {
        &self.current_step().highlighted_lines
    }

    /// Number of outstanding scheduled advances (0 or 1)
    pub fn pending_advances(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending
    }

    /// Remaining wait before the pending advance fires
    pub fn time_until_advance(&self) -> Option<Duration> {
        let due = self.timers.deadline(self.pending?)?;
        Some(due.saturating_sub(self.clock.now()))
    }

    /// Fraction of the sequence reached, `0.0` at step 1 and `1.0` at the end
    pub fn progress(&self) -> f64 {
        if self.len() <= 1 {
            return 1.0;
        }
        (self.current - 1) as f64 / (self.len() - 1) as f64
    }

    // ---- internals -------------------------------------------------------

    fn move_to(&mut self, index: usize) {
        self.cancel_pending();
        self.current = index;
        if self.is_playing() {
            let now = self.clock.now();
            self.schedule_from(now);
        }
        debug!(step = self.current, "step");
    }

    fn schedule_from(&mut self, base: Duration) {
        debug_assert!(self.pending.is_none(), "previous advance not cancelled");
        let wait = self.speed.scale(self.current_step().duration());
        self.pending = Some(self.timers.schedule(base + wait));
    }

    fn cancel_pending(&mut self) {
        if let Some(token) = self.pending.take() {
            self.timers.cancel(token);
        }
    }

    fn shutdown(&mut self) {
        self.pending = None;
        let cancelled = self.timers.cancel_all();
        self.state = PlaybackState::Stopped;
        if cancelled > 0 {
            debug!(cancelled, "playback session disposed with pending advance");
        }
    }
}

impl<P, C: Clock> Drop for PlaybackController<P, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
