// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Refresh-tick scheduling, independent of any particular frame clock.

/// Handle for one requested tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickToken(pub u64);

/// Host-provided refresh clock (`requestAnimationFrame`, a vsync callback, a
/// test harness, ...).
///
/// The host calls [`RenderScheduler::tick`] with the token once the requested
/// tick fires.
pub trait TickSource {
    /// Asks for one callback at the next refresh.
    fn request_tick(&mut self) -> TickToken;

    /// Withdraws a pending request. Cancelling an already-fired or unknown
    /// token is a no-op.
    fn cancel_tick(&mut self, token: TickToken);
}

/// Keeps exactly one tick pending while running and none after [`stop`].
///
/// [`stop`]: RenderScheduler::stop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderScheduler {
    running: bool,
    pending: Option<TickToken>,
}

impl RenderScheduler {
    /// Creates a stopped scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            running: false,
            pending: None,
        }
    }

    /// Returns `true` between [`Self::start`] and [`Self::stop`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The tick currently awaited, if any.
    #[must_use]
    pub fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    /// Starts requesting ticks. Starting twice is a no-op.
    pub fn start(&mut self, source: &mut impl TickSource) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = Some(source.request_tick());
        tracing::debug!("render scheduler started");
    }

    /// Stops and cancels the pending tick so nothing fires after teardown.
    pub fn stop(&mut self, source: &mut impl TickSource) {
        if let Some(token) = self.pending.take() {
            source.cancel_tick(token);
        }
        if self.running {
            self.running = false;
            tracing::debug!("render scheduler stopped");
        }
    }

    /// Handles a fired tick. Returns `true` if the caller should render a
    /// frame now; the next tick has already been requested in that case.
    ///
    /// Stale tokens and ticks arriving after [`Self::stop`] return `false`.
    pub fn tick(&mut self, source: &mut impl TickSource, token: TickToken) -> bool {
        if !self.running || self.pending != Some(token) {
            tracing::trace!(?token, "ignoring stale tick");
            return false;
        }
        self.pending = Some(source.request_tick());
        true
    }
}
