// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame timing samples.

use std::collections::VecDeque;
use std::time::Duration;

/// Default number of frames kept by [`FrameStatsRing`].
pub const DEFAULT_STATS_CAPACITY: usize = 120;

/// Measurements for one rendered frame.
///
/// Purely observational; nothing in the engine reads these back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Monotonic frame number, starting at 1.
    pub frame: u64,
    /// Nodes drawn.
    pub visible_nodes: usize,
    /// Edges drawn.
    pub visible_edges: usize,
    /// Commands emitted.
    pub commands: usize,
    /// Time spent building the frame.
    pub render_time: Duration,
    /// Duration of the most recent pointer hit-test, if any happened.
    pub last_hit_test: Option<Duration>,
}

/// Bounded history of [`FrameStats`]; the oldest sample is dropped first.
#[derive(Clone, Debug)]
pub struct FrameStatsRing {
    samples: VecDeque<FrameStats>,
    capacity: usize,
}

impl Default for FrameStatsRing {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STATS_CAPACITY)
    }
}

impl FrameStatsRing {
    /// Creates an empty ring holding at most `capacity` samples (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a sample, evicting the oldest when full.
    pub fn push(&mut self, stats: FrameStats) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(stats);
    }

    /// Most recent sample.
    #[must_use]
    pub fn latest(&self) -> Option<&FrameStats> {
        self.samples.back()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &FrameStats> + '_ {
        self.samples.iter()
    }

    /// Number of samples held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if no frame has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Maximum number of samples held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Mean render time over the held samples.
    #[must_use]
    pub fn average_render_time(&self) -> Option<Duration> {
        let n = u32::try_from(self.samples.len()).ok().filter(|n| *n > 0)?;
        let total: Duration = self.samples.iter().map(|s| s.render_time).sum();
        Some(total / n)
    }

    /// Slowest render time over the held samples.
    #[must_use]
    pub fn max_render_time(&self) -> Option<Duration> {
        self.samples.iter().map(|s| s.render_time).max()
    }
}
