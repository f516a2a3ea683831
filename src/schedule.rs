//! Frame sources.
//!
//! A [`FrameScheduler`] hands out frame timestamps one at a time, the way a
//! display refresh callback would. Tests use [`ManualFrames`] to drive a
//! session deterministically.

use std::collections::VecDeque;
use std::time::Duration;

pub trait FrameScheduler {
    /// Timestamp of the next frame, or `None` once the source is closed
    fn next_frame(&mut self) -> Option<Duration>;
}

/// A fixed list of frame timestamps
#[derive(Debug, Clone, Default)]
pub struct ManualFrames {
    frames: VecDeque<Duration>,
}

impl ManualFrames {
    pub fn new(frames: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `count` frames spaced `step` apart, the first one at `start + step`
    pub fn every(start: Duration, step: Duration, count: u32) -> Self {
        Self::new((1..=count).map(|i| start + step * i))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameScheduler for ManualFrames {
    fn next_frame(&mut self) -> Option<Duration> {
        self.frames.pop_front()
    }
}
