use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::carousel::frame::{CarouselFrame, FramePair};
use crate::carousel::state::CarouselState;
use crate::content::ImageRecord;
use crate::engine::Engine;

/// Looping hero image rotation, cross-faded through two buffers.
pub struct CrossfadeCarousel {
    pool: Arc<[ImageRecord]>,
    state: CarouselState,
    frames: FramePair,
    active_index: usize,
    period: Duration,
}

impl CrossfadeCarousel {
    pub fn new(period: Duration) -> Self {
        Self {
            pool: Arc::from(Vec::new()),
            state: CarouselState::Uninitialized,
            frames: FramePair::showing(""),
            active_index: 0,
            period,
        }
    }

    /// Takes a (new) image pool and restarts the rotation on its first image.
    /// An empty pool leaves the carousel uninitialized.
    pub fn load(&mut self, pool: Arc<[ImageRecord]>) {
        self.pool = pool;
        self.active_index = 0;

        match self.pool.first() {
            Some(first) => {
                self.frames = FramePair::showing(&first.url);
                self.state = CarouselState::Rotating;
            }
            None => {
                self.frames = FramePair::showing("");
                self.state = CarouselState::Uninitialized;
            }
        }
    }

    /// Moves to the next image, wrapping at the end of the pool.
    /// Returns false when there is nothing to rotate (fewer than two images).
    pub fn advance(&mut self) -> bool {
        if self.state != CarouselState::Rotating || self.pool.len() < 2 {
            return false;
        }

        let next_index = (self.active_index + 1) % self.pool.len();
        self.frames.crossfade(&self.pool[next_index].url);
        self.active_index = next_index;
        debug!(
            "Carousel on image {} of {}, {:?} in front",
            next_index + 1,
            self.pool.len(),
            self.frames.visible_slot()
        );
        true
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    // Nothing to render until the first image arrives
    pub fn frames(&self) -> Option<[CarouselFrame; 2]> {
        match self.state {
            CarouselState::Uninitialized => None,
            CarouselState::Rotating => Some(self.frames.frames()),
        }
    }

    pub fn headline(&self) -> Option<&str> {
        match self.state {
            CarouselState::Uninitialized => None,
            CarouselState::Rotating => self.pool.get(self.active_index).map(|img| img.headline.as_str()),
        }
    }
}

impl Engine for CrossfadeCarousel {
    fn period(&self) -> Duration {
        self.period
    }

    fn tick(&mut self, _now: DateTime<Utc>) -> bool {
        self.advance()
    }
}
