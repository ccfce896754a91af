use tracing::debug;

use crate::constants::{CUE_SOUNDS, CUE_VOLUME};

// Whatever actually makes the noise
pub trait CueSink {
    fn play(&mut self, sound: &str, volume: f32);
}

// Default sink, only records the cue in the log
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, sound: &str, volume: f32) {
        debug!("Cue {} at volume {:.1}", sound, volume);
    }
}

// Round robin shared by every reveal. Muted: nothing plays, index stays put.
pub struct CuePlayer {
    sink: Box<dyn CueSink>,
    next: usize,
    muted: bool,
}

impl CuePlayer {
    pub fn new(sink: Box<dyn CueSink>, muted: bool) -> Self {
        Self { sink, next: 0, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    // Returns the new mute state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn play(&mut self) -> Option<&'static str> {
        if self.muted {
            return None;
        }
        let sound = CUE_SOUNDS[self.next];
        self.sink.play(sound, CUE_VOLUME);
        self.next = (self.next + 1) % CUE_SOUNDS.len();
        Some(sound)
    }
}

impl Default for CuePlayer {
    fn default() -> Self {
        Self::new(Box::new(LogSink), false)
    }
}
