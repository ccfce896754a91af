#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrameSlot {
    A,
    B,
}

impl FrameSlot {
    pub fn other(self) -> Self {
        match self {
            FrameSlot::A => FrameSlot::B,
            FrameSlot::B => FrameSlot::A,
        }
    }

    fn index(self) -> usize {
        match self {
            FrameSlot::A => 0,
            FrameSlot::B => 1,
        }
    }
}

// What the host renders for one of the two stacked images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarouselFrame {
    pub source: String,
    pub visible: bool,
}

/// The two display buffers of the crossfade.
///
/// Visibility is not stored per frame: a single `visible` slot decides it,
/// so there is never a moment with zero or two visible frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePair {
    sources: [String; 2],
    visible: FrameSlot,
}

impl FramePair {
    // Both buffers start on the same image, A in front
    pub fn showing(source: &str) -> Self {
        Self {
            sources: [source.to_string(), source.to_string()],
            visible: FrameSlot::A,
        }
    }

    pub fn visible_slot(&self) -> FrameSlot {
        self.visible
    }

    pub fn hidden_slot(&self) -> FrameSlot {
        self.visible.other()
    }

    /// Loads `incoming` into the hidden buffer and brings it to the front in
    /// the same update, the previously visible buffer goes to the back.
    pub fn crossfade(&mut self, incoming: &str) {
        let hidden = self.hidden_slot();
        self.sources[hidden.index()] = incoming.to_string();
        self.visible = hidden;
    }

    pub fn frame(&self, slot: FrameSlot) -> CarouselFrame {
        CarouselFrame {
            source: self.sources[slot.index()].clone(),
            visible: slot == self.visible,
        }
    }

    pub fn frames(&self) -> [CarouselFrame; 2] {
        [self.frame(FrameSlot::A), self.frame(FrameSlot::B)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_showing_starts_on_a() {
        let pair = FramePair::showing("one.jpg");
        let [a, b] = pair.frames();
        assert_eq!(a, CarouselFrame { source: "one.jpg".into(), visible: true });
        assert_eq!(b, CarouselFrame { source: "one.jpg".into(), visible: false });
    }

    #[test]
    fn test_crossfade_only_writes_hidden_buffer() {
        let mut pair = FramePair::showing("one.jpg");
        pair.crossfade("two.jpg");
        let [a, b] = pair.frames();
        assert_eq!(a, CarouselFrame { source: "one.jpg".into(), visible: false });
        assert_eq!(b, CarouselFrame { source: "two.jpg".into(), visible: true });

        pair.crossfade("three.jpg");
        let [a, b] = pair.frames();
        assert_eq!(a, CarouselFrame { source: "three.jpg".into(), visible: true });
        assert_eq!(b, CarouselFrame { source: "two.jpg".into(), visible: false });
    }
}
