#[derive(Debug, PartialEq, Clone, Copy)]
pub enum CarouselState {
    Uninitialized, // No hero image yet, nothing is rendered
    Rotating,      // Frames are live, one of them visible
}
