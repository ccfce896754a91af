pub mod engine;
pub mod frame;
pub mod state;

pub use engine::CrossfadeCarousel;
pub use frame::{CarouselFrame, FramePair, FrameSlot};
pub use state::CarouselState;
