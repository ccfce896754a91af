pub mod carousel;
pub mod config;
pub mod constants;
pub mod content;
pub mod cue;
pub mod elapsed;
pub mod embed;
pub mod engine;
pub mod error;
pub mod host;
pub mod page;
pub mod prefs;
pub mod sampler;
pub mod schedule;

pub use error::{Error, Result};
pub use host::{PageHost, Redraw};
pub use page::{Page, PageView};
