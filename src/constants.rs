use std::time::Duration;

pub const CAROUSEL_INTERVAL: Duration = Duration::from_secs(10); // Time each hero image stays on screen
pub const ELAPSED_TICK: Duration = Duration::from_secs(1);       // Refresh rate of the trophy counter

pub const EVENT_BUFFER: usize = 64;                               // Pending timer and fetch events

pub const TROPHY_ORIGIN: &str = "2008-02-24T17:00:00Z";          // Last trophy, the counter starts here

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = MS_PER_SECOND * 60;
pub const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
pub const MS_PER_DAY: i64 = MS_PER_HOUR * 24;
pub const DAYS_PER_YEAR: f64 = 365.25;                            // Average year, leap days are smoothed out

pub const SIGNING_COOLDOWN: usize = 20;                           // Signings kept out of the draw after being shown
pub const RESELECT_ATTEMPTS: usize = 2;                           // First draw + one draw after clearing history

pub const EMBED_BASE: &str = "https://www.youtube.com/embed/";
pub const DEFAULT_PAGE_ORIGIN: &str = "http://localhost:5173";

pub const CUE_SOUNDS: [&str; 4] = [
    "/sounds/who-mate.mp3",
    "/sounds/sad-trombone.mp3",
    "/sounds/laugh.mp3",
    "/sounds/sad-violin.mp3",
];
pub const CUE_VOLUME: f32 = 0.3;

pub const HERO_IMAGES_DOC: &str = "heroImages.json";
pub const JOKES_DOC: &str = "statsJokes.json";
pub const RESULTS_DOC: &str = "embarrassingResults.json";
pub const SIGNINGS_DOC: &str = "signings.json";
pub const CLIPS_DOC: &str = "dvdClips.json";
