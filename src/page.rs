use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::carousel::{CarouselFrame, CrossfadeCarousel};
use crate::constants::SIGNING_COOLDOWN;
use crate::content::{ContentPools, ResultRecord, SigningRecord};
use crate::cue::CuePlayer;
use crate::elapsed::{DurationBreakdown, ElapsedCounter};
use crate::embed::{self, EmbedUrl};
use crate::engine::Engine;
use crate::sampler::CooldownSampler;
use crate::schedule::TimerKind;

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub elapsed: DurationBreakdown,
    pub frames: Option<[CarouselFrame; 2]>,
    pub headline: Option<String>,
    pub joke: Option<String>,
    pub result: Option<ResultRecord>,
    pub signing: Option<SigningRecord>,
    pub clip: Option<String>,
    pub muted: bool,
}

pub struct Page {
    page_origin: String,
    pools: ContentPools,

    carousel: CrossfadeCarousel,
    elapsed: ElapsedCounter,

    jokes: CooldownSampler<String>,
    results: CooldownSampler<(String, String)>,
    signings: CooldownSampler<String>,
    cue: CuePlayer,
    rng: StdRng,

    joke: Option<String>,
    result: Option<ResultRecord>,
    signing: Option<SigningRecord>,
    clip_cursor: Option<usize>,
    clip: Option<EmbedUrl>,
}

impl Page {
    pub fn new(
        page_origin: impl Into<String>,
        since: DateTime<Utc>,
        carousel_interval: Duration,
        tick_interval: Duration,
        cue: CuePlayer,
    ) -> Self {
        Self::with_rng(
            page_origin,
            since,
            carousel_interval,
            tick_interval,
            cue,
            StdRng::from_os_rng(),
        )
    }

    pub fn with_rng(
        page_origin: impl Into<String>,
        since: DateTime<Utc>,
        carousel_interval: Duration,
        tick_interval: Duration,
        cue: CuePlayer,
        rng: StdRng,
    ) -> Self {
        Self {
            page_origin: page_origin.into(),
            pools: ContentPools::default(),
            carousel: CrossfadeCarousel::new(carousel_interval),
            elapsed: ElapsedCounter::new(since, tick_interval),
            // Jokes and results are plain random picks, only signings have a cooldown
            jokes: CooldownSampler::new(0),
            results: CooldownSampler::new(0),
            signings: CooldownSampler::new(SIGNING_COOLDOWN),
            cue,
            rng,
            joke: None,
            result: None,
            signing: None,
            clip_cursor: None,
            clip: None,
        }
    }

    pub fn load_content(&mut self, pools: ContentPools) {
        self.carousel.load(pools.hero_images.clone());
        self.signings.clear();
        self.clip_cursor = None;
        self.pools = pools;
        info!("Page content installed, carousel {:?}", self.carousel.state());
    }

    pub fn period(&self, kind: TimerKind) -> Duration {
        match kind {
            TimerKind::Elapsed => self.elapsed.period(),
            TimerKind::Carousel => self.carousel.period(),
        }
    }

    pub fn tick(&mut self, kind: TimerKind, now: DateTime<Utc>) -> bool {
        match kind {
            TimerKind::Elapsed => self.elapsed.tick(now),
            TimerKind::Carousel => self.carousel.tick(now),
        }
    }

    pub fn reveal_joke(&mut self) {
        let Self { pools, jokes, rng, cue, joke, .. } = self;
        match jokes.pick(&pools.jokes, rng, |_| false, |_| {
            cue.play();
        }) {
            Ok(picked) => *joke = Some(picked.clone()),
            Err(e) => debug!("Joke reveal ignored: {}", e),
        }
    }

    pub fn reveal_result(&mut self) {
        let Self { pools, results, rng, cue, result, .. } = self;
        match results.pick(&pools.results, rng, |_| false, |_| {
            cue.play();
        }) {
            Ok(picked) => *result = Some(picked.clone()),
            Err(e) => debug!("Result reveal ignored: {}", e),
        }
    }

    pub fn reveal_signing(&mut self) {
        let Self { pools, signings, rng, cue, signing, .. } = self;
        let picked = signings.pick(
            &pools.signings,
            rng,
            |s: &SigningRecord| s.exclude_from_pool,
            |_| {
                cue.play();
            },
        );
        match picked {
            Ok(picked) => *signing = Some(picked.clone()),
            Err(e) => warn!("Signing reveal ignored: {}", e),
        }
    }

    // A link that cannot be embedded clears the player
    pub fn advance_clip(&mut self) {
        if self.pools.clips.is_empty() {
            return;
        }

        let next = match self.clip_cursor {
            None => 0,
            Some(i) => (i + 1) % self.pools.clips.len(),
        };
        self.clip_cursor = Some(next);

        let raw = &self.pools.clips[next];
        self.clip = match embed::normalize(raw, &self.page_origin) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("Clip {} has no playable link: {}", next, e);
                None
            }
        };
        self.cue.play();
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.cue.toggle_mute()
    }

    pub fn is_muted(&self) -> bool {
        self.cue.is_muted()
    }

    pub fn elapsed(&self) -> DurationBreakdown {
        self.elapsed.current()
    }

    pub fn frames(&self) -> Option<[CarouselFrame; 2]> {
        self.carousel.frames()
    }

    pub fn headline(&self) -> Option<&str> {
        self.carousel.headline()
    }

    pub fn joke(&self) -> Option<&str> {
        self.joke.as_deref()
    }

    pub fn result(&self) -> Option<&ResultRecord> {
        self.result.as_ref()
    }

    pub fn signing(&self) -> Option<&SigningRecord> {
        self.signing.as_ref()
    }

    pub fn clip(&self) -> Option<&EmbedUrl> {
        self.clip.as_ref()
    }

    pub fn view(&self) -> PageView {
        PageView {
            elapsed: self.elapsed(),
            frames: self.frames(),
            headline: self.headline().map(str::to_string),
            joke: self.joke.clone(),
            result: self.result.clone(),
            signing: self.signing.clone(),
            clip: self.clip.as_ref().map(|c| c.to_string()),
            muted: self.is_muted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::TimeDelta;

    use crate::constants::*;
    use crate::content::ImageRecord;
    use crate::cue::CueSink;
    use crate::elapsed::parse_origin;

    struct Counter(Rc<RefCell<usize>>);

    impl CueSink for Counter {
        fn play(&mut self, _sound: &str, _volume: f32) {
            *self.0.borrow_mut() += 1;
        }
    }

    fn signing(name: &str, excluded: bool) -> SigningRecord {
        SigningRecord {
            name: name.to_string(),
            exclude_from_pool: excluded,
            image: None,
            wiki: None,
            year: None,
            fee: None,
            apps: None,
            goals: None,
            assists: None,
            bio: None,
        }
    }

    fn pools() -> ContentPools {
        ContentPools {
            hero_images: vec![
                ImageRecord { url: "/hero/0.jpg".into(), headline: "first".into() },
                ImageRecord { url: "/hero/1.jpg".into(), headline: "second".into() },
            ]
            .into(),
            jokes: vec!["only joke".into()],
            results: vec![ResultRecord {
                score: "1-5".into(),
                details: "cup".into(),
                link: "https://example.org".into(),
            }],
            signings: vec![signing("A", false), signing("B", true), signing("C", false)],
            clips: vec![
                "https://youtu.be/first".into(),
                "youtube.com/watch?v=broken".into(),
                "https://www.youtube.com/shorts/third".into(),
            ],
        }
    }

    fn page() -> (Page, Rc<RefCell<usize>>) {
        let cues = Rc::new(RefCell::new(0));
        let page = Page::with_rng(
            "https://example.org",
            parse_origin(TROPHY_ORIGIN).unwrap(),
            CAROUSEL_INTERVAL,
            ELAPSED_TICK,
            CuePlayer::new(Box::new(Counter(cues.clone())), false),
            StdRng::seed_from_u64(11),
        );
        (page, cues)
    }

    #[test]
    fn test_empty_page_is_inert() {
        let (mut page, cues) = page();
        page.reveal_joke();
        page.reveal_result();
        page.reveal_signing();
        page.advance_clip();
        assert!(!page.tick(TimerKind::Carousel, Utc::now()));

        let view = page.view();
        assert!(view.frames.is_none());
        assert!(view.joke.is_none() && view.result.is_none() && view.signing.is_none());
        assert!(view.clip.is_none());
        assert_eq!(*cues.borrow(), 0);
    }

    #[test]
    fn test_reveals_fill_view_and_cue() {
        let (mut page, cues) = page();
        page.load_content(pools());

        page.reveal_joke();
        page.reveal_result();
        page.reveal_signing();

        assert_eq!(page.joke(), Some("only joke"));
        assert_eq!(page.result().unwrap().score, "1-5");
        assert_ne!(page.signing().unwrap().name, "B");
        assert_eq!(*cues.borrow(), 3);
    }

    #[test]
    fn test_signings_alternate_and_skip_excluded() {
        let (mut page, _) = page();
        page.load_content(pools());

        for _ in 0..10 {
            // two selectable signings: each cooldown cycle shows both
            page.reveal_signing();
            let first = page.signing().unwrap().name.clone();
            page.reveal_signing();
            let second = page.signing().unwrap().name.clone();

            let mut cycle = vec![first, second];
            cycle.sort();
            assert_eq!(cycle, vec!["A", "C"]);
        }
    }

    #[test]
    fn test_all_excluded_signings_are_inert() {
        let (mut page, cues) = page();
        page.load_content(ContentPools {
            signings: vec![signing("X", true)],
            ..ContentPools::default()
        });
        page.reveal_signing();
        assert!(page.signing().is_none());
        assert_eq!(*cues.borrow(), 0);
    }

    #[test]
    fn test_clips_step_in_order_and_fail_closed() {
        let (mut page, cues) = page();
        page.load_content(pools());

        page.advance_clip();
        assert_eq!(page.clip().unwrap().video_id(), "first");
        assert!(page.clip().unwrap().as_str().ends_with("origin=https://example.org"));

        page.advance_clip();
        assert!(page.clip().is_none());

        page.advance_clip();
        assert_eq!(page.clip().unwrap().video_id(), "third");

        page.advance_clip();
        assert_eq!(page.clip().unwrap().video_id(), "first");
        assert_eq!(*cues.borrow(), 4);
    }

    #[test]
    fn test_ticks_drive_carousel_and_counter() {
        let (mut page, _) = page();
        page.load_content(pools());
        assert_eq!(page.headline(), Some("first"));

        assert!(page.tick(TimerKind::Carousel, Utc::now()));
        assert_eq!(page.headline(), Some("second"));
        assert!(page.frames().unwrap()[1].visible);

        let since = parse_origin(TROPHY_ORIGIN).unwrap();
        assert!(page.tick(TimerKind::Elapsed, since + TimeDelta::days(1)));
        assert_eq!(page.elapsed().days, 1);

        assert_eq!(page.period(TimerKind::Carousel), CAROUSEL_INTERVAL);
        assert_eq!(page.period(TimerKind::Elapsed), ELAPSED_TICK);
    }

    #[test]
    fn test_mute_silences_reveals() {
        let (mut page, cues) = page();
        page.load_content(pools());
        assert!(page.toggle_mute());
        page.reveal_joke();
        assert_eq!(page.joke(), Some("only joke"));
        assert_eq!(*cues.borrow(), 0);
        assert!(page.view().muted);
    }
}
