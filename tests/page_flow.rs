use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mausoleum::constants::*;
use mausoleum::content::JsonDirectory;
use mausoleum::cue::CuePlayer;
use mausoleum::elapsed::parse_origin;
use mausoleum::host::{PageHost, Redraw};
use mausoleum::page::Page;
use mausoleum::schedule::PageEvent;

fn write_content(dir: &Path) {
    std::fs::write(
        dir.join(HERO_IMAGES_DOC),
        r#"[{"url": "/hero/a.jpg", "headline": "A"},
            {"url": "/hero/b.jpg", "headline": "B"},
            {"url": "/hero/c.jpg", "headline": "C"}]"#,
    )
    .unwrap();
    std::fs::write(dir.join(CLIPS_DOC), r#"[{"url": "https://youtu.be/abc123"}]"#).unwrap();
    // jokes, results and signings are missing on purpose
}

fn page() -> Page {
    Page::with_rng(
        "http://localhost:5173",
        parse_origin(TROPHY_ORIGIN).unwrap(),
        Duration::from_secs(10),
        Duration::from_secs(1),
        CuePlayer::default(),
        StdRng::seed_from_u64(2008),
    )
}

#[tokio::test(start_paused = true)]
async fn test_page_runs_from_fetch_to_teardown() {
    let dir = tempfile::tempdir().unwrap();
    write_content(dir.path());

    let (mut host, mut rx) = PageHost::start(page(), Arc::new(JsonDirectory::new(dir.path())));

    let mut headlines = Vec::new();
    while headlines.len() < 3 {
        let event = rx.recv().await.unwrap();
        if host.apply(event) == Some(Redraw::Hero) {
            headlines.push(host.page().headline().unwrap().to_string());
        }
        if let Some(frames) = host.page().frames() {
            assert_eq!(frames.iter().filter(|f| f.visible).count(), 1);
        }
    }
    assert_eq!(headlines, vec!["A", "B", "C"]);

    let page = host.page_mut();
    assert!(page.elapsed().years >= 17);

    // missing pools leave their reveals inert
    page.reveal_joke();
    page.reveal_signing();
    assert!(page.joke().is_none());
    assert!(page.signing().is_none());

    page.advance_clip();
    assert_eq!(
        page.clip().unwrap().as_str(),
        "https://www.youtube.com/embed/abc123?enablejsapi=1&origin=http://localhost:5173"
    );

    host.shutdown().await;
    let stopped = Utc::now();

    // ticks queued before teardown may still be buffered, nothing newer
    while let Ok(event) = rx.try_recv() {
        match event {
            PageEvent::Tick(_, at) => assert!(at <= stopped),
            PageEvent::ContentLoaded(_) => panic!("content delivered twice"),
        }
    }
    assert!(rx.recv().await.is_none());
}
