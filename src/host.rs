use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::constants::EVENT_BUFFER;
use crate::content::ContentSource;
use crate::page::Page;
use crate::schedule::{PageEvent, Schedule, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    Counter,
    Hero,
}

// Wires the page to its triggers. Only `apply` mutates the page from events.
pub struct PageHost {
    page: Page,
    schedule: Schedule,
    events: mpsc::Sender<PageEvent>,
}

impl PageHost {
    pub fn start(page: Page, source: Arc<dyn ContentSource>) -> (Self, mpsc::Receiver<PageEvent>) {
        let (events, rx) = mpsc::channel(EVENT_BUFFER);
        let mut schedule = Schedule::new();
        schedule.spawn_fetch(source, events.clone());
        schedule.start(TimerKind::Elapsed, page.period(TimerKind::Elapsed), true, events.clone());
        // the carousel timer is armed once there are images to rotate
        (Self { page, schedule, events }, rx)
    }

    pub fn apply(&mut self, event: PageEvent) -> Option<Redraw> {
        match event {
            PageEvent::Tick(kind, now) => {
                if !self.page.tick(kind, now) {
                    return None;
                }
                Some(match kind {
                    TimerKind::Elapsed => Redraw::Counter,
                    TimerKind::Carousel => Redraw::Hero,
                })
            }
            PageEvent::ContentLoaded(pools) => {
                self.page.load_content(pools);
                // First image gets a full interval from the moment it shows
                let period = self.page.period(TimerKind::Carousel);
                self.schedule.start(TimerKind::Carousel, period, false, self.events.clone());
                debug!("Carousel timer re-armed on content load");
                Some(Redraw::Hero)
            }
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    // Consumes the host so the receiver sees the channel close once drained
    pub async fn shutdown(mut self) -> Page {
        self.schedule.shutdown().await;
        self.page
    }
}
