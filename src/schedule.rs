use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::content::{ContentPools, ContentSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Elapsed,  // trophy counter refresh
    Carousel, // hero image rotation
}

#[derive(Debug)]
pub enum PageEvent {
    Tick(TimerKind, DateTime<Utc>),
    ContentLoaded(ContentPools),
}

struct Task {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct Schedule {
    root: CancellationToken,
    timers: HashMap<TimerKind, Task>,
    fetch: Option<Task>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            root: CancellationToken::new(),
            timers: HashMap::new(),
            fetch: None,
        }
    }

    pub fn start(
        &mut self,
        kind: TimerKind,
        period: Duration,
        immediate: bool,
        events: mpsc::Sender<PageEvent>,
    ) {
        self.cancel(kind);

        let token = self.root.child_token();
        let stop = token.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            if !immediate {
                // first tick of a tokio interval completes at once
                interval.tick().await;
            }

            loop {
                tokio::select! {
                    biased;
                    _ = stop.cancelled() => break,
                    _ = interval.tick() => {
                        if events.send(PageEvent::Tick(kind, Utc::now())).await.is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("{:?} timer stopped", kind);
        });

        info!("{:?} timer started, every {:?}", kind, period);
        self.timers.insert(kind, Task { token, handle });
    }

    pub fn spawn_fetch(&mut self, source: Arc<dyn ContentSource>, events: mpsc::Sender<PageEvent>) {
        let token = self.root.child_token();
        let stop = token.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = stop.cancelled() => debug!("Content fetch abandoned"),
                pools = ContentPools::load(source.as_ref()) => {
                    let _ = events.send(PageEvent::ContentLoaded(pools)).await;
                }
            }
        });
        self.fetch = Some(Task { token, handle });
    }

    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        match self.timers.remove(&kind) {
            Some(task) => {
                task.token.cancel();
                true
            }
            None => false,
        }
    }

    // False once the fetch has already delivered or was never started
    pub fn cancel_fetch(&mut self) -> bool {
        match self.fetch.take() {
            Some(task) if !task.handle.is_finished() => {
                task.token.cancel();
                debug!("Content fetch cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.timers
            .get(&kind)
            .is_some_and(|task| !task.token.is_cancelled() && !task.handle.is_finished())
    }

    pub async fn shutdown(&mut self) {
        self.root.cancel();
        let tasks: Vec<Task> = self
            .timers
            .drain()
            .map(|(_, task)| task)
            .chain(self.fetch.take())
            .collect();
        for task in tasks {
            let _ = task.handle.await;
        }
        info!("Schedule shut down");
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Schedule {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
