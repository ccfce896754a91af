use std::collections::VecDeque;

use rand::Rng;
use tracing::debug;

use crate::constants::RESELECT_ATTEMPTS;
use crate::error::SelectionError;

// Identity used by the cooldown history
pub trait Keyed {
    type Key: Clone + PartialEq;
    fn key(&self) -> Self::Key;
}

impl Keyed for String {
    type Key = String;

    fn key(&self) -> String {
        self.clone()
    }
}

// Remembers the last `capacity` picks and keeps them out of the draw.
// A zero capacity gives a plain uniform pick.
#[derive(Debug, Clone)]
pub struct CooldownSampler<K> {
    history: VecDeque<K>,
    capacity: usize,
}

impl<K: Clone + PartialEq> CooldownSampler<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // Oldest first
    pub fn history(&self) -> impl Iterator<Item = &K> {
        self.history.iter()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    // `on_pick` runs once for the chosen item, never when the draw fails
    pub fn pick<'a, T, R, E, F>(
        &mut self,
        pool: &'a [T],
        rng: &mut R,
        exclude: E,
        on_pick: F,
    ) -> Result<&'a T, SelectionError>
    where
        T: Keyed<Key = K>,
        R: Rng,
        E: Fn(&T) -> bool,
        F: FnOnce(&T),
    {
        if pool.is_empty() {
            return Err(SelectionError::EmptyPool);
        }

        for _ in 0..RESELECT_ATTEMPTS {
            let eligible: Vec<&T> = pool
                .iter()
                .filter(|&item| !exclude(item) && !self.history.contains(&item.key()))
                .collect();

            if !eligible.is_empty() {
                let chosen = eligible[rng.random_range(0..eligible.len())];
                self.remember(chosen.key());
                on_pick(chosen);
                return Ok(chosen);
            }

            // Everything selectable was shown recently
            debug!("Cooldown exhausted for a pool of {}, clearing history", pool.len());
            self.history.clear();
        }

        Err(SelectionError::NoEligible(pool.len()))
    }

    fn remember(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }
        self.history.push_back(key);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }
}
