use std::collections::{HashMap, VecDeque};

use crate::cards::Card;
use crate::hand::{find_best_hand, EvaluatedHand};

/// Host-owned memo for [`find_best_hand`].
///
/// Keys are the sorted multiset of hole and community cards, so the same
/// seven cards hit regardless of how they were split or ordered. When full,
/// the oldest inserted entry is evicted. A capacity of zero disables caching.
#[derive(Debug, Clone)]
pub struct HandCache {
    capacity: usize,
    entries: HashMap<Vec<Card>, EvaluatedHand>,
    order: VecDeque<Vec<Card>>,
    hits: u64,
    misses: u64,
}

impl HandCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_evaluate(&mut self, hole: &[Card], community: &[Card]) -> EvaluatedHand {
        let key = signature(hole, community);
        if let Some(hand) = self.entries.get(&key) {
            self.hits += 1;
            return hand.clone();
        }
        self.misses += 1;
        let hand = find_best_hand(hole, community);
        if self.capacity == 0 {
            return hand;
        }
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, hand.clone());
        hand
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drops every entry, e.g. when a new combat starts. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

fn signature(hole: &[Card], community: &[Card]) -> Vec<Card> {
    let mut key: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    key.sort_unstable();
    key
}
