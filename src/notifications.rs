//! # Notification Feed
//!
//! Most-recent-first event log. The feed is bounded: once `capacity` entries
//! are held, appending evicts the oldest entry.

use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::domain::{NotificationEvent, NotificationKind};

pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Clone)]
pub struct NotificationFeed {
    events: VecDeque<NotificationEvent>,
    capacity: usize,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl NotificationFeed {
    /// `capacity` of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    /// Replace the contents with `events`, given most-recent-first.
    pub fn seed(&mut self, events: Vec<NotificationEvent>) {
        self.events = events.into_iter().take(self.capacity).collect();
    }

    pub fn append(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> &NotificationEvent {
        self.push(NotificationEvent::new(kind, title, message))
    }

    pub fn push(&mut self, event: NotificationEvent) -> &NotificationEvent {
        match event.kind {
            NotificationKind::Error => {
                warn!(title = %event.title, message = %event.message, "notification")
            }
            _ => info!(kind = %event.kind, title = %event.title, "notification"),
        }
        if self.events.len() == self.capacity {
            if let Some(evicted) = self.events.pop_back() {
                debug!(title = %evicted.title, "notification evicted");
            }
        }
        self.events.push_front(event);
        &self.events[0]
    }

    pub fn count(&self) -> usize {
        self.events.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn unread_count(&self) -> usize {
        self.events.iter().filter(|e| !e.read).count()
    }

    pub fn mark_all_read(&mut self) {
        for event in self.events.iter_mut() {
            event.read = true;
        }
    }

    pub fn latest(&self) -> Option<&NotificationEvent> {
        self.events.front()
    }

    pub fn list_all(&self) -> Vec<NotificationEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationEvent> {
        self.events.iter()
    }
}
