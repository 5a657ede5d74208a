use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub level: EventLevel,
    pub message: String,
    pub timestamp_ms: i64,
}

impl Event {
    pub fn new(level: EventLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}

/// Bounded diagnostics buffer; the oldest events are dropped first.
#[derive(Debug, Clone)]
pub struct EventBus {
    events: VecDeque<Event>,
    capacity: usize,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: Event) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn count(&self, level: EventLevel) -> usize {
        self.events.iter().filter(|event| event.level == level).count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(512)
    }
}
