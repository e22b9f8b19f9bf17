//! Synchronous publish/subscribe for one picking session.
//!
//! Handlers run on the publishing thread, inside the dispatch of the input
//! event that caused the change, so a repaint triggered from a handler sees
//! the new state.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use super::events::{EventCategory, PickerEvent};

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Which events a subscriber receives.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    /// Any event whose category is listed
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &PickerEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(&PickerEvent) + Send + Sync>;

/// Event bus settings.
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Keep a log of published events (diagnostics and tests)
    pub enable_history: bool,
    /// Oldest events are dropped past this count
    pub max_history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            enable_history: false,
            max_history_size: 1000,
        }
    }
}

/// Publish/subscribe hub shared by the views of one session.
pub struct EventBus {
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
    history: RwLock<VecDeque<PickerEvent>>,
    config: EventBusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            history: RwLock::new(VecDeque::new()),
            config,
        }
    }

    /// Delivers `event` to every matching subscriber and returns how many
    /// received it.
    pub fn publish(&self, event: PickerEvent) -> usize {
        tracing::trace!("publish: {}", event.description());

        if self.config.enable_history {
            let mut history = self.history.write();
            history.push_back(event.clone());
            while history.len() > self.config.max_history_size {
                history.pop_front();
            }
        }

        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(&event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Registers `handler` for events passing `filter`.
    ///
    /// Handlers must not subscribe or unsubscribe from inside the callback.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&PickerEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("subscription {} added", id);
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("subscription {} removed", id);
        }
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Published events, oldest first. Empty unless history is enabled.
    pub fn history(&self) -> Vec<PickerEvent> {
        self.history.read().iter().cloned().collect()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
