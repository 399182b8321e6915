// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::sync::Arc;

use crate::event::{CcdEvent, EventDefinition};
use crate::events::standard_events;

/// The events the service handles, keyed by event id.
#[derive(Clone, Default)]
pub struct EventRegistry {
    events: Vec<Arc<dyn CcdEvent>>,
    index: HashMap<&'static str, usize>,
}

impl EventRegistry {
    /// Builds a registry with every standard event.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry: Self = Self::default();
        for event in standard_events() {
            registry.register(event);
        }
        registry
    }

    /// Adds `event`, replacing any event with the same id.
    pub fn register(&mut self, event: Arc<dyn CcdEvent>) {
        let id: &'static str = event.definition().id;
        if let Some(&position) = self.index.get(id) {
            self.events[position] = event;
        } else {
            self.index.insert(id, self.events.len());
            self.events.push(event);
        }
    }

    /// Looks up the event with `event_id`.
    #[must_use]
    pub fn get(&self, event_id: &str) -> Option<Arc<dyn CcdEvent>> {
        self.index
            .get(event_id)
            .and_then(|&position| self.events.get(position))
            .cloned()
    }

    /// Definitions of every registered event, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &'static EventDefinition> + '_ {
        self.events.iter().map(|event| event.definition())
    }

    /// Number of registered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.definitions().map(|definition| definition.id))
            .finish()
    }
}
