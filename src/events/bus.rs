//! Event Bus Module
//!
//! Routes named notifications to registered handlers. Owns no cache state.

use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, error};

type Handler<P> = Arc<dyn Fn(&P) + Send + Sync>;

// == Handler Id ==
/// Identifies one registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

// == Registry ==
struct Registry<P> {
    next_id: u64,
    handlers: HashMap<String, Vec<(HandlerId, Handler<P>)>>,
}

impl<P> Registry<P> {
    fn allocate_id(&mut self) -> HandlerId {
        self.next_id += 1;
        HandlerId(self.next_id)
    }

    fn insert(&mut self, event: &str, id: HandlerId, handler: Handler<P>) {
        self.handlers
            .entry(event.to_string())
            .or_default()
            .push((id, handler));
    }

    fn remove(&mut self, event: &str, id: HandlerId) -> bool {
        let Some(list) = self.handlers.get_mut(event) else {
            return false;
        };

        let before = list.len();
        list.retain(|(existing, _)| *existing != id);
        let removed = list.len() != before;

        if list.is_empty() {
            self.handlers.remove(event);
        }
        removed
    }
}

// == Event Bus ==
/// Synchronous publish/subscribe hub.
///
/// Clones share one registry, so a bus can be handed to a cache and still be
/// subscribed to from the outside.
pub struct EventBus<P> {
    registry: Arc<Mutex<Registry<P>>>,
}

impl<P: 'static> EventBus<P> {
    /// Creates a bus with no handlers.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: HashMap::new(),
            })),
        }
    }

    // == Subscribe ==
    /// Registers `handler` for `event`.
    ///
    /// The returned [`Subscription`] removes exactly this handler. Dropping it
    /// leaves the handler registered.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Subscription<P>
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.allocate_id();
        registry.insert(event, id, Arc::new(handler));
        self.subscription(event, id)
    }

    // == Subscribe Once ==
    /// Registers `handler` for `event`, removing it after its first call.
    pub fn subscribe_once<F>(&self, event: &str, handler: F) -> Subscription<P>
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.allocate_id();

        let fired = AtomicBool::new(false);
        let weak = Arc::downgrade(&self.registry);
        let owned_event = event.to_string();
        let wrapper = move |payload: &P| {
            // A publish already in flight may hold a snapshot containing us.
            if fired.swap(true, Ordering::SeqCst) {
                return;
            }
            if let Some(registry) = weak.upgrade() {
                registry.lock().remove(&owned_event, id);
            }
            handler(payload);
        };

        registry.insert(event, id, Arc::new(wrapper));
        self.subscription(event, id)
    }

    // == Unsubscribe ==
    /// Removes a handler. Unknown handlers are ignored.
    ///
    /// Returns whether a handler was removed.
    pub fn unsubscribe(&self, event: &str, id: HandlerId) -> bool {
        self.registry.lock().remove(event, id)
    }

    // == Publish ==
    /// Invokes every handler currently registered for `event`.
    ///
    /// Handlers run on the calling thread against a snapshot of the registry,
    /// so they may subscribe or unsubscribe freely. A panicking handler is
    /// logged and skipped. Returns the number of handlers that completed.
    pub fn publish(&self, event: &str, payload: &P) -> usize {
        let snapshot: Vec<(HandlerId, Handler<P>)> = {
            let registry = self.registry.lock();
            match registry.handlers.get(event) {
                Some(list) => list.clone(),
                None => return 0,
            }
        };

        let mut completed = 0;
        for (id, handler) in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(()) => completed += 1,
                Err(cause) => {
                    let message = if let Some(s) = cause.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = cause.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    error!(event, handler = id.0, panic = %message, "Event handler panicked");
                }
            }
        }

        debug!(event, completed, "Event published");
        completed
    }

    // == Clear ==
    /// Removes every handler for `event`, or for all events when `None`.
    pub fn clear(&self, event: Option<&str>) {
        let mut registry = self.registry.lock();
        match event {
            Some(event) => {
                registry.handlers.remove(event);
            }
            None => registry.handlers.clear(),
        }
    }

    /// Returns the number of handlers registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry
            .lock()
            .handlers
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Returns true if no handler is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.registry.lock().handlers.is_empty()
    }

    fn subscription(&self, event: &str, id: HandlerId) -> Subscription<P> {
        Subscription {
            registry: Arc::downgrade(&self.registry),
            event: event.to_string(),
            id,
        }
    }
}

impl<P: 'static> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.lock();
        let mut events: Vec<&String> = registry.handlers.keys().collect();
        events.sort();
        f.debug_struct("EventBus").field("events", &events).finish()
    }
}

// == Subscription ==
/// Capability to remove one registered handler.
pub struct Subscription<P> {
    registry: Weak<Mutex<Registry<P>>>,
    event: String,
    id: HandlerId,
}

impl<P> Subscription<P> {
    /// Returns the id of the handler this subscription controls.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Returns the event name the handler is registered for.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Removes the handler. Returns whether it was still registered.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.lock().remove(&self.event, self.id),
            None => false,
        }
    }
}

impl<P> fmt::Debug for Subscription<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}
