//! Event fan-out for removal, queueing, and cascade progress notifications

use std::fmt;
use std::sync::mpsc;

use crate::types::EngineEvent;

type Subscriber = Box<dyn FnMut(&EngineEvent) + Send>;

/// Synchronous observer list. Events are delivered in emission order to every
/// subscriber, on the thread that mutates the board.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&EngineEvent) + Send + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    /// Subscribe a channel; events sent after the receiver is dropped are discarded.
    pub fn channel(&mut self) -> mpsc::Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribe(move |event| {
            let _ = tx.send(*event);
        });
        rx
    }

    pub fn emit(&mut self, event: EngineEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
