//! Frame-id allocation and the per-request waiter table.
//!
//! Every outbound frame that expects a response carries a non-zero
//! frame id; the module echoes it in the response. The table maps each
//! live id to a single-slot channel the reader delivers into. The
//! invariant is "at most one live waiter per id": ids are allocated and
//! registered under the same lock, the wrapping counter skips 0, and an
//! id is only reused once its waiter is gone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use beeline_core::events::Event;

/// Single-response requests only ever hold one frame, but gathering
/// requests (node discovery, active scan) can see several responses
/// land in one read before their task is polled again; the headroom
/// keeps those from being dropped as overflow.
const WAITER_CAPACITY: usize = 8;

#[derive(Default)]
struct TableInner {
    /// Last allocated frame id; wraps 255 -> 1, never 0.
    last_id: u8,
    waiters: HashMap<u8, mpsc::Sender<Event>>,
}

/// The driver-wide frame-id counter and waiter map.
#[derive(Default)]
pub(crate) struct WaiterTable {
    inner: Mutex<TableInner>,
}

impl WaiterTable {
    pub(crate) fn new() -> Self {
        WaiterTable::default()
    }

    /// Allocate the next free frame id and register a waiter for it.
    ///
    /// The returned guard unregisters on drop, so every exit path of a
    /// request (success, error, caller cancellation) releases the id.
    pub(crate) fn register(self: &Arc<Self>) -> Waiter {
        let (tx, rx) = mpsc::channel(WAITER_CAPACITY);
        let mut inner = self.inner.lock().unwrap();
        let id = Self::next_free_id(&mut inner);
        inner.waiters.insert(id, tx);
        drop(inner);
        Waiter {
            table: Arc::clone(self),
            frame_id: id,
            rx,
        }
    }

    /// Allocate a frame id without registering a waiter.
    ///
    /// Used by fire-and-forget transmits: the id still tags the
    /// asynchronous transmit status frame, which (having no waiter)
    /// is routed to the event channel.
    pub(crate) fn allocate_id(&self) -> u8 {
        let mut inner = self.inner.lock().unwrap();
        Self::next_free_id(&mut inner)
    }

    /// Advance the counter to the next id not owned by a live waiter.
    ///
    /// If every id is somehow live (255 concurrent requests), falls
    /// back to plain sequential allocation rather than spinning.
    fn next_free_id(inner: &mut TableInner) -> u8 {
        for _ in 0..=u8::MAX {
            inner.last_id = match inner.last_id.wrapping_add(1) {
                0 => 1,
                id => id,
            };
            if !inner.waiters.contains_key(&inner.last_id) {
                return inner.last_id;
            }
        }
        inner.last_id
    }

    /// Clone the delivery handle for a frame id, if one is registered.
    pub(crate) fn lookup(&self, frame_id: u8) -> Option<mpsc::Sender<Event>> {
        self.inner.lock().unwrap().waiters.get(&frame_id).cloned()
    }

    fn unregister(&self, frame_id: u8) {
        self.inner.lock().unwrap().waiters.remove(&frame_id);
    }

    /// Drop every registered waiter sender, waking their owners with a
    /// closed channel. Called when the reader task terminates.
    pub(crate) fn close_all(&self) {
        self.inner.lock().unwrap().waiters.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().waiters.len()
    }
}

/// A registered waiter: the allocated frame id plus the receiving end
/// of its delivery slot. Unregisters itself on drop.
pub(crate) struct Waiter {
    table: Arc<WaiterTable>,
    frame_id: u8,
    rx: mpsc::Receiver<Event>,
}

impl Waiter {
    pub(crate) fn frame_id(&self) -> u8 {
        self.frame_id
    }

    /// Wait for the next delivered event. `None` means the reader task
    /// has terminated and closed all waiters.
    pub(crate) async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for Waiter {
    fn drop(&mut self) {
        self.table.unregister(self.frame_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocator_never_yields_zero_and_wraps() {
        let table = Arc::new(WaiterTable::new());
        let mut prev = 0u8;
        for i in 0..600 {
            let id = table.allocate_id();
            assert_ne!(id, 0, "allocation {i} yielded 0");
            assert_ne!(id, prev, "allocation {i} repeated {id}");
            prev = id;
        }
    }

    #[test]
    fn allocator_continues_at_one_after_255() {
        let table = Arc::new(WaiterTable::new());
        for _ in 0..255 {
            table.allocate_id();
        }
        assert_eq!(table.allocate_id(), 1);
    }

    #[test]
    fn register_then_drop_leaves_table_empty() {
        let table = Arc::new(WaiterTable::new());
        let waiter = table.register();
        let id = waiter.frame_id();
        assert_eq!(table.len(), 1);
        assert!(table.lookup(id).is_some());
        drop(waiter);
        assert_eq!(table.len(), 0);
        assert!(table.lookup(id).is_none());
    }

    #[test]
    fn allocator_skips_live_waiter_ids() {
        let table = Arc::new(WaiterTable::new());
        let held = table.register();
        assert_eq!(held.frame_id(), 1);
        // Wrap the counter all the way around; id 1 must not be reissued
        // while its waiter is alive.
        for i in 0..300 {
            let id = table.allocate_id();
            assert_ne!(id, held.frame_id(), "allocation {i} reused a live id");
        }
        drop(held);
        // Released ids become available again.
        let mut seen_one = false;
        for _ in 0..255 {
            if table.allocate_id() == 1 {
                seen_one = true;
                break;
            }
        }
        assert!(seen_one);
    }

    #[tokio::test]
    async fn close_all_wakes_waiters_with_closed_channel() {
        let table = Arc::new(WaiterTable::new());
        let mut waiter = table.register();
        table.close_all();
        assert!(waiter.recv().await.is_none());
    }

    #[tokio::test]
    async fn delivery_reaches_the_registered_waiter() {
        let table = Arc::new(WaiterTable::new());
        let mut waiter = table.register();
        let tx = table.lookup(waiter.frame_id()).unwrap();
        tx.try_send(Event::ModemStatus(beeline_core::types::ModemStatus::JoinedNetwork))
            .unwrap();
        assert!(matches!(
            waiter.recv().await,
            Some(Event::ModemStatus(
                beeline_core::types::ModemStatus::JoinedNetwork
            ))
        ));
    }
}
