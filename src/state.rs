//! Observable view state and one-shot event delivery.
//!
//! [`ViewState`] is the value holder behind every field a screen renders
//! (`items`, `is_loading`, field errors). Only the owning coordinator
//! writes it; screens read snapshots or subscribe to changes.
//!
//! [`EventChannel`] carries one-shot notifications (navigate back, show a
//! message, sign-in succeeded). Each event is delivered at most once, to the
//! single receiver the active screen takes.

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};

/// Observable value owned by a coordinator.
///
/// Backed by a [`tokio::sync::watch`] channel: writers replace or modify the
/// value in place and every subscriber sees the latest version.
///
/// # Examples
///
/// ```
/// use todolist::state::ViewState;
///
/// let loading = ViewState::new(false);
/// let mut rx = loading.subscribe();
/// assert!(!*rx.borrow_and_update());
/// assert!(!loading.get());
/// ```
#[derive(Debug)]
pub struct ViewState<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> ViewState<T> {
    /// Creates a holder with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Returns a snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Returns a receiver that observes every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub(crate) fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Applies `modify` and notifies subscribers only if it returns `true`.
    pub(crate) fn update_if(&self, modify: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(modify)
    }
}

impl<T: Clone + Default> Default for ViewState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Single-consumer queue of one-shot UI events.
///
/// Events emitted before the receiver is taken are buffered. Once taken,
/// [`take_receiver`](Self::take_receiver) returns `None`; if the receiver is
/// dropped, later events are discarded.
///
/// # Examples
///
/// ```ignore
/// use todolist::state::EventChannel;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let events = EventChannel::new();
/// events.emit("saved");
/// let mut rx = events.take_receiver().unwrap();
/// assert_eq!(rx.recv().await, Some("saved"));
/// assert!(events.take_receiver().is_none());
/// # });
/// ```
#[derive(Debug)]
pub struct EventChannel<E> {
    tx: mpsc::UnboundedSender<E>,
    rx: Mutex<Option<mpsc::UnboundedReceiver<E>>>,
}

impl<E> EventChannel<E> {
    /// Creates an empty channel.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// Hands out the receiving end. Only the first call returns `Some`.
    pub fn take_receiver(&self) -> Option<mpsc::UnboundedReceiver<E>> {
        self.rx.lock().take()
    }

    pub(crate) fn emit(&self, event: E) {
        if self.tx.send(event).is_err() {
            tracing::trace!("event dropped: receiver is gone");
        }
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}
