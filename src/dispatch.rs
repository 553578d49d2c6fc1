//! Async dispatch bridge between slow, fallible operations and the
//! interactive thread.
//!
//! Each dispatched operation produces exactly one `Outcome` — `Success` or
//! `Failure` — which travels over a single result queue tagged with the
//! dispatch id. The interactive thread polls the queue every 100ms and runs
//! the callback registered for that dispatch, so
//! callbacks never cross-wire even when concurrent operations finish out of
//! order. There is no cancellation and no timeout: a hung operation stays
//! outstanding forever.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Polling cadence of the interactive thread
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Final result of one dispatched operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  Success(T),
  Failure(String),
}

impl<T> Outcome<T> {
  pub fn is_success(&self) -> bool {
    matches!(self, Outcome::Success(_))
  }
}

/// Type-erased message sent back from a worker
enum Message {
  Success(Box<dyn Any + Send>),
  Failure(String),
}

type Callback = Box<dyn FnOnce(Message)>;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
  #[error("Failed to start worker runtime: {0}")]
  Runtime(String),
}

/// ---------------------------------------------------------------------------
/// Dispatcher
/// ---------------------------------------------------------------------------

/// Owned by the interactive thread; not Send. Workers only ever touch the
/// sending half of the queue, so shared state never crosses threads.
pub struct Dispatcher {
  runtime: tokio::runtime::Runtime,
  tx: Sender<(u64, Message)>,
  rx: Receiver<(u64, Message)>,
  pending: RefCell<HashMap<u64, Callback>>,
  next_id: Cell<u64>,
}

impl Dispatcher {
  pub fn new() -> Result<Self, DispatchError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
      .enable_all()
      .build()
      .map_err(|e| DispatchError::Runtime(e.to_string()))?;

    let (tx, rx) = mpsc::channel();
    Ok(Self {
      runtime,
      tx,
      rx,
      pending: RefCell::new(HashMap::new()),
      next_id: Cell::new(0),
    })
  }

  /// Number of dispatches whose outcome has not been delivered yet
  pub fn outstanding(&self) -> usize {
    self.pending.borrow().len()
  }

  /// Run an async operation on the worker runtime and deliver its outcome
  /// to `on_done` during a later `poll` on this thread.
  pub fn dispatch<T, E, Fut, C>(&self, operation: Fut, on_done: C)
  where
    T: Send + 'static,
    E: Display,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    C: FnOnce(Outcome<T>) + 'static,
  {
    let id = self.register(on_done);
    let tx = self.tx.clone();
    self.runtime.spawn(async move {
      let message = match operation.await {
        Ok(value) => Message::Success(Box::new(value)),
        Err(e) => Message::Failure(e.to_string()),
      };
      // The receiver may be gone at shutdown; nothing left to notify then
      let _ = tx.send((id, message));
    });
  }

  /// Run a blocking operation on its own dedicated thread. One thread per
  /// dispatch, no pooling, no concurrency limit.
  pub fn dispatch_blocking<T, E, F, C>(&self, operation: F, on_done: C)
  where
    T: Send + 'static,
    E: Display,
    F: FnOnce() -> Result<T, E> + Send + 'static,
    C: FnOnce(Outcome<T>) + 'static,
  {
    let id = self.register(on_done);
    let tx = self.tx.clone();
    thread::spawn(move || {
      let message = match operation() {
        Ok(value) => Message::Success(Box::new(value)),
        Err(e) => Message::Failure(e.to_string()),
      };
      let _ = tx.send((id, message));
    });
  }

  fn register<T, C>(&self, on_done: C) -> u64
  where
    T: Send + 'static,
    C: FnOnce(Outcome<T>) + 'static,
  {
    let id = self.next_id.get();
    self.next_id.set(id + 1);

    let callback: Callback = Box::new(move |message| {
      let outcome = match message {
        Message::Success(value) => match value.downcast::<T>() {
          Ok(value) => Outcome::Success(*value),
          Err(_) => Outcome::Failure("Dispatch result had unexpected type".to_string()),
        },
        Message::Failure(message) => Outcome::Failure(message),
      };
      on_done(outcome);
    });
    self.pending.borrow_mut().insert(id, callback);
    id
  }

  /// Drain every ready outcome and invoke its callback. Returns the number
  /// of callbacks delivered. Messages whose callback is no longer registered
  /// are dropped silently.
  pub fn poll(&self) -> usize {
    let mut delivered = 0;
    while let Ok((id, message)) = self.rx.try_recv() {
      let callback = self.pending.borrow_mut().remove(&id);
      if let Some(callback) = callback {
        callback(message);
        delivered += 1;
      }
    }
    delivered
  }

  /// Poll at the given interval until no dispatch is outstanding.
  /// Re-arms only while something is outstanding rather than polling forever.
  pub fn pump(&self, interval: Duration) {
    while self.outstanding() > 0 {
      if self.poll() == 0 {
        thread::sleep(interval);
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
