//! One-shot server-sent event streams.
//!
//! [`send_on`] hands an [`Emitter`] to a producer closure, runs it once on
//! an [`Executor`] and returns the receiving [`EventStream`] right away. The
//! stream completes when the producer returns `Ok`, and ends with the error
//! when it returns `Err`.
//!
//! ```rust,ignore
//! use axum::response::sse::Event;
//! use pagewise_web::{send, EventStream};
//!
//! async fn progress() -> EventStream {
//!     send(|emitter| {
//!         for step in 0..3 {
//!             emitter.send(Event::default().event("step").data(step.to_string()))?;
//!         }
//!         Ok(())
//!     })
//! }
//! ```

use std::fmt;
use std::thread;
use std::time::Duration;

use axum::response::{
    sse::{Event, KeepAlive, Sse},
    IntoResponse, Response,
};
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, error};

type Item = Result<Event, anyhow::Error>;

const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Failure to push an event to the client.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The receiving stream was dropped, usually because the client left.
    #[error("event stream is closed")]
    Closed,

    /// The payload could not be serialized.
    #[error("failed to encode event: {0}")]
    Encode(#[from] axum::Error),
}

/// Sending half handed to the producer.
#[derive(Clone)]
pub struct Emitter {
    sender: mpsc::UnboundedSender<Item>,
}

impl Emitter {
    /// Pushes an event to the client.
    pub fn send(&self, event: Event) -> Result<(), EmitError> {
        self.sender.send(Ok(event)).map_err(|_| EmitError::Closed)
    }

    /// Pushes an unnamed event carrying `data`.
    pub fn send_data(&self, data: impl AsRef<str>) -> Result<(), EmitError> {
        self.send(Event::default().data(data))
    }

    /// Pushes a named event carrying `value` as JSON.
    pub fn send_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), EmitError> {
        let event = Event::default().event(name).json_data(value)?;
        self.send(event)
    }

    /// Returns `true` once the receiving stream is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn fail(&self, err: anyhow::Error) {
        // The client may already be gone; nothing else to notify
        let _ = self.sender.send(Err(err));
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Where the producer runs.
#[derive(Debug, Clone, Default)]
pub enum Executor {
    /// A dedicated OS thread for the single task.
    #[default]
    SingleTaskThread,
    /// The calling thread, before [`send_on`] returns.
    Inline,
    /// The blocking pool of a tokio runtime.
    Runtime(Handle),
}

impl Executor {
    /// Runs `task` once.
    pub fn execute<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Executor::SingleTaskThread => {
                let spawned = thread::Builder::new()
                    .name("pagewise-event".into())
                    .spawn(task);
                if let Err(err) = spawned {
                    error!(error = %err, "failed to spawn event producer thread");
                }
            }
            Executor::Inline => task(),
            Executor::Runtime(handle) => {
                handle.spawn_blocking(task);
            }
        }
    }
}

impl From<Handle> for Executor {
    fn from(handle: Handle) -> Self {
        Executor::Runtime(handle)
    }
}

/// Receiving half, returned to the HTTP layer.
///
/// Responds as `text/event-stream`. With a timeout, the stream ends once it
/// elapses even if the producer is still running. While the producer is
/// quiet, a keep-alive comment goes out every 15 seconds.
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<Item>,
    timeout: Option<Duration>,
    keep_alive: Duration,
}

impl EventStream {
    /// Sets the keep-alive interval.
    pub fn keep_alive(mut self, interval: Duration) -> Self {
        self.keep_alive = interval;
        self
    }

    /// The configured timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Converts into the underlying stream of events.
    pub fn into_stream(self) -> BoxStream<'static, Item> {
        let events = UnboundedReceiverStream::new(self.receiver);
        match self.timeout {
            Some(timeout) => events
                .take_until(async move { tokio::time::sleep(timeout).await })
                .boxed(),
            None => events.boxed(),
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("timeout", &self.timeout)
            .field("keep_alive", &self.keep_alive)
            .finish_non_exhaustive()
    }
}

impl IntoResponse for EventStream {
    fn into_response(self) -> Response {
        let keep_alive = KeepAlive::new().interval(self.keep_alive);
        Sse::new(self.into_stream())
            .keep_alive(keep_alive)
            .into_response()
    }
}

/// Runs `producer` on a dedicated thread, without timeout.
pub fn send<F>(producer: F) -> EventStream
where
    F: FnOnce(&Emitter) -> anyhow::Result<()> + Send + 'static,
{
    send_on(&Executor::default(), None, producer)
}

/// Runs `producer` on a dedicated thread; the stream ends after `timeout`.
pub fn send_with_timeout<F>(timeout: Duration, producer: F) -> EventStream
where
    F: FnOnce(&Emitter) -> anyhow::Result<()> + Send + 'static,
{
    send_on(&Executor::default(), Some(timeout), producer)
}

/// Runs `producer` once on `executor` and returns the stream it feeds.
///
/// The emitter is dropped when the producer returns, which completes the
/// stream. An `Err` is forwarded as the last item.
pub fn send_on<F>(executor: &Executor, timeout: Option<Duration>, producer: F) -> EventStream
where
    F: FnOnce(&Emitter) -> anyhow::Result<()> + Send + 'static,
{
    let (sender, receiver) = mpsc::unbounded_channel();
    let emitter = Emitter { sender };

    executor.execute(move || match producer(&emitter) {
        Ok(()) => debug!("event producer completed"),
        Err(err) => {
            error!(error = %err, "event producer failed");
            emitter.fail(err);
        }
    });

    EventStream {
        receiver,
        timeout,
        keep_alive: KEEP_ALIVE_INTERVAL,
    }
}
