use chrono::Utc;
use locator::Coordinate;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TrySendError},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    event::{PositionEvent, PositionFix},
    feed_error::FeedError,
    source::PositionSource,
};

const DEFAULT_INTERVAL_MILLIS: u64 = 1000;
const DEFAULT_MAXIMUM_AGE_MILLIS: u64 = 10_000;
const DEFAULT_TIMEOUT_MILLIS: u64 = 10_000;
const POLL_MILLIS: u64 = 10;

/// Most events a subscription holds before the watcher waits for the consumer.
pub const MAX_BACKLOG: usize = 16;

const HIGH_ACCURACY_M: f64 = 5.0;
const LOW_ACCURACY_M: f64 = 50.0;

type Reading = Option<Result<Coordinate, FeedError>>;

/// How often and how precisely a subscription reads its source.
#[derive(Debug, Clone)]
pub struct FeedOptions {
    pub interval: Duration,
    pub enable_high_accuracy: bool,
    /// A fix younger than this is re-emitted as-is when the device has not moved.
    pub maximum_age: Duration,
    /// How long to wait for a reading before reporting `FeedError::Timeout`.
    pub timeout: Duration,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_INTERVAL_MILLIS),
            enable_high_accuracy: true,
            maximum_age: Duration::from_millis(DEFAULT_MAXIMUM_AGE_MILLIS),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MILLIS),
        }
    }
}

/// A live position watch running on its own thread.
///
/// Events arrive in the order the source produced them. At most
/// [`MAX_BACKLOG`] undelivered events are queued; past that the watcher waits
/// for the consumer. The channel closes once the source is exhausted or the
/// watch is cleared. Dropping the subscription clears it.
pub struct Subscription {
    receiver: Receiver<PositionEvent>,
    running: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

/// Starts watching `source`, reading it once per `options.interval`.
///
/// The source is read on a separate thread, so a source that blocks produces
/// `FeedError::Timeout` events instead of stalling the watch. Such a thread is
/// left to finish its read on its own after the watch is cleared.
pub fn watch_position<S>(source: S, options: FeedOptions) -> Result<Subscription, FeedError>
where
    S: PositionSource + Send + 'static,
{
    let (sender, receiver) = mpsc::sync_channel(MAX_BACKLOG);
    let (request_sender, request_receiver) = mpsc::channel();
    let (reading_sender, reading_receiver) = mpsc::channel();
    let running = Arc::new(AtomicBool::new(true));
    let paused = Arc::new(AtomicBool::new(false));

    thread::Builder::new()
        .name("position-source".to_string())
        .spawn(move || read_source(source, request_receiver, reading_sender))
        .map_err(|e| FeedError::SpawnFailed(e.to_string()))?;

    let worker = Watcher {
        options,
        sender,
        requests: request_sender,
        readings: reading_receiver,
        pending: false,
        running: Arc::clone(&running),
        paused: Arc::clone(&paused),
        last_fix: None,
    };

    let handle = thread::Builder::new()
        .name("position-feed".to_string())
        .spawn(move || worker.run())
        .map_err(|e| FeedError::SpawnFailed(e.to_string()))?;

    Ok(Subscription {
        receiver,
        running,
        paused,
        handle: Some(handle),
    })
}

impl Subscription {
    /// Blocks until the next event, or returns `None` once the feed has ended.
    pub fn recv(&self) -> Option<PositionEvent> {
        self.receiver.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<PositionEvent, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Blocking iterator over events until the feed ends.
    pub fn events(&self) -> mpsc::Iter<'_, PositionEvent> {
        self.receiver.iter()
    }

    /// Events already delivered, without blocking.
    pub fn try_iter(&self) -> mpsc::TryIter<'_, PositionEvent> {
        self.receiver.try_iter()
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Whether the watcher thread is still producing events.
    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Stops the watch and waits for its thread to exit. Idempotent.
    pub fn clear_watch(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                eprintln!("Position feed thread panicked.");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.clear_watch();
    }
}

// Serves one reading per request until the watcher hangs up or the source ends.
fn read_source<S: PositionSource>(
    mut source: S,
    requests: Receiver<()>,
    readings: Sender<Reading>,
) {
    while requests.recv().is_ok() {
        let reading = source.next_position();
        let exhausted = reading.is_none();
        if readings.send(reading).is_err() || exhausted {
            break;
        }
    }
}

enum Wait {
    Ready(Reading),
    TimedOut,
    Stopped,
}

struct Watcher {
    options: FeedOptions,
    sender: SyncSender<PositionEvent>,
    requests: Sender<()>,
    readings: Receiver<Reading>,
    pending: bool, // A request is out and its reading has not arrived yet
    running: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
    last_fix: Option<(PositionFix, Instant)>,
}

impl Watcher {
    fn run(mut self) {
        while self.running.load(Ordering::SeqCst) {
            while self.paused.load(Ordering::SeqCst) && self.running.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(POLL_MILLIS));
            }
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            let started = Instant::now();

            if !self.pending {
                if self.requests.send(()).is_err() {
                    break;
                }
                self.pending = true;
            }

            let event = match self.wait_for_reading(started + self.options.timeout) {
                Wait::Ready(None) | Wait::Stopped => break,
                Wait::Ready(Some(Ok(coordinate))) => {
                    PositionEvent::Fix(self.fix_for(coordinate, started))
                }
                Wait::Ready(Some(Err(e))) => PositionEvent::Error(e),
                Wait::TimedOut => PositionEvent::Error(FeedError::Timeout),
            };

            if !self.deliver(event) {
                break;
            }

            self.sleep_while_running(self.options.interval.saturating_sub(started.elapsed()));
        }
    }

    fn wait_for_reading(&mut self, deadline: Instant) -> Wait {
        while self.running.load(Ordering::SeqCst) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self
                .readings
                .recv_timeout(remaining.min(Duration::from_millis(POLL_MILLIS)))
            {
                Ok(reading) => {
                    self.pending = false;
                    return Wait::Ready(reading);
                }
                Err(RecvTimeoutError::Timeout) => {
                    if Instant::now() >= deadline {
                        return Wait::TimedOut;
                    }
                }
                // The source thread ended without answering.
                Err(RecvTimeoutError::Disconnected) => return Wait::Ready(None),
            }
        }
        Wait::Stopped
    }

    // Returns false when the watch should end.
    fn deliver(&self, mut event: PositionEvent) -> bool {
        loop {
            match self.sender.try_send(event) {
                Ok(()) => return true,
                Err(TrySendError::Disconnected(_)) => return false,
                Err(TrySendError::Full(returned)) => {
                    if !self.running.load(Ordering::SeqCst) {
                        return false;
                    }
                    event = returned;
                    thread::sleep(Duration::from_millis(POLL_MILLIS));
                }
            }
        }
    }

    fn fix_for(&mut self, coordinate: Coordinate, now: Instant) -> PositionFix {
        if let Some((cached, taken_at)) = &self.last_fix {
            if cached.coordinate == coordinate
                && now.duration_since(*taken_at) < self.options.maximum_age
            {
                return cached.clone();
            }
        }

        let fix = PositionFix {
            coordinate,
            accuracy_m: if self.options.enable_high_accuracy {
                HIGH_ACCURACY_M
            } else {
                LOW_ACCURACY_M
            },
            timestamp: Utc::now(),
        };
        self.last_fix = Some((fix.clone(), now));
        fix
    }

    fn sleep_while_running(&self, duration: Duration) {
        let deadline = Instant::now() + duration;
        while self.running.load(Ordering::SeqCst) {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            thread::sleep((deadline - now).min(Duration::from_millis(POLL_MILLIS)));
        }
    }
}
