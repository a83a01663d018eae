use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::trace;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync + 'static>;

struct TimerSlot {
    // Bumped on every call so a timer that already fired can tell it was superseded
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

fn lock(slot: &Mutex<TimerSlot>) -> MutexGuard<'_, TimerSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Collapses bursts of calls into a single invocation.
///
/// In trailing mode (the default) every call restarts the timer and only the
/// last call of a burst runs, `wait` after it, with its own arguments. In
/// immediate mode the first call of a quiet period runs right away and the
/// rest of the burst is swallowed until `wait` passes without a call.
///
/// Timers are Tokio tasks, so [`call`](Self::call) must happen inside a Tokio
/// runtime.
///
/// ```no_run
/// use std::time::Duration;
/// use youtube_embed_rs::Debouncer;
///
/// # async fn demo() {
/// let on_resize = Debouncer::new(|(w, h): (u32, u32)| println!("{w}x{h}"), Duration::from_millis(300));
/// on_resize.call((800, 600));
/// on_resize.call((1024, 768)); // only this one prints
/// # }
/// ```
pub struct Debouncer<A> {
    func: Callback<A>,
    wait: Duration,
    immediate: bool,
    timer: Arc<Mutex<TimerSlot>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(func: F, wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::build(func, wait, false)
    }

    /// Leading-edge variant: run on the first call, then stay quiet.
    pub fn immediate<F>(func: F, wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::build(func, wait, true)
    }

    fn build<F>(func: F, wait: Duration, immediate: bool) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            wait,
            immediate,
            timer: Arc::new(Mutex::new(TimerSlot {
                generation: 0,
                pending: None,
            })),
        }
    }

    /// Invoke the debounced function.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn call(&self, args: A) {
        let mut slot = lock(&self.timer);
        let call_now = self.immediate && slot.pending.is_none();

        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }
        slot.generation = slot.generation.wrapping_add(1);
        let generation = slot.generation;

        let (now, trailing) = if call_now {
            (Some(args), None)
        } else if self.immediate {
            (None, None)
        } else {
            (None, Some(args))
        };

        let timer = Arc::clone(&self.timer);
        let func = Arc::clone(&self.func);
        let wait = self.wait;
        trace!(?wait, generation, "Debounce timer scheduled");
        slot.pending = Some(tokio::spawn(async move {
            sleep(wait).await;
            {
                let mut slot = lock(&timer);
                if slot.generation != generation {
                    return;
                }
                slot.pending = None;
            }
            if let Some(args) = trailing {
                trace!(generation, "Debounce timer fired");
                func(args);
            }
        }));
        drop(slot);

        if let Some(args) = now {
            (self.func)(args);
        }
    }

    /// Drop the pending invocation, if any.
    pub fn cancel(&self) {
        let mut slot = lock(&self.timer);
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
    }

    /// Whether a timer is currently armed.
    pub fn is_pending(&self) -> bool {
        lock(&self.timer).pending.is_some()
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .field("immediate", &self.immediate)
            .finish()
    }
}

// Pending timers die with the debouncer
impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        if let Some(pending) = lock(&self.timer).pending.take() {
            pending.abort();
        }
    }
}
