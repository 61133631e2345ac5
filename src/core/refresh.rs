use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Token identifying one discovery refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Monotonic counter handing out one generation per discovery refresh
///
/// Beginning a refresh invalidates every earlier one: a location fix or a
/// criteria change supersedes whatever was still in flight.
#[derive(Debug, Default)]
pub struct RefreshGate {
    counter: AtomicU64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh and take its generation
    pub fn begin(&self) -> Generation {
        Generation(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer refresh has begun since this one
    pub fn is_current(&self, generation: Generation) -> bool {
        self.counter.load(Ordering::SeqCst) == generation.0
    }
}

/// Last-writer-wins slot for the published discovery view
///
/// A publish is accepted only from a strictly newer generation than the one
/// held, so a slow old refresh can never overwrite a newer result, whatever
/// order the futures complete in.
#[derive(Debug)]
pub struct LatestSlot<T> {
    inner: Mutex<Published<T>>,
}

#[derive(Debug)]
struct Published<T> {
    generation: u64,
    value: Option<T>,
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Published {
                generation: 0,
                value: None,
            }),
        }
    }

    /// Store the value if its generation is newer than what is held
    ///
    /// Returns whether the value was accepted.
    pub fn publish(&self, generation: Generation, value: T) -> bool {
        let mut slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if generation.0 > slot.generation {
            slot.generation = generation.0;
            slot.value = Some(value);
            true
        } else {
            false
        }
    }

    /// The most recently published value, if any refresh completed yet
    pub fn get(&self) -> Option<T> {
        let slot = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        slot.value.clone()
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
