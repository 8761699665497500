use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A shared progress counter.
///
/// Cloning a `Value` yields another handle to the same cell, so several
/// leaves can mirror one piece of work. The owner updates it while the
/// tree engine reads it exactly once per draw; use [`Value::detach`] for an
/// independent copy.
///
/// ```rust,ignore
/// let done = Value::new(0);
/// let tree = ProgressTree::group([("copy", BarLeaf::new(done.clone()))]);
/// done.add(10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Value(Arc<AtomicU64>);

impl Value {
    pub fn new(value: u64) -> Self {
        Self(Arc::new(AtomicU64::new(value)))
    }

    /// Builds a cell from a fractional reading; negative input stores 0.
    pub fn from_f64(value: f64) -> Self {
        Self::new(floor(value))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, value: u64) {
        self.0.store(value, Ordering::Release);
    }

    /// Stores `floor(value)`, saturating at 0.
    pub fn set_f64(&self, value: f64) {
        self.set(floor(value));
    }

    pub fn add(&self, delta: u64) {
        self.0.fetch_add(delta, Ordering::AcqRel);
    }

    /// A new cell holding the current reading, no longer shared with `self`.
    pub fn detach(&self) -> Self {
        Self::new(self.get())
    }

    /// Returns `true` if both handles point at the same cell.
    pub fn shares_cell(&self, other: &Value) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

// Compares readings, not cell identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for Value {}

fn floor(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.floor() as u64
    }
}
