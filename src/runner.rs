use std::time::Duration;

use crate::error::Result;
use crate::progress::TreeProgress;
use crate::terminal::Terminal;
use crate::tree::ProgressTree;

/// A caller-side redraw loop: reserve room once, then restore, draw and
/// sleep until told to stop.
///
/// The engine itself never redraws on its own; this is the loop most
/// callers would otherwise write by hand.
///
/// ```rust,ignore
/// let tree = build_tree(&values);
/// RenderLoop::new(TreeProgress::new(), AnsiTerminal::stdout())
///     .interval(Duration::from_millis(80))
///     .run_until(&tree, || values.iter().all(|v| v.get() == 10))?;
/// ```
pub struct RenderLoop<T: Terminal> {
    progress: TreeProgress,
    term: T,
    interval: Duration,
    started: bool,
}

impl<T: Terminal> RenderLoop<T> {
    /// Create a loop with a 100 ms interval.
    pub fn new(progress: TreeProgress, term: T) -> Self {
        Self {
            progress,
            term,
            interval: Duration::from_millis(100),
            started: false,
        }
    }

    /// Set the repaint interval.
    pub fn interval(mut self, d: Duration) -> Self {
        self.interval = d;
        self
    }

    pub fn progress(&self) -> &TreeProgress {
        &self.progress
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    pub fn into_terminal(self) -> T {
        self.term
    }

    /// Draw one frame over the previous one.
    ///
    /// The first tick reserves room for `tree` before drawing.
    pub fn tick(&mut self, tree: &ProgressTree) -> Result<()> {
        if !self.started {
            self.progress.make_room(&mut self.term, tree)?;
            self.started = true;
        }
        self.progress.restore(&mut self.term)?;
        self.progress.draw(&mut self.term, tree, true, true)
    }

    /// Draw frames every interval until `stop` returns `true`.
    ///
    /// `stop` is checked after each frame and one more frame is drawn once
    /// it returns `true`, so the final state is always on screen. The first
    /// draw error ends the loop and is returned.
    pub fn run_until(&mut self, tree: &ProgressTree, stop: impl Fn() -> bool) -> Result<()> {
        loop {
            self.tick(tree)?;
            if stop() {
                break;
            }
            std::thread::sleep(self.interval);
        }
        self.tick(tree)?;
        tracing::debug!("render loop finished");
        Ok(())
    }
}
