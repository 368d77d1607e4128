//! Streaming reveal of generated code onto the six display faces
//!
//! Each face gets its own periodic timer that appends one character of its
//! source per tick and keeps only the trailing [`REVEAL_WINDOW`] characters.
//! Faces finish independently; the run is over once all six are done.
//!
//! Every run has a number. Starting a new run or cancelling bumps it and
//! aborts the face tasks, and a task only touches its buffer while holding
//! the state lock with a matching run number, so a timer from an older run
//! can never write after the reset.

use crate::models::GeneratedCode;
use log::info;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Number of display faces (cube faces; the sphere shows all six joined)
pub const FACE_COUNT: usize = 6;

/// Maximum characters kept visible per face
pub const REVEAL_WINDOW: usize = 200;

/// Delay between two characters on one face
pub const REVEAL_TICK: Duration = Duration::from_millis(15);

/// Receives buffer changes. Called with the coordinator's lock held, so
/// implementations must not call back into the coordinator.
pub trait RevealSink: Send + Sync + 'static {
    fn face_updated(&self, run: u64, face: usize, text: &str);
    fn reveal_finished(&self, run: u64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceProgress {
    /// `next` is the index of the next source character to reveal
    Pending { next: usize },
    Done,
}

/// Trailing window of revealed text
#[derive(Debug, Clone, Default)]
struct FaceBuffer {
    text: String,
    chars: usize,
}

impl FaceBuffer {
    fn push(&mut self, c: char, window: usize) {
        self.text.push(c);
        self.chars += 1;
        while self.chars > window {
            self.text.remove(0);
            self.chars -= 1;
        }
    }
}

#[derive(Debug, Clone)]
struct FaceSlot {
    source: Vec<char>,
    buffer: FaceBuffer,
    progress: FaceProgress,
}

impl FaceSlot {
    fn idle() -> Self {
        Self {
            source: Vec::new(),
            buffer: FaceBuffer::default(),
            progress: FaceProgress::Done,
        }
    }

    fn new(source: &str) -> Self {
        let source: Vec<char> = source.chars().collect();
        let progress = if source.is_empty() {
            FaceProgress::Done
        } else {
            FaceProgress::Pending { next: 0 }
        };
        Self {
            source,
            buffer: FaceBuffer::default(),
            progress,
        }
    }

    /// Reveals one character. Returns true once the source is exhausted.
    fn advance(&mut self, window: usize) -> bool {
        if let FaceProgress::Pending { next } = self.progress {
            if let Some(&c) = self.source.get(next) {
                self.buffer.push(c, window);
            }
            let next = next + 1;
            self.progress = if next >= self.source.len() {
                FaceProgress::Done
            } else {
                FaceProgress::Pending { next }
            };
        }
        self.progress == FaceProgress::Done
    }

    fn is_done(&self) -> bool {
        self.progress == FaceProgress::Done
    }
}

struct RevealState {
    run: u64,
    generating: bool,
    faces: [FaceSlot; FACE_COUNT],
    tasks: Vec<JoinHandle<()>>,
}

impl RevealState {
    fn abort_tasks(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    fn all_done(&self) -> bool {
        self.faces.iter().all(FaceSlot::is_done)
    }
}

/// Point-in-time copy of the face buffers
#[derive(Debug, Clone, Serialize)]
pub struct RevealSnapshot {
    pub run: u64,
    pub generating: bool,
    pub faces: Vec<String>,
}

impl RevealSnapshot {
    /// Text shown on the sphere: all faces, one per line
    pub fn joined(&self) -> String {
        self.faces.join("\n")
    }
}

fn lock(state: &Mutex<RevealState>) -> MutexGuard<'_, RevealState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct RevealCoordinator {
    state: Arc<Mutex<RevealState>>,
    sink: Arc<dyn RevealSink>,
    tick: Duration,
    window: usize,
}

impl RevealCoordinator {
    pub fn new(sink: Arc<dyn RevealSink>) -> Self {
        Self::with_timing(sink, REVEAL_TICK, REVEAL_WINDOW)
    }

    pub fn with_timing(sink: Arc<dyn RevealSink>, tick: Duration, window: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(RevealState {
                run: 0,
                generating: false,
                faces: std::array::from_fn(|_| FaceSlot::idle()),
                tasks: Vec::new(),
            })),
            sink,
            tick,
            window,
        }
    }

    /// Cancels any running reveal, clears all faces and marks a new run as
    /// generating. Returns the run number to pass to [`stream`](Self::stream).
    pub fn reset(&self) -> u64 {
        let mut state = lock(&self.state);
        state.abort_tasks();
        state.run += 1;
        state.generating = true;
        let run = state.run;
        for face in 0..FACE_COUNT {
            state.faces[face] = FaceSlot::idle();
            self.sink.face_updated(run, face, "");
        }
        run
    }

    /// Starts the face timers for `run`.
    ///
    /// Returns false, without touching anything, when `run` has been
    /// superseded by a later reset or a cancel.
    pub fn stream(&self, run: u64, code: &GeneratedCode) -> bool {
        let mut state = lock(&self.state);
        if state.run != run {
            info!("[reveal] Dropping stale run {} (current {})", run, state.run);
            return false;
        }
        state.abort_tasks();

        for (face, source) in code.face_sources().iter().enumerate() {
            state.faces[face] = FaceSlot::new(source);
        }

        if state.all_done() {
            state.generating = false;
            self.sink.reveal_finished(run);
            return true;
        }
        state.generating = true;

        let pending: Vec<usize> = (0..FACE_COUNT)
            .filter(|&face| !state.faces[face].is_done())
            .collect();
        for face in pending {
            let task = tokio::spawn(run_face(
                Arc::clone(&self.state),
                Arc::clone(&self.sink),
                run,
                face,
                self.tick,
                self.window,
            ));
            state.tasks.push(task);
        }
        info!("[reveal] Run {} streaming {} faces", run, state.tasks.len());
        true
    }

    /// [`reset`](Self::reset) followed by [`stream`](Self::stream)
    pub fn start(&self, code: &GeneratedCode) -> u64 {
        let run = self.reset();
        self.stream(run, code);
        run
    }

    /// Stops every face timer. Buffers keep their current text.
    pub fn cancel(&self) {
        let mut state = lock(&self.state);
        let had_tasks = !state.tasks.is_empty();
        state.abort_tasks();
        state.run += 1;
        state.generating = false;
        if had_tasks {
            info!("[reveal] Cancelled in-flight reveal");
        }
    }

    pub fn is_generating(&self) -> bool {
        lock(&self.state).generating
    }

    pub fn snapshot(&self) -> RevealSnapshot {
        let state = lock(&self.state);
        RevealSnapshot {
            run: state.run,
            generating: state.generating,
            faces: state.faces.iter().map(|f| f.buffer.text.clone()).collect(),
        }
    }

    #[cfg(test)]
    fn progress(&self, face: usize) -> FaceProgress {
        lock(&self.state).faces[face].progress
    }

    #[cfg(test)]
    fn finished_tasks(&self) -> usize {
        lock(&self.state)
            .tasks
            .iter()
            .filter(|task| task.is_finished())
            .count()
    }
}

impl Drop for RevealCoordinator {
    fn drop(&mut self) {
        lock(&self.state).abort_tasks();
    }
}

async fn run_face(
    state: Arc<Mutex<RevealState>>,
    sink: Arc<dyn RevealSink>,
    run: u64,
    face: usize,
    tick: Duration,
    window: usize,
) {
    let mut interval = interval_at(Instant::now() + tick, tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let mut guard = lock(&state);
        if guard.run != run {
            return;
        }

        let slot = &mut guard.faces[face];
        let face_done = slot.advance(window);
        sink.face_updated(run, face, &slot.buffer.text);

        if face_done {
            if guard.all_done() && guard.generating {
                guard.generating = false;
                sink.reveal_finished(run);
            }
            return;
        }
    }
}
