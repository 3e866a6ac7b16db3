use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;

use kurosuwado_core::{
    reconcile, GameRecord, GameUpdate, HighlightMap, Puzzle, HIGHLIGHT_DECAY_MS,
};

/// Render-ready copy of the view state, handed to the component whenever the
/// store changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ViewSnapshot {
    pub(crate) puzzle: Option<Puzzle>,
    pub(crate) answers: Vec<String>,
    pub(crate) highlights: HighlightMap,
}

/// Per-view state for one crossword game: the latest puzzle, the latest
/// answer snapshot, the transient highlight map and the pending decay timer.
/// Owned by the hosting view and torn down with it; every inbound message
/// replaces state wholesale, nothing is merged. Between fetch responses and
/// push updates the last write observed wins.
pub(crate) struct GameStore {
    puzzle: RefCell<Option<Puzzle>>,
    answers: RefCell<Vec<String>>,
    highlights: Rc<RefCell<HighlightMap>>,
    decay: RefCell<Option<Timeout>>,
    on_change: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl GameStore {
    pub(crate) fn new() -> Self {
        Self {
            puzzle: RefCell::new(None),
            answers: RefCell::new(Vec::new()),
            highlights: Rc::new(RefCell::new(HighlightMap::new())),
            decay: RefCell::new(None),
            on_change: Rc::new(RefCell::new(None)),
        }
    }

    pub(crate) fn set_on_change(&self, hook: Rc<dyn Fn()>) {
        *self.on_change.borrow_mut() = Some(hook);
    }

    pub(crate) fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            puzzle: self.puzzle.borrow().clone(),
            answers: self.answers.borrow().clone(),
            highlights: self.highlights.borrow().clone(),
        }
    }

    /// Replaces puzzle and answers from a fetch response. The fetch is the
    /// baseline, not progress, so it never produces highlights. A response
    /// that violates the data contract is dropped whole.
    pub(crate) fn apply_fetch(&self, record: &GameRecord) {
        let puzzle = match Puzzle::parse(&record.puzzle) {
            Ok(puzzle) => puzzle,
            Err(err) => {
                gloo::console::warn!("dropping game response:", err.to_string());
                return;
            }
        };
        if let Err(err) = puzzle.check_snapshot(&record.answers) {
            gloo::console::warn!("dropping game response:", err.to_string());
            return;
        }
        *self.puzzle.borrow_mut() = Some(puzzle);
        *self.answers.borrow_mut() = record.answers.clone();
        self.notify();
    }

    /// Replaces the answer snapshot from a push update and highlights the
    /// cells that changed. An update that does not match the puzzle's cell
    /// count is dropped whole, keeping prior answers and highlights.
    pub(crate) fn apply_update(&self, update: GameUpdate) {
        let puzzle = self.puzzle.borrow().clone();
        let Some(puzzle) = puzzle else {
            // The subscription can outrun the initial fetch. Keep the
            // snapshot; there is nothing to diff against yet.
            *self.answers.borrow_mut() = update.answers;
            self.notify();
            return;
        };
        if let Err(err) = puzzle.check_snapshot(&update.answers) {
            gloo::console::warn!("dropping update:", err.to_string());
            return;
        }
        let previous = self.answers.borrow().clone();
        let changed = match reconcile(&previous, &update.answers) {
            Ok(changed) => changed,
            Err(err) => {
                gloo::console::warn!("dropping update:", err.to_string());
                return;
            }
        };
        *self.answers.borrow_mut() = update.answers;
        self.apply_highlights(changed);
        self.notify();
    }

    /// Installs a highlight batch and arms its decay. One decay timer is
    /// pending per view at most: a new batch cancels the previous timer
    /// before scheduling its own, so an earlier batch can never clear a
    /// later one.
    pub(crate) fn apply_highlights(&self, changed: HighlightMap) {
        if changed.is_empty() {
            return;
        }
        *self.highlights.borrow_mut() = changed;
        let highlights = self.highlights.clone();
        let on_change = self.on_change.clone();
        let timeout = Timeout::new(HIGHLIGHT_DECAY_MS, move || {
            highlights.borrow_mut().clear();
            let hook = on_change.borrow().clone();
            if let Some(hook) = hook {
                hook();
            }
        });
        if let Some(pending) = self.decay.borrow_mut().replace(timeout) {
            pending.cancel();
        }
    }

    pub(crate) fn cancel_decay(&self) {
        if let Some(pending) = self.decay.borrow_mut().take() {
            pending.cancel();
        }
    }

    /// Drops the change hook and any pending timer so nothing touches state
    /// after the view unmounts.
    pub(crate) fn teardown(&self) {
        self.cancel_decay();
        self.on_change.borrow_mut().take();
    }

    fn notify(&self) {
        let hook = self.on_change.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}
