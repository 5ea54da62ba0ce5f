//! Mount/unmount bookkeeping.
//!
//! A [`Scope`] collects cleanups registered while something is mounted and
//! runs them exactly once: on [`Scope::dispose`], or when the last clone of the
//! scope is dropped, whichever comes first.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `disposer`. Cleanups run in reverse registration order.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn dispose(&self) {
        self.inner.run_disposers();
    }

    pub fn pending(&self) -> usize {
        self.inner.disposers.borrow().len()
    }
}

impl ScopeInner {
    fn run_disposers(&self) {
        // Taken out first so a disposer may touch the scope again.
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers.into_iter().rev() {
            disposer();
        }
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.run_disposers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn explicit_dispose_runs_in_reverse_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let scope = Scope::new();
        for i in 0..3 {
            let log = log.clone();
            scope.add_disposer(move || log.borrow_mut().push(i));
        }
        scope.dispose();
        scope.dispose();
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
        assert_eq!(scope.pending(), 0);
    }

    #[test]
    fn drop_of_last_clone_disposes() {
        let hit = Rc::new(Cell::new(false));
        {
            let scope = Scope::new();
            let keep = scope.clone();
            let hit = hit.clone();
            scope.add_disposer(move || hit.set(true));
            drop(scope);
            assert_eq!(keep.pending(), 1);
        }
        assert!(hit.get());
    }
}
