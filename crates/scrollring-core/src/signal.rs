use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    pub struct SubId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable value. Subscribers fire after every `set`, even when the value
/// did not change.
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

struct Inner<T: 'static> {
    value: T,
    subs: SlotMap<SubId, Subscriber<T>>,
}

impl<T: Clone + 'static> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            subs: SlotMap::with_key(),
        })))
    }

    pub fn get(&self) -> T {
        self.0.borrow().value.clone()
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubId {
        self.0.borrow_mut().subs.insert(Rc::new(f))
    }

    pub fn unsubscribe(&self, id: SubId) -> bool {
        self.0.borrow_mut().subs.remove(id).is_some()
    }

    // Subscribers run without the cell borrowed, so they may read or write
    // the signal themselves.
    fn notify(&self) {
        let (value, subs) = {
            let inner = self.0.borrow();
            let subs: Vec<Subscriber<T>> = inner.subs.values().cloned().collect();
            (inner.value.clone(), subs)
        };
        for s in subs {
            s(&value);
        }
    }
}

pub fn signal<T: Clone + 'static>(t: T) -> Signal<T> {
    Signal::new(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_then_get() {
        let sig = signal(42);
        sig.set(100);
        assert_eq!(sig.get(), 100);
    }

    #[test]
    fn subscribers_see_new_value_and_can_unsubscribe() {
        let sig = signal(0);
        let seen = Rc::new(Cell::new(-1));
        let id = {
            let seen = seen.clone();
            sig.subscribe(move |v| seen.set(*v))
        };
        sig.set(7);
        assert_eq!(seen.get(), 7);

        assert!(sig.unsubscribe(id));
        sig.set(9);
        assert_eq!(seen.get(), 7);
        assert!(!sig.unsubscribe(id));
    }

    #[test]
    fn equal_values_still_notify() {
        let sig = signal(1);
        let calls = Rc::new(Cell::new(0));
        {
            let calls = calls.clone();
            sig.subscribe(move |_| calls.set(calls.get() + 1));
        }
        sig.set(1);
        sig.set(1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn subscriber_may_read_signal() {
        let sig = signal(0);
        let echo = Rc::new(Cell::new(0));
        {
            let sig2 = sig.clone();
            let echo = echo.clone();
            sig.subscribe(move |_| echo.set(sig2.get()));
        }
        sig.set(5);
        assert_eq!(echo.get(), 5);
    }
}
