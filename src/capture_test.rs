use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[derive(Default)]
struct Counters {
    attached: Cell<u32>,
    detached: Cell<u32>,
}

struct FakeListeners {
    counters: Rc<Counters>,
    fail: bool,
}

impl PointerListeners for FakeListeners {
    fn attach(&mut self) -> Result<(), CaptureError> {
        if self.fail {
            return Err(CaptureError::Attach { event: "pointermove", reason: "denied".into() });
        }
        self.counters.attached.set(self.counters.attached.get() + 1);
        Ok(())
    }

    fn detach(&mut self) {
        self.counters.detached.set(self.counters.detached.get() + 1);
    }
}

fn fake(fail: bool) -> (FakeListeners, Rc<Counters>) {
    let counters = Rc::new(Counters::default());
    (FakeListeners { counters: Rc::clone(&counters), fail }, counters)
}

#[test]
fn acquire_attaches_and_drop_detaches() {
    let (listeners, counters) = fake(false);
    let guard = CaptureGuard::acquire(listeners).unwrap();
    assert_eq!(counters.attached.get(), 1);
    assert_eq!(counters.detached.get(), 0);

    drop(guard);
    assert_eq!(counters.detached.get(), 1);
}

#[test]
fn failed_acquire_returns_error_without_guard() {
    let (listeners, counters) = fake(true);
    let err = CaptureGuard::acquire(listeners).err().unwrap();
    assert!(matches!(err, CaptureError::Attach { event: "pointermove", .. }));
    assert_eq!(counters.attached.get(), 0);
}

#[test]
fn guard_replaced_detaches_previous() {
    let (first, first_counters) = fake(false);
    let (second, second_counters) = fake(false);

    let mut slot = Some(CaptureGuard::acquire(first).unwrap());
    assert!(slot.is_some());
    slot = Some(CaptureGuard::acquire(second).unwrap());
    assert_eq!(first_counters.detached.get(), 1);
    assert_eq!(second_counters.detached.get(), 0);

    slot.take();
    assert_eq!(second_counters.detached.get(), 1);
}

#[test]
fn capture_error_messages() {
    assert_eq!(CaptureError::NoDocument.to_string(), "no document to attach pointer listeners to");
    let e = CaptureError::Attach { event: "pointerup", reason: "boom".into() };
    assert_eq!(e.to_string(), "failed to attach pointerup listener: boom");
}
