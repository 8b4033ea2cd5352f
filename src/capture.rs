//! Scoped pointer capture for the duration of one gesture.
//!
//! While a drag or resize is active, pointer-move and pointer-up must be
//! observed even after the pointer leaves the canvas, so listeners are
//! attached to the document rather than the canvas. They exist only between
//! pointer-down and the end of the gesture: [`CaptureGuard`] attaches them on
//! acquisition and detaches them when dropped, which covers pointer-up,
//! host cancellation, a failed gesture start, and the engine being torn down.

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{EventTarget, PointerEvent};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no document to attach pointer listeners to")]
    NoDocument,
    #[error("failed to attach {event} listener: {reason}")]
    Attach { event: &'static str, reason: String },
}

/// A set of global listeners that can be attached and detached.
pub trait PointerListeners {
    /// Start delivering events.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError` if any listener could not be attached. An
    /// implementation must leave nothing attached when it fails.
    fn attach(&mut self) -> Result<(), CaptureError>;

    /// Stop delivering events. Must be safe to call after a partial attach.
    fn detach(&mut self);
}

/// Holds listeners attached for exactly as long as the guard lives.
pub struct CaptureGuard<L: PointerListeners> {
    listeners: L,
}

impl<L: PointerListeners> CaptureGuard<L> {
    /// Attach `listeners` and return the guard that will detach them.
    ///
    /// # Errors
    ///
    /// Propagates the attach failure; nothing stays attached in that case.
    pub fn acquire(mut listeners: L) -> Result<Self, CaptureError> {
        listeners.attach()?;
        Ok(Self { listeners })
    }
}

impl<L: PointerListeners> Drop for CaptureGuard<L> {
    fn drop(&mut self) {
        self.listeners.detach();
    }
}

type PointerCallback = Closure<dyn FnMut(PointerEvent)>;

const MOVE_EVENT: &str = "pointermove";
const END_EVENTS: [&str; 2] = ["pointerup", "pointercancel"];

/// Document-level `pointermove` / `pointerup` / `pointercancel` listeners.
pub struct DocumentListeners {
    target: EventTarget,
    on_move: PointerCallback,
    on_end: PointerCallback,
}

impl DocumentListeners {
    /// Wrap callbacks for the current window's document.
    ///
    /// # Errors
    ///
    /// Returns `NoDocument` outside a browser window context.
    pub fn for_document(
        on_move: impl FnMut(PointerEvent) + 'static,
        on_end: impl FnMut(PointerEvent) + 'static,
    ) -> Result<Self, CaptureError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(CaptureError::NoDocument)?;
        Ok(Self {
            target: document.into(),
            on_move: Closure::new(on_move),
            on_end: Closure::new(on_end),
        })
    }

    fn bindings(&self) -> impl Iterator<Item = (&'static str, &PointerCallback)> {
        std::iter::once((MOVE_EVENT, &self.on_move)).chain(END_EVENTS.into_iter().map(|e| (e, &self.on_end)))
    }
}

impl PointerListeners for DocumentListeners {
    fn attach(&mut self) -> Result<(), CaptureError> {
        let result = self.bindings().try_for_each(|(event, cb)| {
            self.target
                .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
                .map_err(|e| CaptureError::Attach { event, reason: format!("{e:?}") })
        });
        if result.is_err() {
            self.detach();
        }
        result
    }

    fn detach(&mut self) {
        for (event, cb) in self.bindings() {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
            {
                tracing::warn!(event, error = ?e, "failed to detach pointer listener");
            }
        }
    }
}
