// What the frame loop needs from the windowing layer.
// The real implementation lives in window.rs; tests drive the loop with a fake.

use crate::error::Error;
use crate::types::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close the window (close button, ESC).
    CloseRequested,
    /// The client area changed size.
    Resized { width: usize, height: usize },
    /// Stop the loop. Posted by the window procedure in response to a close request.
    Quit,
}

pub trait Platform {
    /// Next pending event, without blocking. `None` when the queue is drained.
    fn poll_event(&mut self) -> Option<Event>;

    /// Default handling for an event (the window procedure).
    /// A close request posts `Quit`, which shows up in the same drain.
    fn dispatch(&mut self, event: Event);

    /// Copy the whole surface to the visible window.
    fn present(&mut self, surface: &Surface) -> Result<(), Error>;
}
