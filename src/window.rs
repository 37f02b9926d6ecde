// minifb-backed window.
// Visual effects provided here:
// 1) A fixed-size window showing whatever back buffer we present.
// 2) Close button / ESC turn into a close request, then a quit.

use crate::compose::bit_blt;
use crate::error::Error;
use crate::platform::{Event, Platform};
use crate::types::Surface;
use minifb::{Key, Window, WindowOptions};
use std::collections::VecDeque;

pub struct MinifbWindow {
    window: Window,            // the on-screen window you see
    front: Surface,            // what the window shows; the back buffer is copied in here
    queue: VecDeque<Event>,    // events waiting to be polled
    size: (usize, usize),      // last known client size
    pumped: bool,              // window state already turned into events this drain
    close_posted: bool,        // a close request was already queued
}

impl MinifbWindow {
    /// Create a non-resizable window whose client area is exactly `width` x `height`.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        let front = Surface::new(width, height)?;
        log::info!("opened window \"{title}\" ({width}x{height})");
        Ok(Self {
            window,
            front,
            queue: VecDeque::new(),
            size: (width, height),
            pumped: false,
            close_posted: false,
        })
    }

    /// Current client area size.
    pub fn client_size(&self) -> (usize, usize) {
        self.size
    }

    /// Turn the window state minifb collected during the last update into events.
    fn pump(&mut self) {
        let size = self.window.get_size();
        if size != self.size && size.0 > 0 && size.1 > 0 {
            self.size = size;
            self.queue.push_back(Event::Resized { width: size.0, height: size.1 });
        }
        let closing = !self.window.is_open() || self.window.is_key_down(Key::Escape);
        if closing && !self.close_posted {
            self.close_posted = true;
            self.queue.push_back(Event::CloseRequested);
        }
    }
}

impl Platform for MinifbWindow {
    fn poll_event(&mut self) -> Option<Event> {
        if !self.pumped {
            self.pump();
            self.pumped = true;
        }
        let event = self.queue.pop_front();
        if event.is_none() {
            // Drained; look at the window again next iteration.
            self.pumped = false;
        }
        event
    }

    fn dispatch(&mut self, event: Event) {
        match event {
            Event::CloseRequested => self.queue.push_back(Event::Quit),
            Event::Resized { width, height } => {
                log::debug!("client area is now {width}x{height}");
                if let Err(e) = self.front.resize(width, height) {
                    log::warn!("{e}");
                }
            }
            Event::Quit => {}
        }
    }

    /// Copy the back buffer to the screen. minifb also processes native messages here.
    /// Visual: the window immediately displays the new frame.
    fn present(&mut self, surface: &Surface) -> Result<(), Error> {
        copy_to_front(&mut self.front, surface);
        self.window
            .update_with_buffer(&self.front.pixels, self.front.width, self.front.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }
}

/// Opaque, origin-aligned copy of the whole back buffer onto the front buffer.
fn copy_to_front(front: &mut Surface, back: &Surface) {
    bit_blt(front, 0, 0, back);
}
