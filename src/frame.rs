// Fixed-step frame loop and the draw step it drives.
//
// This loop is far from ideal since rendering and logic are the same step and
// thread::sleep is not precise, but it is small and works well enough for a
// simple demo. A better loop would use a fixed-timestep accumulator.

use crate::compose::{alpha_blend, fill};
use crate::config::Config;
use crate::error::Error;
use crate::platform::{Event, Platform};
use crate::types::{BlendFunction, Surface};
use std::thread;
use std::time::{Duration, Instant};

/// Everything one window renders with. Fields drop top to bottom.
pub struct Context {
    pub sprite: Surface,       // immutable after load
    pub background: u32,       // the "brush"
    pub blend: BlendFunction,
    pub back_buffer: Surface,  // always the size of the client area
}

impl Context {
    /// Set up double buffering for a client area of `client` size.
    pub fn new(config: &Config, sprite: Surface, client: (usize, usize)) -> Result<Self, Error> {
        let back_buffer = Surface::new(client.0, client.1)?;
        Ok(Self { sprite, background: config.background, blend: config.blend, back_buffer })
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        log::debug!("releasing sprite and back buffer");
    }
}

/// Start time of the current iteration and the minimum time it should take.
pub struct FrameClock {
    start: Instant,
    step: Duration,
}

impl FrameClock {
    pub fn new(step: Duration) -> Self {
        Self { start: Instant::now(), step }
    }

    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// How much of the step is left, zero once it has been used up.
    pub fn remaining(&self) -> Duration {
        self.step.saturating_sub(self.start.elapsed())
    }

    /// Sleep until the step is over. Best effort: the OS may oversleep.
    pub fn wait(&self) {
        let left = self.remaining();
        if !left.is_zero() {
            thread::sleep(left);
        }
    }
}

/// Draw one frame into the back buffer: clear, then the sprite at the origin.
/// Visual: blue background with the half-transparent sprite in the top-left corner.
pub fn render_frame(ctx: &mut Context) {
    fill(&mut ctx.back_buffer, ctx.background);
    alpha_blend(&mut ctx.back_buffer, 0, 0, &ctx.sprite, &ctx.blend);
}

/// Poll, draw and present until a quit event shows up.
pub fn run_loop<P: Platform>(ctx: &mut Context, platform: &mut P, step: Duration) -> Result<(), Error> {
    let mut clock = FrameClock::new(step);
    let mut done = false;

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while !done {
        clock.begin();

        /* 1) Drain window events. Resizes fix the back buffer before anything draws. */
        while let Some(event) = platform.poll_event() {
            log::trace!("event: {event:?}");
            match event {
                Event::Quit => done = true,
                Event::Resized { width, height } => {
                    ctx.back_buffer.resize(width, height)?;
                    platform.dispatch(event);
                }
                Event::CloseRequested => platform.dispatch(event),
            }
        }
        if done {
            break;
        }

        /* 2) Update and copy the back buffer to the window. */
        render_frame(ctx);
        platform.present(&ctx.back_buffer)?;

        /* 3) FPS, logged once per second */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }

        /* 4) Sleep until the next step. */
        clock.wait();
    }

    log::info!("loop terminated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BACKGROUND, BLENDER, STEP_RATE};
    use crate::types::channels;
    use std::collections::VecDeque;

    /// Scripted platform: `script[n]` is what arrives before iteration `n`.
    #[derive(Default)]
    struct FakePlatform {
        script: VecDeque<Vec<Event>>,
        queue: VecDeque<Event>,
        drained: bool,
        presented: Vec<Surface>,
        present_times: Vec<Instant>,
        polls: usize,
    }

    impl FakePlatform {
        fn with_script(script: Vec<Vec<Event>>) -> Self {
            Self { script: script.into(), ..Default::default() }
        }
    }

    impl Platform for FakePlatform {
        fn poll_event(&mut self) -> Option<Event> {
            if !self.drained {
                self.drained = true;
                self.polls += 1;
                // Close the window if the script ran out, so a buggy loop can't hang the test.
                let batch = self.script.pop_front().unwrap_or_else(|| vec![Event::CloseRequested]);
                self.queue.extend(batch);
            }
            let event = self.queue.pop_front();
            if event.is_none() {
                self.drained = false;
            }
            event
        }

        fn dispatch(&mut self, event: Event) {
            if event == Event::CloseRequested {
                self.queue.push_back(Event::Quit);
            }
        }

        fn present(&mut self, surface: &Surface) -> Result<(), Error> {
            self.presented.push(surface.clone());
            self.present_times.push(Instant::now());
            Ok(())
        }
    }

    fn context(sprite: Surface, w: usize, h: usize) -> Context {
        Context::new(&Config::default(), sprite, (w, h)).unwrap()
    }

    fn transparent_sprite(w: usize, h: usize) -> Surface {
        Surface::new(w, h).unwrap()
    }

    #[test]
    fn background_only_frame_is_solid_blue() {
        let mut ctx = context(transparent_sprite(8, 8), 16, 12);
        render_frame(&mut ctx);
        assert!(ctx.back_buffer.pixels.iter().all(|&p| p == BACKGROUND));
    }

    #[test]
    fn opaque_sprite_is_half_blended() {
        let sprite = Surface::from_pixels(2, 1, vec![0xFF_00_00_00, 0]).unwrap();
        let mut ctx = context(sprite, 4, 4);
        render_frame(&mut ctx);

        let (_, r, g, b) = channels(ctx.back_buffer.pixels[0]);
        let k: f32 = 127.0 / 255.0;
        for (got, bg) in [(r, 100.0), (g, 149.0), (b, 237.0)] {
            let want: f32 = (bg * (1.0 - k)).round();
            assert!((got as f32 - want).abs() <= 1.0, "{got} vs {want}");
        }
        // Fully transparent neighbour and everything outside the sprite stay background.
        assert_eq!(ctx.back_buffer.pixels[1], BACKGROUND);
        assert_eq!(ctx.back_buffer.pixels[3 * 4 + 3], BACKGROUND);
    }

    #[test]
    fn render_is_idempotent() {
        let sprite = Surface::from_pixels(2, 2, vec![0xFF_FF_FF_FF, 0x80_40_20_10, 0, 0x10_10_10_10]).unwrap();
        let mut ctx = context(sprite, 3, 3);
        render_frame(&mut ctx);
        let first = ctx.back_buffer.clone();
        render_frame(&mut ctx);
        assert_eq!(first, ctx.back_buffer);
    }

    #[test]
    fn quit_stops_before_rendering() {
        let mut ctx = context(transparent_sprite(2, 2), 2, 2);
        let mut platform = FakePlatform::with_script(vec![vec![], vec![], vec![Event::Quit]]);
        run_loop(&mut ctx, &mut platform, Duration::ZERO).unwrap();
        assert_eq!(platform.presented.len(), 2);
        assert_eq!(platform.polls, 3);
    }

    #[test]
    fn close_request_becomes_quit_in_the_same_drain() {
        let mut ctx = context(transparent_sprite(2, 2), 2, 2);
        let mut platform = FakePlatform::with_script(vec![vec![Event::CloseRequested]]);
        run_loop(&mut ctx, &mut platform, Duration::ZERO).unwrap();
        assert!(platform.presented.is_empty());
        assert_eq!(platform.polls, 1);
    }

    #[test]
    fn resize_keeps_back_buffer_matching_client_area() {
        let mut ctx = context(transparent_sprite(2, 2), 4, 4);
        let mut platform = FakePlatform::with_script(vec![
            vec![],
            vec![Event::Resized { width: 6, height: 3 }],
            vec![Event::Quit],
        ]);
        run_loop(&mut ctx, &mut platform, Duration::ZERO).unwrap();
        let sizes: Vec<_> = platform.presented.iter().map(Surface::size).collect();
        assert_eq!(sizes, vec![(4, 4), (6, 3)]);
        assert_eq!(ctx.back_buffer.size(), (6, 3));
    }

    #[test]
    fn zero_sized_resize_is_an_error() {
        let mut ctx = context(transparent_sprite(2, 2), 4, 4);
        let mut platform = FakePlatform::with_script(vec![vec![Event::Resized { width: 0, height: 3 }]]);
        assert!(run_loop(&mut ctx, &mut platform, Duration::ZERO).is_err());
    }

    #[test]
    fn fast_iterations_last_at_least_one_step() {
        let sprite = Surface::from_pixels(1, 1, vec![0xFF_FF_FF_FF]).unwrap();
        let mut ctx = Context::new(&Config::default(), sprite, (8, 8)).unwrap();
        assert_eq!(ctx.blend, BLENDER);
        let mut platform = FakePlatform::with_script(vec![vec![], vec![], vec![], vec![Event::Quit]]);
        run_loop(&mut ctx, &mut platform, STEP_RATE).unwrap();

        assert_eq!(platform.present_times.len(), 3);
        let tolerance = Duration::from_millis(5);
        for pair in platform.present_times.windows(2) {
            let gap = pair[1] - pair[0];
            assert!(gap + tolerance >= STEP_RATE, "iteration took only {gap:?}");
        }
    }

    #[test]
    fn clock_reports_remaining_time() {
        let mut clock = FrameClock::new(Duration::from_secs(60));
        clock.begin();
        assert!(clock.remaining() > Duration::from_secs(59));
        let spent = FrameClock::new(Duration::ZERO);
        assert_eq!(spent.remaining(), Duration::ZERO);
    }
}
