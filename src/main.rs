// What you SEE:
// • A 320x320 window filled with cornflower blue.
// • The sprite drawn on top at ~50% opacity, see-through where it is transparent.
// • Close the window or press ESC to quit.

use sprite_blend::assets::load_sprite;
use sprite_blend::config::Config;
use sprite_blend::error::Error;
use sprite_blend::frame::{Context, run_loop};
use sprite_blend::window::MinifbWindow;
use std::process::ExitCode;

/// Window first, then the surfaces drawn into it.
fn initialize(config: &Config) -> Result<(MinifbWindow, Context), Error> {
    let window = MinifbWindow::new(&config.title, config.width, config.height)?;
    let sprite = load_sprite()?;
    let ctx = Context::new(config, sprite, window.client_size())?;
    Ok((window, ctx))
}

fn init_failure_message(e: &Error) -> String {
    format!("Initialization failed: {e}")
}

/// Blocking, user-facing report of a fatal setup error.
/// Visual: an error dialog pops up; the program exits once you dismiss it.
fn report_init_failure(e: &Error) {
    let message = init_failure_message(e);
    log::error!("{message}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();

    /* --- Setup ---
       Visual: the window opens, still empty. Whatever was created is dropped on failure. */
    let (mut window, mut ctx) = match initialize(&config) {
        Ok(parts) => parts,
        Err(e) => {
            report_init_failure(&e);
            return ExitCode::from(1);
        }
    };

    /* --- Main loop ---
       Visual: the blended frame is redrawn every step until you close the window. */
    let result = run_loop(&mut ctx, &mut window, config.step_rate);

    // Surfaces go before the window they were drawn for.
    drop(ctx);
    drop(window);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(1)
        }
    }
}
