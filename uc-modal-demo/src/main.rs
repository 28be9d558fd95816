mod checkout;
mod error;
mod paths;

use std::fs::File;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use ucdom::{Event, MouseButton, Terminal};

use crate::checkout::{Checkout, Flow};
use crate::error::DemoError;

/// Frame interval while a transition is running.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Poll interval when idle.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() {
    init_logging();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {}", e);
    }
}

fn init_logging() {
    paths::rotate_logs();
    let path = paths::log_file();
    let file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("cannot create log file {}: {e}", path.display());
            return;
        }
    };
    if WriteLogger::init(LevelFilter::Debug, Config::default(), file).is_err() {
        eprintln!("logger already initialised");
    }
}

fn run() -> Result<(), DemoError> {
    let (mut doc, checkout) = Checkout::build()?;
    let mut term = Terminal::new()?;
    log::info!("demo started");

    loop {
        term.render(&doc)?;

        let timeout = if term.has_active_transitions() {
            ANIMATION_FRAME
        } else {
            IDLE_POLL
        };

        for event in term.poll(timeout)? {
            match event {
                Event::Key { key, modifiers } => {
                    if checkout.handle_key(&mut doc, key, modifiers) == Flow::Quit {
                        log::info!("demo finished");
                        return Ok(());
                    }
                }
                Event::Click {
                    x,
                    y,
                    button: MouseButton::Left,
                } => {
                    let target = term.hit_test(&doc, x, y);
                    checkout.handle_click(&mut doc, target);
                }
                Event::Resize { width, height } => log::debug!("resized to {width}x{height}"),
                _ => {}
            }
        }
    }
}
