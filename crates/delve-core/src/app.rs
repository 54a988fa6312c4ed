//! The application loop: [`Model`], [`Driver`], [`Effect`], [`App`].
//!
//! The loop is single-threaded and blocking. Each iteration waits for exactly
//! one input message, lets the model process it completely, redraws the
//! console and presents the changed cells. Nothing is buffered across
//! iterations.

use crate::console::{Console, Frame, compute_frame, full_frame};
use crate::messages::Msg;

/// Convenience alias for driver and loop errors.
pub type Error = Box<dyn std::error::Error>;

/// A side-effect requested by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop. The driver is closed and `run` returns
    /// `Ok(())`.
    End,
}

/// The application model.
pub trait Model {
    /// Process one message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `console`. The console is cleared
    /// before every call.
    fn draw(&self, console: &mut Console);
}

/// Back-end driver (terminal, test harness, ...).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Error>;

    /// Block until the next input message is available and return it.
    fn wait_msg(&mut self) -> Result<Msg, Error>;

    /// Present a computed frame.
    fn flush(&mut self, frame: Frame) -> Result<(), Error>;

    /// Restore the back-end. Called exactly once, also after errors.
    fn close(&mut self);
}

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    prev: Console,
    curr: Console,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            prev: Console::new(config.width, config.height),
            curr: Console::new(config.width, config.height),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the loop until the model returns [`Effect::End`].
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model and draws the first frame.
    /// 3. Loops: wait → update → draw → diff → flush.
    pub fn run(&mut self) -> Result<(), Error> {
        self.driver.init()?;
        let res = self.run_loop();
        self.driver.close();
        res
    }

    fn run_loop(&mut self) -> Result<(), Error> {
        // Drivers start from a cleared screen, so the first diff against a
        // blank console is a complete frame.
        if self.step(Msg::Init)? {
            return Ok(());
        }
        loop {
            let msg = self.driver.wait_msg()?;
            if self.step(msg)? {
                log::debug!("model requested end of loop");
                return Ok(());
            }
        }
    }

    /// Returns `true` if the app should stop.
    fn step(&mut self, msg: Msg) -> Result<bool, Error> {
        // Terminals may wipe the screen on resize, so the last frame can no
        // longer be trusted.
        let repaint = matches!(msg, Msg::Screen { .. });
        if let Some(Effect::End) = self.model.update(msg) {
            return Ok(true);
        }
        self.curr.clear();
        self.model.draw(&mut self.curr);
        let frame = if repaint {
            log::debug!("screen changed, repainting every cell");
            full_frame(&self.curr)
        } else {
            compute_frame(&self.prev, &self.curr)
        };
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        self.prev.copy_from(&self.curr);
        Ok(false)
    }
}
