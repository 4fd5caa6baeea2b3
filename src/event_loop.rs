use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Single-threaded message pump for the terminal host.
///
/// The loop is the only caller of `poll`/`read` on the driver. The handler
/// receives `None` once per iteration so the host can redraw, and `Some`
/// for every input event. Bursts (mouse drags in particular) are drained in
/// one go so rendering does not fall behind the input stream.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }
            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedInput;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn drains_burst_and_stops_on_quit() {
        let key = |c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        let driver = ScriptedInput::new([key('a'), key('b'), key('q'), key('x')]);
        let mut ev_loop = EventLoop::new(driver, Duration::from_millis(0));
        let mut seen = Vec::new();
        let mut ticks = 0;
        ev_loop
            .run(|_, event| {
                let Some(Event::Key(k)) = event else {
                    ticks += 1;
                    return Ok(ControlFlow::Continue);
                };
                seen.push(k.code);
                Ok(if k.code == KeyCode::Char('q') {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('q')]);
        assert_eq!(ticks, 1);
        assert_eq!(ev_loop.driver().remaining(), 1);
    }
}
