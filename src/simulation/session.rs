//! Interactive console session
//!
//! Drives a [`Dispatcher`] from line-based input: passengers board and pick
//! floors, the car travels target by target, and at every arrival the weight
//! leaving the car is asked for. Invalid input is reported and asked for
//! again. End of input ends the session.

use crate::simulation::{Dispatcher, ElevatorResult};
use crate::types::config::defaults;
use crate::types::Floor;
use std::io::{BufRead, Write};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Whether the session keeps going after a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Choice offered while the car is idle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdleChoice {
    Board,
    Wait,
    Quit,
}

/// Parse a comma separated floor list such as `1, 3,5`
pub fn parse_floor_list(line: &str) -> Result<Vec<Floor>, String> {
    let floors = line
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<Floor>().map_err(|e| format!("'{}': {}", part, e)))
        .collect::<Result<Vec<_>, _>>()?;

    if floors.is_empty() {
        return Err("no floor given".to_string());
    }
    Ok(floors)
}

/// Console driver around a dispatcher
#[derive(Debug)]
pub struct ConsoleSession<R, W> {
    dispatcher: Dispatcher,
    input: R,
    output: W,
    idle_poll_interval: Duration,
    idle_wait: Duration,
}

impl<R: BufRead, W: Write> ConsoleSession<R, W> {
    /// Create a session reading from `input` and prompting on `output`
    pub fn new(dispatcher: Dispatcher, input: R, output: W) -> Self {
        Self {
            dispatcher,
            input,
            output,
            idle_poll_interval: Duration::from_millis(defaults::IDLE_POLL_INTERVAL_MS),
            idle_wait: Duration::from_secs(defaults::IDLE_WAIT_SECS),
        }
    }

    /// Set how often and how long an idle car polls for external calls
    pub fn with_idle_timing(mut self, poll_interval: Duration, wait: Duration) -> Self {
        self.idle_poll_interval = poll_interval;
        self.idle_wait = wait;
        self
    }

    /// The dispatcher being driven
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Consume the session, returning the dispatcher
    pub fn into_dispatcher(self) -> Dispatcher {
        self.dispatcher
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> ElevatorResult<()> {
        info!("Console session started");

        loop {
            write!(self.output, "\nElevator info => ")?;
            self.output.flush()?;
            self.dispatcher.report_status();

            if !self.dispatcher.has_target() {
                let flow = match self.prompt_idle()? {
                    IdleChoice::Board => self.board_and_select()?,
                    IdleChoice::Wait => self.wait_for_calls()?,
                    IdleChoice::Quit => Flow::Quit,
                };
                if flow == Flow::Quit {
                    break;
                }
            }

            if self.serve_route()? == Flow::Quit {
                break;
            }
        }

        writeln!(self.output, "Application finished.")?;
        info!("Console session finished");
        Ok(())
    }

    fn serve_route(&mut self) -> ElevatorResult<Flow> {
        while self.dispatcher.has_target() {
            writeln!(self.output, "\nMoving elevator to the next target:")?;
            self.output.flush()?;
            self.dispatcher.advance()?;
            self.dispatcher.report_status();

            write!(
                self.output,
                "It arrived at the destination. Please state the weight of passengers disembarking: "
            )?;
            if self.alight()? == Flow::Quit {
                return Ok(Flow::Quit);
            }

            match self.confirm("New passengers? [y/n]: ")? {
                None => return Ok(Flow::Quit),
                Some(true) => {
                    if self.board_and_select()? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                Some(false) => {}
            }

            if self.dispatcher.has_target() {
                writeln!(self.output, "\nThe elevator will go to the next destination...")?;
            } else {
                writeln!(self.output, "\nThe elevator has no more destination.")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt_idle(&mut self) -> ElevatorResult<IdleChoice> {
        writeln!(self.output, "\nElevator stopped, waiting for an external call or a new route.")?;
        write!(self.output, "[b]oard passengers, [w]ait for external calls, [q]uit: ")?;

        let choice = match self.read_line()? {
            None => IdleChoice::Quit,
            Some(line) => match line.to_lowercase().as_str() {
                "q" | "quit" | "exit" => IdleChoice::Quit,
                "w" | "wait" => IdleChoice::Wait,
                _ => IdleChoice::Board,
            },
        };
        Ok(choice)
    }

    fn board_and_select(&mut self) -> ElevatorResult<Flow> {
        write!(self.output, "\nInform the weight of the passengers you are boarding: ")?;
        loop {
            let Some(weight) = self.read_weight()? else {
                return Ok(Flow::Quit);
            };
            match self.dispatcher.board(weight) {
                Ok(()) => break,
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "Error: {}", e)?;
                    write!(self.output, "Please, enter a valid weight: ")?;
                }
                Err(e) => return Err(e),
            }
        }

        write!(self.output, "Choose a route(s) for example 1,3,5: ")?;
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(Flow::Quit);
            };
            let floors = match parse_floor_list(&line) {
                Ok(floors) => floors,
                Err(e) => {
                    writeln!(self.output, "Error on inserted floor: {}.", e)?;
                    write!(self.output, "Please, insert a valid floor: ")?;
                    continue;
                }
            };
            match self.dispatcher.select_floors(&floors) {
                Ok(()) => return Ok(Flow::Continue),
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "Error: {}", e)?;
                    write!(self.output, "Please, enter a valid route: ")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn alight(&mut self) -> ElevatorResult<Flow> {
        loop {
            let Some(weight) = self.read_weight()? else {
                return Ok(Flow::Quit);
            };
            match self.dispatcher.alight(weight) {
                Ok(()) => return Ok(Flow::Continue),
                Err(e) if e.is_recoverable() => {
                    writeln!(self.output, "Error: {}", e)?;
                    write!(self.output, "Please, enter a valid weight: ")?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn wait_for_calls(&mut self) -> ElevatorResult<Flow> {
        writeln!(self.output, "Waiting up to {}s for external calls...", self.idle_wait.as_secs())?;
        self.output.flush()?;

        let deadline = Instant::now() + self.idle_wait;
        loop {
            if self.dispatcher.has_target() {
                return Ok(Flow::Continue);
            }
            if Instant::now() >= deadline {
                writeln!(self.output, "No external call received.")?;
                return Ok(Flow::Continue);
            }
            thread::sleep(self.idle_poll_interval);
        }
    }

    /// Ask a yes/no question; `None` on end of input
    fn confirm(&mut self, question: &str) -> ElevatorResult<Option<bool>> {
        write!(self.output, "{}", question)?;
        Ok(self
            .read_line()?
            .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes")))
    }

    /// Read a weight, asking again until it parses; `None` on end of input
    fn read_weight(&mut self) -> ElevatorResult<Option<f64>> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<f64>() {
                Ok(weight) => return Ok(Some(weight)),
                Err(e) => {
                    writeln!(self.output, "Error on inserted weight: {}.", e)?;
                    write!(self.output, "Please, insert a valid weight: ")?;
                }
            }
        }
    }

    /// Read one trimmed line; `None` on end of input
    fn read_line(&mut self) -> ElevatorResult<Option<String>> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
