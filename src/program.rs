use std::{io, io::Write, time::Duration};

use thiserror::Error;

use crate::{
    command::Command,
    event::{Event, Listener, SignalProducer, Timer},
    model::Model,
    source::SourceError,
    terminal::Terminal,
};

pub struct Program {
    tick_rate: Duration,
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("terminal too narrow: {width} columns left for the box, need at least 3")]
    TerminalTooNarrow { width: u16 },
    #[error("event channel closed")]
    EventRecv,
}

impl From<std::sync::mpsc::RecvError> for ProgramError {
    fn from(_value: std::sync::mpsc::RecvError) -> Self {
        ProgramError::EventRecv
    }
}

pub type ProgramResult = Result<(), ProgramError>;

#[derive(Debug, Default)]
pub struct Context {
    cmds: Vec<Command>,
}

impl Context {
    pub fn run(&mut self, cmd: Command) {
        self.cmds.push(cmd);
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_secs(10),
        }
    }

    pub fn tick(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Drives `model` until it asks to exit or fails.
    ///
    /// The terminal is restored on every way out, errors included.
    pub fn run<M: Model, W: Write>(
        self,
        terminal: &mut Terminal<W>,
        model: &mut M,
    ) -> ProgramResult {
        let listener = Listener::default();
        terminal.hide_cursor()?;

        let ret = SignalProducer::spawn(listener.subscribe())
            .map_err(ProgramError::from)
            .and_then(|_signals| {
                model.init(terminal)?;
                let timer = Timer::spawn(listener.subscribe(), self.tick_rate);
                let ret = Self::run_event_loop(terminal, &listener, model, Some(&timer));
                timer.kill();
                ret
            });

        let restored = restore(terminal);
        ret?;
        restored?;
        Ok(())
    }

    /// The timer, when given, is rearmed only once a tick has been drawn, so
    /// the refresh interval is the pause between two updates.
    fn run_event_loop<M: Model, W: Write>(
        terminal: &mut Terminal<W>,
        listener: &Listener,
        model: &mut M,
        timer: Option<&Timer>,
    ) -> ProgramResult {
        let mut cx = Context::default();
        loop {
            let event = listener.next()?;

            model.update(&mut cx, event)?;
            for cmd in cx.cmds.drain(..) {
                match cmd {
                    Command::Exit => return Ok(()),
                }
            }
            model.view(terminal)?;

            if let (Event::Tick, Some(timer)) = (event, timer) {
                timer.rearm();
            }
        }
    }
}

/// Shows the cursor again and leaves a clear screen with the cursor home.
pub fn restore<W: Write>(terminal: &mut Terminal<W>) -> io::Result<()> {
    terminal.show_cursor()?;
    terminal.clear_screen()?;
    terminal.move_to_origin()?;
    terminal.flush()
}
