use std::io::Write;

use crate::{
    event::Event,
    program::{Context, ProgramError},
    terminal::Terminal,
};

/// State driven by the supervisor loop.
///
/// `init` runs once before any event and owns the first full draw; after
/// that every event goes through `update` and, unless an exit was
/// requested, is followed by `view`.
pub trait Model {
    fn init<W: Write>(&mut self, terminal: &mut Terminal<W>) -> Result<(), ProgramError>;

    fn update(&mut self, cx: &mut Context, event: Event) -> Result<(), ProgramError>;

    fn view<W: Write>(&self, terminal: &mut Terminal<W>) -> Result<(), ProgramError>;
}
