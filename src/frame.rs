use std::io::{self, Write};

use tui::symbols::line::{BOTTOM_LEFT, BOTTOM_RIGHT, HORIZONTAL, TOP_LEFT, TOP_RIGHT, VERTICAL};

use crate::{program::ProgramError, terminal::Terminal};

/// Left margin, in columns, applied to every row of the box and the footer.
pub const OFFSET: u16 = 3;

/// Geometry of the bordered box.
///
/// The box occupies `lines + 2` rows from the top of the screen: a top
/// border, `lines` interior rows and a bottom border. Every row is `cols`
/// columns wide and starts `offset` columns from the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    cols: u16,
    lines: u16,
    offset: u16,
}

impl FrameLayout {
    pub fn new(cols: u16, lines: u16, offset: u16) -> Result<Self, ProgramError> {
        if cols < 3 {
            return Err(ProgramError::TerminalTooNarrow { width: cols });
        }
        Ok(Self {
            cols,
            lines,
            offset,
        })
    }

    pub fn lines(&self) -> u16 {
        self.lines
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn inner_width(&self) -> u16 {
        self.cols - 2
    }

    pub fn height(&self) -> u16 {
        self.lines + 2
    }

    /// Screen row of the first interior row.
    pub fn first_row(&self) -> u16 {
        1
    }

    /// Screen row of the timestamp footer, just below the bottom border.
    pub fn footer_row(&self) -> u16 {
        self.height()
    }

    /// Columns available right of the margin on the rows below the box.
    pub fn footer_width(&self) -> u16 {
        self.cols + self.offset
    }

    pub fn margin(&self) -> String {
        " ".repeat(self.offset as usize)
    }

    pub fn top_border(&self) -> String {
        self.rule(TOP_LEFT, TOP_RIGHT)
    }

    pub fn bottom_border(&self) -> String {
        self.rule(BOTTOM_LEFT, BOTTOM_RIGHT)
    }

    pub fn empty_row(&self) -> String {
        format!(
            "{VERTICAL}{}{VERTICAL}",
            " ".repeat(self.inner_width() as usize)
        )
    }

    fn rule(&self, left: &str, right: &str) -> String {
        format!(
            "{left}{}{right}",
            HORIZONTAL.repeat(self.inner_width() as usize)
        )
    }
}

/// Clears the screen and draws the empty box from the origin.
pub fn setup<W: Write>(terminal: &mut Terminal<W>, layout: &FrameLayout) -> io::Result<()> {
    let margin = layout.margin();

    terminal.clear_screen()?;
    terminal.move_to_origin()?;

    for row in 0..layout.height() {
        let line = if row == 0 {
            layout.top_border()
        } else if row == layout.height() - 1 {
            layout.bottom_border()
        } else {
            layout.empty_row()
        };
        terminal.move_to_row(row)?;
        terminal.line_start()?;
        terminal.print(&margin)?;
        terminal.print(&line)?;
    }

    terminal.flush()
}
