use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveDown, MoveLeft, MoveTo, MoveToColumn, MoveToRow, Show},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

/// Cursor-addressed output over any writer.
///
/// Every primitive only queues control sequences; nothing is sent until
/// [`Terminal::flush`]. The driver never reads terminal state back, so
/// `width` must be captured once with [`width`] before drawing.
pub struct Terminal<W: Write> {
    out: W,
    width: u16,
}

/// Queries the current terminal width in columns.
pub fn width() -> io::Result<u16> {
    let (cols, _rows) = terminal::size()?;
    Ok(cols)
}

impl Terminal<Stdout> {
    pub fn stdout(width: u16) -> Self {
        Self::new(io::stdout(), width)
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self { out, width }
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    pub fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine))
    }

    pub fn move_to_origin(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0))
    }

    pub fn move_to_row(&mut self, row: u16) -> io::Result<()> {
        queue!(self.out, MoveToRow(row))
    }

    pub fn move_to_column(&mut self, column: u16) -> io::Result<()> {
        queue!(self.out, MoveToColumn(column))
    }

    // A zero count is a no-op: most terminals read `CSI 0 B` as one row.
    pub fn move_down(&mut self, rows: u16) -> io::Result<()> {
        if rows == 0 {
            return Ok(());
        }
        queue!(self.out, MoveDown(rows))
    }

    pub fn move_left(&mut self, columns: u16) -> io::Result<()> {
        if columns == 0 {
            return Ok(());
        }
        queue!(self.out, MoveLeft(columns))
    }

    pub fn line_start(&mut self) -> io::Result<()> {
        self.move_to_column(0)
    }

    pub fn line_end(&mut self) -> io::Result<()> {
        self.move_to_column(self.width.saturating_sub(1))
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }
}
