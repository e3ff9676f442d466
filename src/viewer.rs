use std::io::Write;

use chrono::Local;
use tui::symbols::line::VERTICAL;

use crate::{
    command::Command,
    config::ViewConfig,
    event::Event,
    frame::{self, FrameLayout},
    model::Model,
    program::{Context, ProgramError, ProgramResult},
    source::Source,
    terminal::Terminal,
    window::{truncate, ContentWindow},
};

pub const FOOTER_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keeps the box filled with the tail of one source.
pub struct Viewer {
    layout: FrameLayout,
    source: Box<dyn Source>,
    window: ContentWindow,
}

impl Viewer {
    pub fn new(config: &ViewConfig, source: Box<dyn Source>) -> Result<Self, ProgramError> {
        Ok(Self {
            layout: FrameLayout::new(config.cols, config.lines, config.offset)?,
            source,
            window: ContentWindow::default(),
        })
    }

    fn refresh(&mut self) -> ProgramResult {
        let content = self.source.fetch()?;
        log::debug!("fetched {} bytes from {}", content.len(), self.source.describe());
        self.window = ContentWindow::new(
            &content,
            self.layout.lines() as usize,
            self.layout.inner_width() as usize,
        );
        Ok(())
    }
}

impl Model for Viewer {
    /// Fetches before drawing so a source that fails right away never
    /// leaves an empty box behind.
    fn init<W: Write>(&mut self, terminal: &mut Terminal<W>) -> ProgramResult {
        self.refresh()?;
        frame::setup(terminal, &self.layout)?;
        self.view(terminal)
    }

    fn update(&mut self, cx: &mut Context, event: Event) -> ProgramResult {
        match event {
            Event::Tick => self.refresh(),
            Event::Interrupt => {
                log::info!("interrupted, shutting down");
                cx.run(Command::Exit);
                Ok(())
            }
        }
    }

    fn view<W: Write>(&self, terminal: &mut Terminal<W>) -> ProgramResult {
        let footer = Local::now().format(FOOTER_FORMAT).to_string();
        render(terminal, &self.layout, &self.window, &footer)?;
        Ok(())
    }
}

/// Repaints the interior rows holding `window` and the footer line.
///
/// Rows past the end of `window` are not touched. Each repainted row gets its
/// right border back after the content, whatever the content length. The
/// footer is cut to the columns right of the margin.
pub fn render<W: Write>(
    terminal: &mut Terminal<W>,
    layout: &FrameLayout,
    window: &ContentWindow,
    footer: &str,
) -> std::io::Result<()> {
    let margin = layout.margin();

    terminal.move_to_origin()?;
    terminal.move_down(layout.first_row())?;

    for line in window.lines().iter().take(layout.lines() as usize) {
        terminal.line_start()?;
        terminal.clear_line()?;
        terminal.print(&margin)?;
        terminal.print(VERTICAL)?;
        terminal.print(line)?;

        terminal.line_end()?;
        terminal.move_left(layout.offset())?;
        terminal.print(VERTICAL)?;
        terminal.move_down(1)?;
    }

    terminal.move_to_row(layout.footer_row())?;
    terminal.line_start()?;
    terminal.clear_line()?;
    terminal.print(&margin)?;
    terminal.print(&truncate(footer, layout.footer_width() as usize))?;

    terminal.flush()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::source::SourceError;
    use std::{collections::VecDeque, io, path::PathBuf};

    const WIDTH: u16 = 20;
    const WIDE: u16 = 30;
    const LINES: u16 = 3;
    const STAMP: &str = "2024-05-01 09:30:00";

    /// Hands out scripted contents, one per fetch.
    struct Scripted(VecDeque<Result<String, SourceError>>);

    impl Scripted {
        fn new(contents: &[&str]) -> Box<Self> {
            Box::new(Self(contents.iter().map(|c| Ok(c.to_string())).collect()))
        }

        fn failing() -> Box<Self> {
            Box::new(Self(VecDeque::from([Err(SourceError::Read {
                path: PathBuf::from("gone.log"),
                source: io::Error::from(io::ErrorKind::NotFound),
            })])))
        }
    }

    impl Source for Scripted {
        fn fetch(&mut self) -> Result<String, SourceError> {
            self.0.pop_front().unwrap_or_else(|| Ok(String::new()))
        }

        fn describe(&self) -> String {
            "scripted".into()
        }
    }

    fn viewer(source: Box<Scripted>) -> Viewer {
        viewer_in(WIDTH, source)
    }

    fn viewer_in(width: u16, source: Box<Scripted>) -> Viewer {
        let config = ViewConfig {
            locator: "scripted".into(),
            refresh: std::time::Duration::from_secs(1),
            lines: LINES,
            cols: width - 6,
            offset: 3,
        };
        Viewer::new(&config, source).unwrap()
    }

    fn rows(terminal: &Terminal<Vec<u8>>) -> Vec<String> {
        rows_in(terminal, WIDTH)
    }

    fn rows_in(terminal: &Terminal<Vec<u8>>, width: u16) -> Vec<String> {
        let mut parser = vt100::Parser::new(LINES + 4, width, 0);
        parser.process(terminal.get_ref());
        parser.screen().rows(0, width).collect()
    }

    fn footer_rows(width: u16) -> Vec<String> {
        let layout = FrameLayout::new(width - 6, LINES, 3).unwrap();
        let mut terminal = Terminal::new(Vec::new(), width);
        frame::setup(&mut terminal, &layout).unwrap();
        render(&mut terminal, &layout, &ContentWindow::new("x", 3, 12), STAMP).unwrap();
        rows_in(&terminal, width)
    }

    fn row(content: &str) -> String {
        format!("   │{content:<12}│")
    }

    #[test]
    fn shows_trailing_lines_of_the_content() {
        let mut terminal = Terminal::new(Vec::new(), WIDTH);
        let mut viewer = viewer(Scripted::new(&["a\nb\nc\nd\ne"]));
        viewer.init(&mut terminal).unwrap();

        let rows = rows(&terminal);
        assert_eq!(rows[0], format!("   ┌{}┐", "─".repeat(12)));
        assert_eq!(rows[1..4], [row("c"), row("d"), row("e")]);
        assert_eq!(rows[4], format!("   └{}┘", "─".repeat(12)));
    }

    #[test]
    fn long_lines_stop_at_the_right_border() {
        let mut terminal = Terminal::new(Vec::new(), WIDTH);
        let mut viewer = viewer(Scripted::new(&["0123456789abcdefghij\nok"]));
        viewer.init(&mut terminal).unwrap();

        let rows = rows(&terminal);
        assert_eq!(rows[1], "   │0123456789ab│");
        assert_eq!(rows[2], row("ok"));
    }

    #[test]
    fn short_content_leaves_remaining_rows_alone() {
        let mut terminal = Terminal::new(Vec::new(), WIDTH);
        let mut viewer = viewer(Scripted::new(&["one\ntwo\nthree", "new"]));
        viewer.init(&mut terminal).unwrap();

        let mut cx = Context::default();
        viewer.update(&mut cx, Event::Tick).unwrap();
        viewer.view(&mut terminal).unwrap();

        let rows = rows(&terminal);
        assert_eq!(rows[1..4], [row("new"), row("two"), row("three")]);
    }

    #[test]
    fn same_content_redraws_the_same_frame() {
        let content = "alpha\nbeta\ngamma\ndelta";
        let mut terminal = Terminal::new(Vec::new(), WIDTH);
        let mut viewer = viewer(Scripted::new(&[content, content]));
        viewer.init(&mut terminal).unwrap();
        let before = rows(&terminal);

        viewer.update(&mut Context::default(), Event::Tick).unwrap();
        viewer.view(&mut terminal).unwrap();
        let after = rows(&terminal);

        let footer = LINES as usize + 2;
        assert_eq!(before[..footer], after[..footer]);
    }

    #[test]
    fn footer_sits_below_the_box() {
        let rows = footer_rows(WIDE);
        assert_eq!(rows[4], format!("   └{}┘", "─".repeat(22)));
        assert_eq!(rows[5], format!("   {STAMP}"));
    }

    #[test]
    fn footer_is_cut_on_narrow_terminals() {
        let rows = footer_rows(WIDTH);
        assert_eq!(rows[4], format!("   └{}┘", "─".repeat(12)));
        assert_eq!(rows[5], "   2024-05-01 09:30:");
        assert_eq!(rows[6], "");
    }

    #[test]
    fn footer_uses_local_timestamp_format() {
        let mut terminal = Terminal::new(Vec::new(), WIDE);
        let mut viewer = viewer_in(WIDE, Scripted::new(&["x"]));
        viewer.init(&mut terminal).unwrap();

        let footer = rows_in(&terminal, WIDE)[5].trim_start().to_string();
        assert!(chrono::NaiveDateTime::parse_from_str(&footer, FOOTER_FORMAT).is_ok());
    }

    #[test]
    fn failed_first_fetch_draws_nothing() {
        let mut terminal = Terminal::new(Vec::new(), WIDTH);
        let mut viewer = viewer(Scripted::failing());

        let ret = viewer.init(&mut terminal);
        assert!(matches!(ret, Err(ProgramError::Source(SourceError::Read { .. }))));
        assert!(terminal.get_ref().is_empty());
    }

    #[test]
    fn interrupt_requests_exit() {
        let mut viewer = viewer(Scripted::new(&[]));
        let mut cx = Context::default();
        viewer.update(&mut cx, Event::Interrupt).unwrap();
        assert_eq!(cx.commands(), [Command::Exit]);
    }
}
