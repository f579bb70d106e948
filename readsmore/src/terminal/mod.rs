use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal,
};

use crate::element::{NodeKind, Page};
use crate::layout::{hit_test, layout_page, Row};

/// Input relevant to a page of managed elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A toggle link was clicked; carries its id.
    Toggle(String),
    Key(char),
    Escape,
    Resize { width: u16, height: u16 },
}

/// Full-screen terminal drawing a [`Page`].
pub struct Terminal {
    stdout: io::Stdout,
    last_rows: Vec<Row>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self {
            stdout,
            last_rows: Vec::new(),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn render(&mut self, page: &Page) -> io::Result<()> {
        let (_, height) = terminal::size()?;
        self.last_rows = layout_page(page);

        queue!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            terminal::Clear(terminal::ClearType::All)
        )?;

        for row in self.last_rows.iter().take_while(|r| r.y < height) {
            for segment in row.segments.iter().filter(|s| !s.hidden) {
                queue!(self.stdout, cursor::MoveTo(segment.x, row.y))?;

                if page.node(segment.node).kind == NodeKind::ToggleLink {
                    queue!(
                        self.stdout,
                        SetForegroundColor(Color::Cyan),
                        SetAttribute(Attribute::Underlined)
                    )?;
                    write!(self.stdout, "{}", segment.text)?;
                    queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                } else {
                    write!(self.stdout, "{}", segment.text)?;
                }
            }
        }

        self.stdout.flush()
    }

    /// Wait up to `timeout` for input, translating clicks against the last
    /// rendered layout.
    pub fn poll(&self, page: &Page, timeout: Duration) -> io::Result<Vec<Input>> {
        let mut inputs = Vec::new();

        if !event::poll(timeout)? {
            return Ok(inputs);
        }

        loop {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char(c) => inputs.push(Input::Key(c)),
                    KeyCode::Esc => inputs.push(Input::Escape),
                    _ => {}
                },
                CrosstermEvent::Mouse(mouse)
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                {
                    if let Some(id) = hit_test(page, &self.last_rows, mouse.column, mouse.row) {
                        log::debug!("[terminal] click on {id}");
                        inputs.push(Input::Toggle(id));
                    }
                }
                CrosstermEvent::Resize(width, height) => {
                    inputs.push(Input::Resize { width, height });
                }
                _ => {}
            }

            if !event::poll(Duration::ZERO)? {
                break;
            }
        }

        Ok(inputs)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
