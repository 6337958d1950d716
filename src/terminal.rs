//! Terminal display and input handling

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

use crate::calibration::CellSize;
use crate::error::InitError;

/// Rows kept free below the frame for the status line
const STATUS_ROWS: u16 = 1;

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    fallback_cell: CellSize,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    /// Take over the terminal. `fallback_cell` is used when the terminal
    /// won't report its pixel size.
    pub fn new(fallback_cell: CellSize) -> Result<Self, InitError> {
        // Enter alternate screen first to get accurate dimensions
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;

        let term = Self {
            width,
            height: height.saturating_sub(STATUS_ROWS),
            fallback_cell,
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        };

        let cell = term.cell_size();
        if cell == fallback_cell {
            tracing::warn!(
                width = cell.width,
                height = cell.height,
                "Terminal did not report pixel size, using configured cell size"
            );
        }
        tracing::info!(cols = width, rows = term.height, "Terminal initialized");
        Ok(term)
    }

    /// Pixel size of one character cell
    pub fn cell_size(&self) -> CellSize {
        match terminal::window_size() {
            Ok(ws) if ws.width > 0 && ws.height > 0 && ws.columns > 0 && ws.rows > 0 => CellSize::new(
                ws.width as f32 / ws.columns as f32,
                ws.height as f32 / ws.rows as f32,
            ),
            _ => self.fallback_cell,
        }
    }

    /// Pixel size of the drawable area
    pub fn surface_pixels(&self, cell: CellSize) -> (f32, f32) {
        (
            self.width as f32 * cell.width,
            self.height as f32 * cell.height,
        )
    }

    /// Check if terminal has been resized
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(STATUS_ROWS);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Draw a frame plus the status line.
    ///
    /// Lines are positioned one by one. A grid taller than the terminal
    /// (minimum sizes kick in) loses equal rows off the top and bottom.
    pub fn render(&mut self, content: &str, status: &str) -> io::Result<()> {
        // Hide cursor and disable line wrap
        write!(self.buffer, "\x1b[?25l\x1b[?7l")?;

        let mut drawn = 0;
        for (i, line) in visible_rows(content, self.height as usize).enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
            drawn = i + 1;
        }

        // Clear leftovers from a larger previous frame
        write!(self.buffer, "\x1b[J")?;
        self.write_status_at(drawn + 1, status)?;

        write!(self.buffer, "\x1b[?25h\x1b[?7h")?;
        self.buffer.flush()
    }

    /// Redraw only the status line
    pub fn render_status(&mut self, status: &str) -> io::Result<()> {
        self.write_status_at(self.height as usize + 1, status)?;
        self.buffer.flush()
    }

    fn write_status_at(&mut self, row: usize, status: &str) -> io::Result<()> {
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", row, status)
    }

    /// Check for keyboard input
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

/// Rows of `content` that fit in `height`, cropped evenly around the center
pub fn visible_rows(content: &str, height: usize) -> impl Iterator<Item = &str> {
    let skip = content.lines().count().saturating_sub(height) / 2;
    content.lines().skip(skip).take(height)
}

/// Key actions for the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Pause,
    ToggleMotion,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        KeyCode::Char('m') => Action::ToggleMotion,
        _ => Action::None,
    }
}
