use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Size;

use crate::game::Snapshot;
use crate::geometry::Bounds;
use crate::renderer;

static PANIC_HOOK: Once = Once::new();

/// The full-screen surface a game is drawn on.
///
/// Holds raw mode and the alternate screen while alive; both are released
/// when it is dropped or when the process panics.
pub struct GameScreen {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl GameScreen {
    /// Takes over the terminal for a board of `bounds`.
    ///
    /// A terminal too small for the board is logged, not refused; the
    /// renderer clips whatever does not fit.
    pub fn open(bounds: Bounds) -> io::Result<Self> {
        PANIC_HOOK.call_once(chain_restoring_panic_hook);

        enable_raw_mode()?;
        if let Err(error) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let screen = Terminal::new(CrosstermBackend::new(io::stdout()))
            .map(|terminal| Self { terminal })
            .inspect_err(|_| release());
        let screen = screen?;

        let size = screen.terminal.size()?;
        if !board_fits(size, bounds) {
            let (width, height) = renderer::required_size(bounds);
            warn!(
                "terminal is {}x{}, the board needs {width}x{height}",
                size.width, size.height
            );
        }

        debug!("game screen opened");
        Ok(screen)
    }

    /// Paints one frame.
    pub fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, snapshot))
            .map(|_| ())
    }
}

impl Drop for GameScreen {
    fn drop(&mut self) {
        release();
        debug!("game screen closed");
    }
}

/// Returns whether a terminal of `size` shows the whole board and HUD.
#[must_use]
pub fn board_fits(size: Size, bounds: Bounds) -> bool {
    let (width, height) = renderer::required_size(bounds);
    size.width >= width && size.height >= height
}

fn chain_restoring_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        release();
        default_hook(panic_info);
    }));
}

/// Leaves raw mode and the alternate screen, ignoring failures.
fn release() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
