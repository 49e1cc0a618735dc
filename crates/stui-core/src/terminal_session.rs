#![forbid(unsafe_code)]

//! RAII terminal lifecycle.
//!
//! [`TerminalSession`] puts the terminal into raw mode so keys reach the
//! decoder one at a time and unechoed, optionally switches to the alternate
//! screen and hides the cursor, and undoes all of it when dropped.
//!
//! Restoration runs on every exit path:
//!
//! | Exit path | Restored by |
//! |-----------|-------------|
//! | return / `?` | `Drop` |
//! | panic (unwinding) | `Drop`, plus the panic hook before the message prints |
//! | SIGINT / SIGTERM (unix) | signal thread, then `exit(128 + signal)` |
//!
//! Only one session should exist at a time.

use std::io::{self, Write};
use std::sync::OnceLock;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Which terminal modes a session enables on top of raw mode.
///
/// ```
/// use stui_core::terminal_session::SessionOptions;
///
/// let fullscreen = SessionOptions {
///     alternate_screen: true,
///     hide_cursor: true,
///     ..Default::default()
/// };
/// assert!(!fullscreen.clear_on_start);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Draw on the alternate screen buffer, leaving scrollback untouched.
    pub alternate_screen: bool,
    /// Hide the cursor while the session is alive.
    pub hide_cursor: bool,
    /// Clear the screen and home the cursor once modes are set.
    pub clear_on_start: bool,
}

/// Owns raw mode and the optional modes; restores the terminal on drop.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
    alternate_screen_enabled: bool,
    cursor_hidden: bool,
    #[cfg(unix)]
    signal_guard: Option<SignalGuard>,
}

impl TerminalSession {
    /// Enter raw mode and apply `options`.
    ///
    /// # Errors
    ///
    /// Fails if raw mode cannot be enabled (for example when stdin is not a
    /// terminal) or a mode switch cannot be written.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!("raw mode enabled");

        let mut session = Self {
            options: options.clone(),
            alternate_screen_enabled: false,
            cursor_hidden: false,
            #[cfg(unix)]
            signal_guard: None,
        };
        #[cfg(unix)]
        {
            session.signal_guard = Some(SignalGuard::new()?);
        }

        let mut stdout = io::stdout();
        if options.alternate_screen {
            crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            tracing::debug!("alternate screen enabled");
        }
        if options.hide_cursor {
            crossterm::execute!(stdout, crossterm::cursor::Hide)?;
            session.cursor_hidden = true;
        }
        if options.clear_on_start {
            crate::screen::clear(&mut stdout)?;
        }

        Ok(session)
    }

    /// Raw mode only.
    pub fn minimal() -> io::Result<Self> {
        Self::new(SessionOptions::default())
    }

    /// The options this session was started with.
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn restore(&mut self) {
        #[cfg(unix)]
        drop(self.signal_guard.take());

        let mut stdout = io::stdout();
        if self.cursor_hidden {
            let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
            self.cursor_hidden = false;
        }
        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::debug!("alternate screen disabled");
        }
        // Raw mode goes last.
        let _ = crossterm::terminal::disable_raw_mode();
        tracing::debug!("raw mode disabled");
        let _ = stdout.flush();
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.restore();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_restore();
            previous(info);
        }));
    });
}

fn best_effort_restore() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}

#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name("stui-signals".to_owned())
            .spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    tracing::warn!(signal, "termination signal received, restoring terminal");
                    best_effort_restore();
                    std::process::exit(128 + signal);
                }
            })?;
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_are_raw_mode_only() {
        let opts = SessionOptions::default();
        assert!(!opts.alternate_screen);
        assert!(!opts.hide_cursor);
        assert!(!opts.clear_on_start);
    }

    // Entering raw mode would disturb the test runner's terminal, so the
    // session itself is exercised by the demo binary only.
}
