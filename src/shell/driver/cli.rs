use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use thiserror::Error;

use crate::config::Configuration;
use crate::error::ShellError;
use crate::shell::Screen;
use crate::shell::host::{HostEvent, ScreenHost};

pub type DriverResult<T> = std::result::Result<T, CliDriverError>;

#[derive(Debug, Error)]
pub enum CliDriverError {
    #[error("shell error: {0}")]
    Shell(#[from] ShellError),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Minimal terminal host for a screen shell: manages raw mode + alternate
/// screen transitions and maps terminal focus changes onto pause/resume.
/// `Esc` or `q` finishes the screen and exits.
pub struct CliShellDriver<S: Screen> {
    host: ScreenHost<S>,
    base: Configuration,
    poll_interval: Duration,
}

impl<S: Screen> CliShellDriver<S> {
    pub fn new(host: ScreenHost<S>, base: Configuration) -> Self {
        Self {
            host,
            base,
            poll_interval: Duration::from_millis(200),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn run(mut self) -> DriverResult<()> {
        let mut stdout = io::stdout();
        self.enter(&mut stdout)?;
        let result = self.run_inner();
        self.exit(&mut stdout);
        result
    }

    fn run_inner(&mut self) -> DriverResult<()> {
        self.host.launch(&self.base, None)?;
        loop {
            if event::poll(self.poll_interval)? {
                match event::read()? {
                    CrosstermEvent::FocusGained => {
                        self.host.handle_event(HostEvent::FocusGained)?;
                    }
                    CrosstermEvent::FocusLost => {
                        self.host.handle_event(HostEvent::FocusLost)?;
                    }
                    CrosstermEvent::Key(key) if is_quit(&key) => {
                        self.host.handle_event(HostEvent::Finish)?;
                        return Ok(());
                    }
                    _ => {}
                }
            }
        }
    }

    fn enter(&self, stdout: &mut impl Write) -> DriverResult<()> {
        terminal::enable_raw_mode().map_err(|err| CliDriverError::Terminal(err.to_string()))?;
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(())
    }

    fn exit(&self, stdout: &mut impl Write) {
        execute!(stdout, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
}
