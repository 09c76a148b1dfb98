//! Display adapters for view descriptions.

use std::io::{Stdout, Write};

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::view::{LoginView, ViewDescription};
use crate::{render, terminal};

/// Commits a [`ViewDescription`] to a display.
pub trait Surface {
    /// # Errors
    /// Returns an error if the display cannot be written.
    fn commit(&mut self, view: &ViewDescription) -> Result<()>;
}

/// Full-screen ratatui surface over crossterm.
///
/// Restores the terminal when dropped.
pub struct TerminalSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSurface {
    /// Switches the terminal into TUI mode.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn enter() -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        Ok(Self { terminal })
    }
}

impl Surface for TerminalSurface {
    fn commit(&mut self, view: &ViewDescription) -> Result<()> {
        self.terminal
            .draw(|frame| render::render(view, frame))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Line-oriented surface writing to any `io::Write`.
pub struct PlainText<W: Write> {
    out: W,
}

impl<W: Write> PlainText<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for PlainText<W> {
    fn commit(&mut self, view: &ViewDescription) -> Result<()> {
        for line in plain_lines(view) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Plain-text rendering of a view, one entry per output line.
pub fn plain_lines(view: &ViewDescription) -> Vec<String> {
    match view {
        ViewDescription::Login(login) => login_lines(login),
        ViewDescription::Dashboard(dashboard) => {
            let header = &dashboard.header;
            let panel = &dashboard.panel;
            let mut lines = vec![
                format!("{} | {}", header.title, header.logged_in_as()),
                String::new(),
                panel.heading.clone(),
                panel.body.clone(),
            ];
            if let Some(note) = &panel.note {
                lines.push(String::new());
                lines.push(note.title.clone());
                lines.push(note.detail.clone());
            }
            lines
        }
    }
}

fn login_lines(login: &LoginView) -> Vec<String> {
    let mut lines = vec![login.title.to_string(), "Not logged in.".to_string()];
    if let Some(status) = &login.status {
        lines.push(status.text.clone());
    }
    lines.push(login.hint.to_string());
    lines
}
