use crate::config::Config;
use crate::error::Result;
use crate::graphics::{BrailleCanvas, Rgb};
use crate::state::AppState;
use crate::widget::{Control, CycloidWidget};
use crossterm::{
    cursor, event, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use log::info;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Raw mode on the alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Current terminal size in cells
fn viewport() -> Result<(u16, u16)> {
    match termsize::get() {
        Some(size) => Ok((size.cols, size.rows)),
        None => Ok(terminal::size()?),
    }
}

/// Writes the whole canvas, switching colors only when a cell needs another one
pub fn present(canvas: &BrailleCanvas, out: &mut impl Write) -> Result<()> {
    queue!(out, SetBackgroundColor(color(canvas.background_color())))?;
    let mut current: Option<Rgb> = None;
    for row in 0..canvas.rows() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        let mut run = String::with_capacity(canvas.columns());
        for cell in canvas.row(row) {
            if let Some(wanted) = cell.color().filter(|wanted| current != Some(*wanted)) {
                queue!(out, Print(&run), SetForegroundColor(color(wanted)))?;
                run.clear();
                current = Some(wanted);
            }
            run.push(cell.symbol());
        }
        queue!(out, Print(&run))?;
    }
    out.flush()?;
    Ok(())
}

/// Animates in the terminal until the user quits or the frame limit is reached
pub fn run(config: &Config, data: &mut AppState) -> Result<()> {
    let (columns, rows) = viewport()?;
    info!("starting on a {columns}x{rows} terminal");

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;
    let mut widget = CycloidWidget::new(columns, rows, config.extent, data);
    let frame_duration = Duration::from_secs_f64(1.0 / config.fps);
    let mut frames = 0u64;

    loop {
        let started = Instant::now();
        widget.frame(data);
        present(widget.canvas(), &mut stdout)?;
        frames += 1;
        if config.frames.is_some_and(|limit| frames >= limit) {
            break;
        }

        // Handle input until the next frame is due
        loop {
            let remaining = frame_duration.saturating_sub(started.elapsed());
            if !event::poll(remaining)? {
                break;
            }
            if widget.event(&event::read()?, data) == Control::Quit {
                info!("quit after {frames} frames");
                return Ok(());
            }
        }
    }

    info!("stopped after {frames} frames");
    Ok(())
}

/// Renders off-screen and returns the last frame as plain text
pub fn snapshot(config: &Config, data: &mut AppState) -> Vec<String> {
    let (columns, rows) = config.snapshot_size();
    info!("rendering a {columns}x{rows} snapshot");

    let mut widget = CycloidWidget::new(columns, rows, config.extent, data);
    for _ in 0..config.frames.unwrap_or(1).max(1) {
        widget.frame(data);
    }
    widget.canvas().to_lines()
}
