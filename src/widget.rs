use crate::graphics::{BrailleCanvas, Rgb, Surface, DOTS_PER_CELL_Y};
use crate::point::Point;
use crate::renderer::{paint, render_frame};
use crate::state::AppState;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::time::Instant;

const OVERLAY_COLOR: Rgb = Rgb::WHITE;
/// Vertical distance between debug overlay lines, in cells
const OVERLAY_LINE_CELLS: f64 = 1.0;

/// What the frame loop should do after an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Cycloid animation widget
pub struct CycloidWidget {
    canvas: BrailleCanvas,
    extent: f64,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl CycloidWidget {
    pub fn new(columns: u16, rows: u16, extent: f64, data: &mut AppState) -> Self {
        let canvas = BrailleCanvas::new(columns, rows, extent);
        data.slider.place(canvas.width(), canvas.height());
        CycloidWidget {
            canvas,
            extent,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Handle events for the cycloid widget
    pub fn event(&mut self, event: &Event, data: &mut AppState) -> Control {
        match event {
            Event::Resize(columns, rows) => {
                self.resize(*columns, *rows, data);
                Control::Continue
            }
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                self.key(key_event, data)
            }
            _ => Control::Continue,
        }
    }

    fn key(&mut self, key_event: &KeyEvent, data: &mut AppState) -> Control {
        let before = data.slider.value();
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                return Control::Quit;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('d') | KeyCode::Char('D') => data.debug = !data.debug,
            KeyCode::Char('p') | KeyCode::Char('P') => data.paused = !data.paused,
            KeyCode::Char('r') | KeyCode::Char('R') => data.slider.reset(),
            KeyCode::Left => data.slider.nudge(-1.0),
            KeyCode::Right => data.slider.nudge(1.0),
            KeyCode::PageDown => data.slider.nudge(-10.0),
            KeyCode::PageUp => data.slider.nudge(10.0),
            KeyCode::Home => data.slider.to_min(),
            KeyCode::End => data.slider.to_max(),
            _ => {}
        }
        if data.slider.value() != before {
            debug!("step changed from {before} to {}", data.slider.value());
        }
        Control::Continue
    }

    fn resize(&mut self, columns: u16, rows: u16, data: &mut AppState) {
        self.canvas.resize(columns, rows, self.extent);
        data.slider.place(self.canvas.width(), self.canvas.height());
        debug!(
            "resized to {columns}x{rows} cells, {:.0}x{:.0} units",
            self.canvas.width(),
            self.canvas.height()
        );
    }

    /// Paint one frame, advancing the animation unless paused
    pub fn frame(&mut self, data: &mut AppState) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let step = data.slider.value();
        let anchor = data.slider.position();
        if data.paused {
            paint(&data.animation, step, anchor, &mut self.canvas);
        } else {
            render_frame(&mut data.animation, step, anchor, &mut self.canvas);
        }
        data.slider.draw(&mut self.canvas);

        // Add debug info if debug mode is enabled
        if data.debug {
            self.draw_debug(data, step);
        }

        // Display 'Paused' if the simulation is paused
        if data.paused {
            let center = Point::new(self.canvas.width() / 2.0, self.canvas.height() / 2.0);
            self.canvas.fill(OVERLAY_COLOR);
            self.canvas.text("Paused", center);
        }
    }

    fn draw_debug(&mut self, data: &AppState, step: f64) {
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Radius: {:.2}", data.animation.inner_radius()),
            format!("Scale: {:.4}", data.animation.scale_factor()),
            format!("Step: {step:.4}"),
            format!("FPS: {:.2}", self.fps),
        ];
        let line_height = self.canvas.units_per_dot() * DOTS_PER_CELL_Y as f64 * OVERLAY_LINE_CELLS;
        self.canvas.fill(OVERLAY_COLOR);
        for (index, line) in lines.iter().enumerate() {
            // Text is centred on its anchor, so shift right by half its width
            let half_width = line.chars().count() as f64 * self.canvas.units_per_dot();
            let at = Point::new(half_width, (index + 1) as f64 * line_height);
            self.canvas.text(line, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::{StepSlider, STEP_MAX, STEP_MIN};
    use crate::state::AnimationState;

    fn app() -> AppState {
        AppState::new(AnimationState::default(), StepSlider::default(), false)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn quit_keys() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        for code in [KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc] {
            assert_eq!(widget.event(&press(code), &mut data), Control::Quit);
        }
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(widget.event(&ctrl_c, &mut data), Control::Quit);
        assert_eq!(widget.event(&press(KeyCode::Char('c')), &mut data), Control::Continue);
    }

    #[test]
    fn toggles() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        widget.event(&press(KeyCode::Char('d')), &mut data);
        widget.event(&press(KeyCode::Char('p')), &mut data);
        assert!(data.debug);
        assert!(data.paused);
        widget.event(&press(KeyCode::Char('D')), &mut data);
        widget.event(&press(KeyCode::Char('P')), &mut data);
        assert!(!data.debug);
        assert!(!data.paused);
    }

    #[test]
    fn arrows_move_the_slider() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        widget.event(&press(KeyCode::Right), &mut data);
        assert!(data.slider.value() > STEP_MIN);
        widget.event(&press(KeyCode::End), &mut data);
        assert_eq!(data.slider.value(), STEP_MAX);
        widget.event(&press(KeyCode::PageUp), &mut data);
        assert_eq!(data.slider.value(), STEP_MAX);
        widget.event(&press(KeyCode::Home), &mut data);
        assert_eq!(data.slider.value(), STEP_MIN);
        widget.event(&press(KeyCode::Left), &mut data);
        assert_eq!(data.slider.value(), STEP_MIN);
        widget.event(&press(KeyCode::PageUp), &mut data);
        widget.event(&press(KeyCode::Char('r')), &mut data);
        assert_eq!(data.slider.value(), STEP_MIN);
    }

    #[test]
    fn resize_replaces_slider() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        let before = data.slider.position();
        widget.event(&Event::Resize(120, 40), &mut data);
        assert_eq!(widget.canvas().columns(), 120);
        assert_eq!(widget.canvas().rows(), 40);
        let expected = Point::new(widget.canvas().width() / 2.0, widget.canvas().height() / 1.3);
        assert_eq!(data.slider.position(), expected);
        assert_ne!(data.slider.position(), before);
    }

    #[test]
    fn frames_advance_unless_paused() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        widget.frame(&mut data);
        widget.frame(&mut data);
        let radius = data.animation.inner_radius();
        assert!(radius > 50.0);

        data.paused = true;
        widget.frame(&mut data);
        assert_eq!(data.animation.inner_radius(), radius);
        let text: String = widget.canvas().to_lines().concat();
        assert!(text.contains("Paused"));
    }

    #[test]
    fn frame_draws_curves_and_label() {
        let mut data = app();
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        widget.frame(&mut data);
        let text: String = widget.canvas().to_lines().concat();
        assert!(text.contains(&std::f64::consts::PI.to_string()));
        assert!(text.chars().any(|ch| ('\u{2801}'..='\u{28ff}').contains(&ch)));
    }

    #[test]
    fn debug_overlay_lists_program_and_fps() {
        let mut data = app();
        data.debug = true;
        let mut widget = CycloidWidget::new(80, 24, 640.0, &mut data);
        widget.frame(&mut data);
        let lines = widget.canvas().to_lines();
        assert!(lines[0].starts_with(env!("CARGO_PKG_NAME")));
        assert!(lines.iter().any(|line| line.starts_with("FPS:")));
        assert!(lines.iter().any(|line| line.starts_with("Radius: 50.01")));
    }
}
