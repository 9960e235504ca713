use crate::error::{CycloidError, Result};
use crate::slider::{STEP_DEFAULT, STEP_MAX, STEP_MIN};
use crate::state::{ANGULAR_RANGE, INCREMENT, INITIAL_RADIUS, OUTER_RADIUS};
use clap::Parser;

/// Cell grid used for snapshots when no terminal is attached
const FALLBACK_SIZE: (u16, u16) = (80, 24);
/// Most angles a frame may sample at the smallest step
const MAX_SAMPLES_PER_FRAME: f64 = 100_000.0;
/// Upper bound for radii and the per-frame increment
const MAX_RADIUS: f64 = 1e6;

/// Animated epicycloid and hypocycloid patterns in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Initial angular step between sampled points
    #[arg(short, long, default_value_t = STEP_DEFAULT)]
    pub step: f64,

    /// Slider granularity, 0 for continuous adjustment
    #[arg(long, default_value_t = 0.0)]
    pub granularity: f64,

    /// Radius of the fixed circle
    #[arg(long, default_value_t = OUTER_RADIUS)]
    pub outer_radius: f64,

    /// Starting radius of the rolling circle
    #[arg(long, default_value_t = INITIAL_RADIUS)]
    pub initial_radius: f64,

    /// Growth of the rolling circle per frame
    #[arg(long, default_value_t = INCREMENT)]
    pub increment: f64,

    /// Angle swept to draw each curve
    #[arg(long, default_value_t = ANGULAR_RANGE)]
    pub range: f64,

    /// Target frames per second
    #[arg(long, default_value_t = 60.0)]
    pub fps: f64,

    /// Logical units spanned by the shorter side of the terminal
    #[arg(long, default_value_t = 640.0)]
    pub extent: f64,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Render off-screen and print the last frame instead of animating
    #[arg(long)]
    pub snapshot: bool,

    /// Snapshot width in cells
    #[arg(long)]
    pub cols: Option<u16>,

    /// Snapshot height in cells
    #[arg(long)]
    pub rows: Option<u16>,

    /// Start with the debug overlay shown
    #[arg(short, long)]
    pub debug: bool,
}

/// Validated settings for a run
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub step: f64,
    pub granularity: f64,
    pub outer_radius: f64,
    pub initial_radius: f64,
    pub increment: f64,
    pub range: f64,
    pub fps: f64,
    pub extent: f64,
    pub frames: Option<u64>,
    pub snapshot: bool,
    pub size: Option<(u16, u16)>,
    pub debug: bool,
}

impl Config {
    /// Cell grid for snapshots: explicit flags first, then the attached terminal
    pub fn snapshot_size(&self) -> (u16, u16) {
        self.size
            .or_else(|| termsize::get().map(|size| (size.cols, size.rows)))
            .unwrap_or(FALLBACK_SIZE)
    }
}

impl TryFrom<Cli> for Config {
    type Error = CycloidError;

    fn try_from(cli: Cli) -> Result<Self> {
        bounded("outer-radius", cli.outer_radius, MAX_RADIUS)?;
        bounded("initial-radius", cli.initial_radius, MAX_RADIUS)?;
        bounded("increment", cli.increment, MAX_RADIUS)?;
        bounded("range", cli.range, MAX_SAMPLES_PER_FRAME * STEP_MIN)?;
        positive("fps", cli.fps)?;
        positive("extent", cli.extent)?;
        finite("granularity", cli.granularity)?;
        if cli.granularity < 0.0 {
            return Err(invalid("granularity", "must not be negative"));
        }
        finite("step", cli.step)?;
        if !(STEP_MIN..=STEP_MAX).contains(&cli.step) {
            return Err(invalid(
                "step",
                format!("must lie between {STEP_MIN} and {STEP_MAX}"),
            ));
        }
        if cli.cols == Some(0) {
            return Err(invalid("cols", "must be at least one cell"));
        }
        if cli.rows == Some(0) {
            return Err(invalid("rows", "must be at least one cell"));
        }
        let size = match (cli.cols, cli.rows) {
            (None, None) => None,
            (cols, rows) => Some((
                cols.unwrap_or(FALLBACK_SIZE.0),
                rows.unwrap_or(FALLBACK_SIZE.1),
            )),
        };

        Ok(Config {
            step: cli.step,
            granularity: cli.granularity,
            outer_radius: cli.outer_radius,
            initial_radius: cli.initial_radius,
            increment: cli.increment,
            range: cli.range,
            fps: cli.fps,
            extent: cli.extent,
            frames: cli.frames,
            snapshot: cli.snapshot,
            size,
            debug: cli.debug,
        })
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> CycloidError {
    CycloidError::InvalidArgument {
        name,
        reason: reason.into(),
    }
}

fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, "must be a finite number"))
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be greater than zero"))
    }
}

fn bounded(name: &'static str, value: f64, max: f64) -> Result<()> {
    positive(name, value)?;
    if value <= max {
        Ok(())
    } else {
        Err(invalid(name, format!("must not exceed {max}")))
    }
}
