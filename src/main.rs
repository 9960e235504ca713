mod config;
mod error;
mod graphics;
mod math;
mod point;
mod renderer;
mod slider;
mod state;
mod terminal;
mod widget;

use clap::Parser;
use config::{Cli, Config};
use error::CycloidError;
use log::info;
use slider::{StepSlider, STEP_MAX, STEP_MIN};
use state::{AnimationState, AppState};
use std::io::{self, Write};

/// Main function
fn main() -> Result<(), CycloidError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::try_from(Cli::parse())?;
    info!("{config:?}");

    let animation = AnimationState::new(
        config.outer_radius,
        config.initial_radius,
        config.increment,
        config.range,
    );
    info!(
        "rolling circle starts at {} and grows by {} per frame",
        animation.initial_radius(),
        animation.increment()
    );
    let slider = StepSlider::new(STEP_MIN, STEP_MAX, config.step, config.granularity);
    let mut data = AppState::new(animation, slider, config.debug);

    if config.snapshot {
        let mut stdout = io::stdout().lock();
        for line in terminal::snapshot(&config, &mut data) {
            writeln!(stdout, "{line}")?;
        }
        return Ok(());
    }

    terminal::run(&config, &mut data)?;
    info!(
        "rolling circle reached {:.2}",
        data.animation.inner_radius()
    );
    Ok(())
}
