use std::fs::File;

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};

use crate::api::err::RosterResult;
use crate::config::Settings;

/// init the global logger: terminal always, plus a file when one is configured
pub fn init(settings: &Settings) -> RosterResult<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        settings.log_level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &settings.log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(settings.log_level, config, file));
    }

    CombinedLogger::init(loggers)?;
    log::info!("logging at {}", settings.log_level);
    Ok(())
}
