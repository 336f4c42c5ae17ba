use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use ramlabel::memory::SystemMemory;
use ramlabel::overlay::{Overlay, OverlaySettings};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::runtime;
use tokio::task::LocalSet;

mod opt;

fn main() -> io::Result<()> {
    let opt::Cli {
        verbose,
        config,
        log_file,
        navigation_mode,
        duration_secs,
    } = argh::from_env();

    // Init logging as early as possible.
    init_logging(log_file.as_deref(), verbose)?;

    let opt::ConfigFile {
        geometry,
        navigation_mode: configured_navigation_mode,
        fade_ms,
    } = match &config {
        Some(path) => opt::load_config_file(path),
        None => Default::default(),
    };

    log::info!("Started up ramlabel {}", env!("CARGO_PKG_VERSION"));

    let overlay = Overlay::new(
        Box::new(SystemMemory::new()),
        OverlaySettings {
            geometry,
            navigation_mode: navigation_mode.unwrap_or(configured_navigation_mode),
            fade: Duration::from_millis(fade_ms),
            dismiss_after: match duration_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        },
        io::stdout(),
    );

    // Everything lives on this thread; the label polls from a local task.
    let rt = runtime::Builder::new_current_thread().enable_time().build()?;
    LocalSet::new().block_on(&rt, overlay.run());

    log::info!("Shut down cleanly");

    Ok(())
}

fn init_logging(path: Option<&Path>, verbose: u8) -> io::Result<()> {
    let encoder = Box::new(PatternEncoder::new(
        "[{date(%Y-%m-%d %H:%M:%S%.3f)} {highlight({level}):5} {target}] {highlight({message})}{n}",
    ));
    let appender: Box<dyn log4rs::append::Append> = if let Some(path) = path {
        Box::new(FileAppender::builder().encoder(encoder).build(path)?)
    } else {
        Box::new(
            ConsoleAppender::builder()
                .encoder(encoder)
                .target(Target::Stderr)
                .build(),
        )
    };

    let config = Config::builder()
        .appender(Appender::builder().build("default", appender))
        .build(Root::builder().appender("default").build(match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }))
        .map_err(io::Error::other)?;

    log4rs::init_config(config).map_err(io::Error::other)?;

    Ok(())
}
