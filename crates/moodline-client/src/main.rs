use std::path::PathBuf;
use std::process;

use chrono::NaiveDate;
use clap::Parser;

use moodline_common::{FixedToday, LocalToday, Timeline, TodaySource};

mod config;
mod error;
mod logging;
mod mood_log;
mod render;
mod tui;

use crate::config::Config;
use crate::error::{MoodlineError, Result};
use crate::render::Render;

const HELP_TEXT: &str = r#"
  Usage
    $ moodline [<options> ...]

    Options
        none             Open the interactive day picker
      --anchor           Treat this date as today (YYYY-MM-DD)
      --date             Start with this day selected (YYYY-MM-DD)
      --half-width       Days shown on each side of today
      --suppress         Start with auto-return suppressed
      --print, -p        Print the day strip and exit
      --log-file         Write logs to PATH instead of ~/.moodline.log
      --help, -h         Display help message
      --version, -V      Display installed version

    Examples
      $ moodline
      $ moodline --print
      $ moodline --date 2024-05-11 --suppress
      $ moodline --anchor 2024-02-29 --half-width 3 --print
      $ MOODLINE_LOG=debug moodline
"#;

#[derive(Parser)]
#[command(
    name = "moodline",
    version = env!("CARGO_PKG_VERSION"),
    about = "A day picker for your mood journal that drifts back to today",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    anchor: Option<String>,

    /// Start with this day selected (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Days shown on each side of today
    #[arg(long, value_name = "DAYS")]
    half_width: Option<u16>,

    /// Start with auto-return suppressed
    #[arg(long)]
    suppress: bool,

    /// Print the day strip and exit
    #[arg(short = 'p', long)]
    print: bool,

    /// Write logs to PATH instead of ~/.moodline.log
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| MoodlineError::InvalidDate(input.to_string()))
}

fn today_source(anchor: Option<&str>) -> Result<Box<dyn TodaySource>> {
    Ok(match anchor {
        Some(input) => Box::new(FixedToday(parse_date(input)?)),
        None => Box::new(LocalToday),
    })
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(half_width) = cli.half_width {
        config.half_width = half_width;
    }

    let anchor = today_source(cli.anchor.as_deref())?.today();
    let selected = match cli.date.as_deref() {
        Some(input) => parse_date(input)?,
        None => anchor,
    };

    if cli.print {
        let timeline = Timeline::new(anchor, config.half_width)?;
        Render::new(config.geometry).print(&timeline, selected);
        return Ok(());
    }

    let log_path = match cli.log_file {
        Some(path) => path,
        None => logging::default_log_path()?,
    };
    logging::init_logging(&log_path)?;

    tui::run(
        config,
        tui::LaunchOptions {
            anchor,
            selected,
            suppress: cli.suppress,
        },
    )
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
