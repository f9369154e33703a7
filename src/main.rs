mod app;
mod booking;
mod calendar;
mod details;
mod help;
mod popup;
mod theme;
use crate::app::App;
use crate::booking::Bookings;
use crate::calendar::{MonthWindow, RangeSelection};
use crate::theme::DEFAULT_BOOKED_COLOR;
use anyhow::Context;
use crossterm::cursor::Show;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{backend::CrosstermBackend, style::Color, Terminal};
use std::fs::File;
use std::io::{self, Stderr, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, OffsetDateTime};
use tracing_subscriber::EnvFilter;

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Environment variable holding the log filter directives
const LOG_ENV_VAR: &str = "RANGECAL_LOG";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Options {
    /// Date whose month is shown first
    date: Option<Date>,
    bookings: Option<PathBuf>,
    booked_color: Option<Color>,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('b') | Arg::Long("bookings") => {
                    opts.bookings = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("booked-color") => opts.booked_color = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => opts.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(opts))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                if let Some(path) = &opts.log_file {
                    init_logging(path)?;
                }
                let bookings = match &opts.bookings {
                    Some(path) => Bookings::load(path).with_context(|| {
                        format!("failed to load bookings from {}", path.display())
                    })?,
                    None => Bookings::default(),
                };
                tracing::info!(count = bookings.len(), "loaded bookings");
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let mut month = MonthWindow::new(today, bookings)
                    .context("failed to lay out the current month")?;
                if let Some(date) = opts.date {
                    month = month
                        .start_date(date)
                        .with_context(|| format!("cannot show the month of {date}"))?;
                }
                let app = App::new(month, opts.booked_color.unwrap_or(DEFAULT_BOOKED_COLOR))
                    .bookings_path(opts.bookings);
                let selection = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(app.run(&mut terminal)?)
                })?;
                write_range(io::stdout().lock(), selection)
                    .context("failed to write selected range")?;
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangecal [options] [YYYY-MM-DD]");
                println!();
                println!("Terminal date-range picker that shows already-booked days");
                println!();
                println!("Options:");
                println!("  -b, --bookings <FILE>     Read bookings from a JSON file");
                println!("      --booked-color <COLOR>");
                println!("                            Colour used to mark booked days");
                println!("      --log-file <FILE>     Write a log to FILE (filter with ${LOG_ENV_VAR})");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Print a completed range as `START END`.  Nothing is written otherwise.
fn write_range<W: Write>(mut out: W, selection: RangeSelection) -> io::Result<()> {
    if let Some((start, end)) = selection.range() {
        tracing::info!(%start, %end, "exiting with selected range");
        writeln!(out, "{start} {end}")?;
    }
    Ok(())
}

/// The interface is drawn on stderr so that stdout carries nothing but the
/// selected range
type Tty = Terminal<CrosstermBackend<Stderr>>;

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(Tty) -> anyhow::Result<T>,
{
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        hook(info);
    }));
    enable_raw_mode().context("failed to enable raw mode")?;
    let r = execute!(io::stderr(), EnterAlternateScreen, EnableMouseCapture)
        .context("failed to set up terminal")
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stderr())).context("failed to create terminal")
        })
        .and_then(func);
    restore_terminal();
    r
}

fn restore_terminal() {
    if let Err(e) = execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to restore terminal screen");
    }
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to disable raw mode");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Options::default()));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&[
            "--bookings",
            "bookings.json",
            "--booked-color",
            "magenta",
            "--log-file=rangecal.log",
            "2026-12-01",
        ])
        .unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                date: Some(date!(2026 - 12 - 01)),
                bookings: Some(PathBuf::from("bookings.json")),
                booked_color: Some(Color::Magenta),
                log_file: Some(PathBuf::from("rangecal.log")),
            })
        );
    }

    #[test]
    fn test_short_bookings() {
        let cmd = parse(&["-b", "b.json"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                bookings: Some(PathBuf::from("b.json")),
                ..Options::default()
            })
        );
    }

    #[test]
    fn test_hex_color() {
        let cmd = parse(&["--booked-color", "#ff8000"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                booked_color: Some(Color::Rgb(0xff, 0x80, 0x00)),
                ..Options::default()
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_date() {
        assert!(parse(&["2026-13-01"]).is_err());
    }

    #[test]
    fn test_bad_color() {
        assert!(parse(&["--booked-color", "not-a-colour"]).is_err());
    }

    #[test]
    fn test_write_range() {
        let mut out = Vec::new();
        write_range(
            &mut out,
            RangeSelection::Complete {
                start: date!(2026 - 10 - 20),
                end: date!(2026 - 10 - 23),
            },
        )
        .unwrap();
        assert_eq!(out, b"2026-10-20 2026-10-23\n");
    }

    #[test]
    fn test_write_incomplete_range() {
        let mut out = Vec::new();
        write_range(&mut out, RangeSelection::Started(date!(2026 - 10 - 20))).unwrap();
        write_range(&mut out, RangeSelection::Empty).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_two_dates() {
        assert!(parse(&["2026-10-01", "2026-11-01"]).is_err());
    }
}
