mod app;
mod calendar;
mod chart;
mod help;
mod practice;
mod source;
mod theme;
use crate::app::{App, WeekSource};
use crate::calendar::MonthView;
use crate::chart::parse_week_list;
use crate::practice::YMD_FMT;
use crate::source::{DateSource, Fetcher, Loader};
use anyhow::Context;
use env_logger::{Env, Target};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::{Date, OffsetDateTime};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    source: DateSource,
    date: Option<Date>,
    today: Option<Date>,
    week_file: Option<PathBuf>,
    timeout: Duration,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut source = None;
        let mut date = None;
        let mut today = None;
        let mut week_file = None;
        let mut timeout = DEFAULT_TIMEOUT;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('d') | Arg::Long("date") => date = Some(parse_date(parser.value()?)?),
                Arg::Long("today") => today = Some(parse_date(parser.value()?)?),
                Arg::Short('w') | Arg::Long("week") => {
                    week_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('t') | Arg::Long("timeout") => {
                    timeout = parse_timeout(parser.value()?)?;
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) if source.is_none() => {
                    let value = value.string()?;
                    match DateSource::from_arg(&value) {
                        Ok(s) => source = Some(s),
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
        let Some(source) = source else {
            return Err(lexopt::Error::from("missing <SOURCE> argument"));
        };
        Ok(Command::Run(Options {
            source,
            date,
            today,
            week_file,
            timeout,
            log_file,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                init_logging(opts.log_file.as_deref())?;
                // The local offset can only be determined soundly while the
                // process is single-threaded, so this must happen before the
                // runtime starts.
                let today = match opts.today {
                    Some(d) => d,
                    None => OffsetDateTime::now_local()
                        .context("failed to determine local date")?
                        .date(),
                };
                let week = match opts.week_file {
                    Some(path) => {
                        let text = fs::read_to_string(&path)
                            .with_context(|| format!("failed to read {}", path.display()))?;
                        WeekSource::Listed(parse_week_list(&text))
                    }
                    None => WeekSource::Derived,
                };
                let mut view = MonthView::new(today);
                if let Some(date) = opts.date {
                    view = view.start_date(date);
                }
                let runtime = tokio::runtime::Runtime::new()
                    .context("failed to start async runtime")?;
                let fetcher = Fetcher::new(opts.timeout)?;
                let mut loader = Loader::new(fetcher, opts.source, runtime.handle().clone());
                loader.spawn();
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(view, week).run(terminal, &mut loader)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: yogacal [options] <SOURCE>");
                println!();
                println!("Mini calendar and weekly chart of yoga practice days");
                println!();
                println!("<SOURCE> is an http(s) URL or a path to a JSON document of the form");
                println!(r#"{{"dates": ["YYYY-MM-DD", ...]}}."#);
                println!();
                println!("Options:");
                println!("  -d, --date YYYY-MM-DD  Start on the month containing this date");
                println!("      --today YYYY-MM-DD Use this date as today");
                println!("  -w, --week FILE        Chart the DATA-DATE|TEXT list items in FILE");
                println!("  -t, --timeout SECS     Give up on fetching after SECS seconds [default: 10]");
                println!("  -l, --log-file FILE    Write a log to FILE");
                println!("  -h, --help             Display this help message and exit");
                println!("  -V, --version          Show the program version and exit");
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

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    Date::parse(&value, &YMD_FMT).map_err(|e| lexopt::Error::ParsingFailed {
        value,
        error: Box::new(e),
    })
}

fn parse_timeout(value: OsString) -> Result<Duration, lexopt::Error> {
    let value = value.string()?;
    match value.parse::<u64>() {
        Ok(0) => Err(lexopt::Error::ParsingFailed {
            value,
            error: "timeout must be at least one second".into(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

// The terminal belongs to the UI, so nothing is logged unless a file is given
fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use url::Url;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_url_only() {
        assert_eq!(
            parse(&["https://yoga.example.com/api/practice_dates/"]).unwrap(),
            Command::Run(Options {
                source: DateSource::Remote(
                    Url::parse("https://yoga.example.com/api/practice_dates/").unwrap()
                ),
                date: None,
                today: None,
                week_file: None,
                timeout: DEFAULT_TIMEOUT,
                log_file: None,
            })
        );
    }

    #[test]
    fn test_all_options() {
        assert_eq!(
            parse(&[
                "--date",
                "2026-08-15",
                "--today=2026-10-18",
                "-w",
                "last7.txt",
                "-t",
                "3",
                "--log-file",
                "yogacal.log",
                "dates.json",
            ])
            .unwrap(),
            Command::Run(Options {
                source: DateSource::Local(PathBuf::from("dates.json")),
                date: Some(date!(2026 - 08 - 15)),
                today: Some(date!(2026 - 10 - 18)),
                week_file: Some(PathBuf::from("last7.txt")),
                timeout: Duration::from_secs(3),
                log_file: Some(PathBuf::from("yogacal.log")),
            })
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["dates.json", "-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_missing_source() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--today", "2026-10-18"]).is_err());
    }

    #[test]
    fn test_bad_values() {
        assert!(matches!(
            parse(&["--date", "10/18/2026", "dates.json"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["--timeout", "soon", "dates.json"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["--timeout", "0", "dates.json"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
        assert!(matches!(
            parse(&["http://"]),
            Err(lexopt::Error::ParsingFailed { .. })
        ));
    }

    #[test]
    fn test_extra_argument() {
        assert!(parse(&["dates.json", "more.json"]).is_err());
    }
}
