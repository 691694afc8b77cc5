//! Command tree and argument extraction

use crate::logging::{LogFormat, LoggingConfig};
use anyhow::{anyhow, Context, Result};
use booklog_core::{IdMode, TagOperation, DEFAULT_DELAY};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

/// Build the `booklog-tool` command tree
pub fn command() -> Command {
    Command::new("booklog-tool")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A CLI tool to update book information on booklog.jp")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Credentials file (default: ~/.config/booklog-tool/config.json)"),
        )
        .arg(
            Arg::new("delay-ms")
                .long("delay-ms")
                .global(true)
                .default_value("500")
                .value_parser(value_parser!(u64))
                .help("Pause between identifiers, in milliseconds"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log filter, e.g. debug or booklog_core=trace (overrides RUST_LOG)"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .global(true)
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .subcommand(
            Command::new("update-location")
                .about("Update the location for items")
                .arg(
                    Arg::new("location")
                        .short('l')
                        .long("location")
                        .required(true)
                        .help("Location tag (e.g., Tokyo)"),
                )
                .arg(file_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("add-tag")
                .about("Add a tag to items")
                .arg(
                    Arg::new("tag")
                        .short('t')
                        .long("tag")
                        .required(true)
                        .help("New tag to add"),
                )
                .arg(file_arg())
                .arg(id_arg()),
        )
}

fn file_arg() -> Arg {
    Arg::new("file")
        .short('f')
        .long("file")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Path to the file containing item IDs or ISBNs, one per line")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .short('i')
        .long("id")
        .default_value(IdMode::ItemId.as_str())
        .value_parser(IdMode::ALL.map(|mode| mode.as_str()))
        .help("ID type")
}

/// Everything a run needs, pulled out of the parsed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: TagOperation,
    pub file: PathBuf,
    pub mode: IdMode,
    /// Explicit credentials path; the home-directory default applies when unset
    pub config_path: Option<PathBuf>,
    pub delay: Duration,
    /// Catalog endpoint override
    pub base_url: Option<String>,
    pub logging: LoggingConfig,
}

impl Invocation {
    /// Parse an explicit argument list
    pub fn try_parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let (name, sub) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("no subcommand given"))?;

        let operation = match name {
            "add-tag" => TagOperation::AddTag(required(sub, "tag")?),
            "update-location" => TagOperation::SetLocation(required(sub, "location")?),
            other => return Err(anyhow!("unknown subcommand: {other}")),
        };

        let file = sub
            .get_one::<PathBuf>("file")
            .cloned()
            .ok_or_else(|| anyhow!("missing --file"))?;

        let mode = match sub.get_one::<String>("id") {
            Some(raw) => raw.parse::<IdMode>()?,
            None => IdMode::default(),
        };

        // Global args are propagated into the subcommand's matches
        let delay = sub
            .get_one::<u64>("delay-ms")
            .map_or(DEFAULT_DELAY, |ms| Duration::from_millis(*ms));

        let format = match sub.get_one::<String>("log-format") {
            Some(raw) => raw.parse::<LogFormat>().context("bad --log-format")?,
            None => LogFormat::default(),
        };

        Ok(Self {
            operation,
            file,
            mode,
            config_path: sub.get_one::<PathBuf>("config").cloned(),
            delay,
            base_url: None,
            logging: LoggingConfig {
                format,
                level: sub.get_one::<String>("log-level").cloned(),
            },
        })
    }

    /// Fill in settings taken from the environment
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if self.base_url.is_none() {
            self.base_url = std::env::var(crate::BASE_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty());
        }
        self
    }
}

/// Exit status for a failed parse
///
/// Help and version requests print to stdout and succeed; every other
/// usage error is fatal.
#[must_use]
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    u8::from(err.use_stderr())
}

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing --{name}"))
}
