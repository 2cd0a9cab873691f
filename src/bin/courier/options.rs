use courier::dispatch::DispatchOptions;
use courier::implementation::memory::MemoryOptions;
use courier::library::helpers::parse_millis;
use std::str::FromStr;
use std::time::Duration;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Ordered dispatch of produced messages to per-destination executors.")]
pub struct MainOptions {
    /// Log level, scopable to different modules
    ///
    /// Levels: trace, debug, info, warn, error
    #[structopt(
        short,
        long,
        global = true,
        default_value = "info",
        env = "RUST_LOG",
        value_name = "level"
    )]
    pub log: String,

    /// Format of log output
    #[structopt(
        long,
        global = true,
        env,
        default_value = "text",
        possible_values = &["text", "compact", "json"],
        value_name = "format"
    )]
    pub log_format: LogFormat,

    /// Artificial latency in milliseconds added to every sent batch
    #[structopt(long, global = true, env, parse(try_from_str = parse_millis), default_value = "0", value_name = "ms")]
    pub send_latency: Duration,

    #[structopt(flatten)]
    pub dispatch: DispatchOptions,

    #[structopt(flatten)]
    pub memory: MemoryOptions,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Produces generated messages spread across a number of ordering keys
    Generate {
        /// Subject of the generated messages
        #[structopt(long, default_value = "orders")]
        subject: String,

        /// Number of messages to produce
        #[structopt(long, default_value = "100")]
        count: usize,

        /// Number of distinct ordering keys
        #[structopt(long, default_value = "8")]
        keys: usize,
    },
    /// Produces messages read from stdin, one JSON object per line
    Stdin,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Text,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}
