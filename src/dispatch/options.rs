use crate::library::helpers::parse_millis;
use std::time::Duration;
use structopt::StructOpt;

/// Default soft limit of the admission queue
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10_000;

/// Options for the [`OrderedQueueSender`](super::OrderedQueueSender)
///
/// Flatten it into a binaries option struct to make it configurable from the command line or environment.
#[derive(Debug, Clone, StructOpt)]
pub struct DispatchOptions {
    /// Soft limit of messages waiting for dispatch
    ///
    /// Admission is refused once the queue has reached this length. The check is not atomic
    /// with the insertion, concurrent producers may briefly push the queue beyond it.
    #[structopt(long, env, default_value = "10000", value_name = "messages")]
    pub max_queue_size: usize,

    /// Initial delay in milliseconds between consecutive failed handoffs
    ///
    /// Omitting it retries a failed message immediately.
    #[structopt(long, env, parse(try_from_str = parse_millis), value_name = "ms")]
    pub retry_backoff: Option<Duration>,

    /// Upper bound for the delay between consecutive failed handoffs in milliseconds
    #[structopt(long, env, parse(try_from_str = parse_millis), default_value = "5000", value_name = "ms")]
    pub retry_backoff_ceiling: Duration,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            max_queue_size: DEFAULT_MAX_QUEUE_SIZE,
            retry_backoff: None,
            retry_backoff_ceiling: Duration::from_secs(5),
        }
    }
}

impl DispatchOptions {
    /// Creates options with the given queue limit and default values otherwise
    pub fn with_max_queue_size(max_queue_size: usize) -> Self {
        Self {
            max_queue_size,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod does {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn use_defaults() {
        let options = DispatchOptions::from_iter_safe(&["test"]).unwrap();
        let defaults = DispatchOptions::default();

        assert_eq!(options.max_queue_size, defaults.max_queue_size);
        assert_eq!(options.retry_backoff, None);
        assert_eq!(options.retry_backoff_ceiling, defaults.retry_backoff_ceiling);
    }

    #[test]
    fn parse_arguments() {
        let options = DispatchOptions::from_iter_safe(&[
            "test",
            "--max-queue-size",
            "2",
            "--retry-backoff",
            "10",
        ])
        .unwrap();

        assert_eq!(options.max_queue_size, 2);
        assert_eq!(options.retry_backoff, Some(Duration::from_millis(10)));
    }
}
