use structopt::StructOpt;

/// Options for the in-memory executor directory
#[derive(Debug, Clone, StructOpt)]
pub struct MemoryOptions {
    /// Number of partitions each subject is split into
    #[structopt(long, env, default_value = "4")]
    pub partitions: usize,

    /// Broker groups partitions are distributed across
    #[structopt(
        long,
        env,
        default_value = "broker-0",
        use_delimiter = true,
        value_name = "name,.."
    )]
    pub broker_groups: Vec<String>,

    /// Maximum number of messages an executor sends at once
    #[structopt(long, env, default_value = "30", value_name = "messages")]
    pub send_batch_size: usize,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            partitions: 4,
            broker_groups: vec!["broker-0".to_owned()],
            send_batch_size: 30,
        }
    }
}
