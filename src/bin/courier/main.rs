use anyhow::Result;
use courier::dispatch::{OrderedQueueSender, QueueSender};
use courier::domain::ProduceMessage;
use courier::implementation::memory::{ExecutorManager, LoggingMessageSender};
use options::{Command, LogFormat, MainOptions};
use std::sync::Arc;
use std::time::Duration;
use structopt::StructOpt;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{info, warn};
use uuid::Uuid;

mod options;

const ADMISSION_RETRY_INTERVAL: Duration = Duration::from_millis(10);
const DELIVERY_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    let options = init();

    let sender = Arc::new(LoggingMessageSender::with_latency(options.send_latency));
    let directory = ExecutorManager::from_options(&options.memory, sender.clone());
    let queue_sender =
        OrderedQueueSender::new(directory.clone(), sender.clone(), options.dispatch.clone());

    let produced = match options.command {
        Command::Generate {
            subject,
            count,
            keys,
        } => generate(&queue_sender, &subject, count, keys).await,
        Command::Stdin => read_stdin(&queue_sender).await?,
    };

    info!(produced, "Messages admitted, waiting for delivery");

    tokio::select! {
        _ = wait_for_delivery(&sender, produced) => info!("All messages delivered"),
        _ = tokio::signal::ctrl_c() => warn!("Interrupted, abandoning undelivered messages"),
    }

    queue_sender.destroy();
    queue_sender.join().await;
    directory.close();

    info!(
        statistics = %serde_json::to_string(&queue_sender.statistics())?,
        "Dispatch finished"
    );

    Ok(())
}

fn init() -> MainOptions {
    let options = MainOptions::from_args();

    let formatter = tracing_subscriber::fmt().with_env_filter(options.log.as_str());

    match options.log_format {
        LogFormat::Text => formatter.init(),
        LogFormat::Compact => formatter.compact().init(),
        LogFormat::Json => formatter.json().init(),
    };

    info!("courier {}", env!("CARGO_PKG_VERSION"));

    options
}

/// Offers a message until the queue accepts it
async fn admit(queue_sender: &OrderedQueueSender, message: ProduceMessage) {
    let message = Arc::new(message);

    while !queue_sender.offer(message.clone()) {
        sleep(ADMISSION_RETRY_INTERVAL).await;
    }
}

async fn generate(queue_sender: &OrderedQueueSender, subject: &str, count: usize, keys: usize) -> u64 {
    for sequence in 0..count {
        let message = ProduceMessage::new(subject, Uuid::new_v4().to_string())
            .ordered_by(format!("key-{}", sequence % keys.max(1)))
            .with_payload(serde_json::json!({ "sequence": sequence }));

        admit(queue_sender, message).await;
    }

    count as u64
}

async fn read_stdin(queue_sender: &OrderedQueueSender) -> Result<u64> {
    let mut lines = BufReader::new(stdin()).lines();
    let mut produced = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<ProduceMessage>(&line) {
            Ok(message) => {
                admit(queue_sender, message).await;
                produced += 1;
            }
            Err(error) => warn!(%error, "Skipping malformed message"),
        }
    }

    Ok(produced)
}

async fn wait_for_delivery(sender: &LoggingMessageSender, expected: u64) {
    while sender.delivered() < expected {
        sleep(DELIVERY_POLL_INTERVAL).await;
    }
}
