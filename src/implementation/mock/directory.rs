use crate::dispatch::{ExecutorDirectory, SendMessageExecutor};
use crate::domain::{MessageGroup, MessageIdentifier, ProduceMessage};
use crate::library::{BoxedError, EmptyResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep, Instant};

/// Single handoff attempt observed by the [`MockExecutorDirectory`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// Executor resolution failed
    Failed(MessageIdentifier),
    /// Executor refused the message
    Rejected(MessageIdentifier),
    /// Message has been added to the executor
    HandedOff(MessageIdentifier),
}

#[derive(Default)]
struct Script {
    failures: HashMap<MessageIdentifier, usize>,
    rejections: HashMap<MessageIdentifier, usize>,
    panics: HashMap<MessageIdentifier, usize>,
}

impl Script {
    fn consume(counters: &mut HashMap<MessageIdentifier, usize>, id: &str) -> bool {
        match counters.get_mut(id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

/// Executor directory which records every attempt and fails on request
pub struct MockExecutorDirectory {
    attempts: Arc<Mutex<Vec<Attempt>>>,
    script: Arc<Mutex<Script>>,
    gate: watch::Sender<bool>,
    gate_rx: watch::Receiver<bool>,
}

impl Default for MockExecutorDirectory {
    fn default() -> Self {
        let (gate, gate_rx) = watch::channel(false);

        Self {
            attempts: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(Script::default())),
            gate,
            gate_rx,
        }
    }
}

impl MockExecutorDirectory {
    /// Lets the next `times` resolutions for the given message fail
    pub fn fail(&self, message_id: &str, times: usize) -> &Self {
        self.script
            .lock()
            .unwrap()
            .failures
            .insert(message_id.to_owned(), times);
        self
    }

    /// Lets the executor reject the given message `times` times
    pub fn reject(&self, message_id: &str, times: usize) -> &Self {
        self.script
            .lock()
            .unwrap()
            .rejections
            .insert(message_id.to_owned(), times);
        self
    }

    /// Panics during the next `times` resolutions for the given message
    pub fn panic(&self, message_id: &str, times: usize) -> &Self {
        self.script
            .lock()
            .unwrap()
            .panics
            .insert(message_id.to_owned(), times);
        self
    }

    /// Holds back all resolutions until [`unblock`](Self::unblock) is called
    pub fn block(&self) {
        self.gate.send(true).ok();
    }

    /// Releases resolutions held back by [`block`](Self::block)
    pub fn unblock(&self) {
        self.gate.send(false).ok();
    }

    /// All attempts in the order in which they have been observed
    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts.lock().unwrap().clone()
    }

    /// Identifiers of successfully handed off messages in handoff order
    pub fn handed_off(&self) -> Vec<MessageIdentifier> {
        self.attempts()
            .into_iter()
            .filter_map(|attempt| match attempt {
                Attempt::HandedOff(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Waits until `count` messages have been handed off or panics after a generous timeout
    pub async fn wait_for_handoffs(&self, count: usize) -> Vec<MessageIdentifier> {
        let deadline = Instant::now() + Duration::from_secs(5);

        loop {
            let handed_off = self.handed_off();
            if handed_off.len() >= count {
                return handed_off;
            }

            if Instant::now() > deadline {
                panic!(
                    "expected {} handoffs but only observed {:?}",
                    count,
                    self.attempts()
                );
            }

            sleep(Duration::from_millis(5)).await;
        }
    }

    async fn pass_gate(&self) {
        let mut gate = self.gate_rx.clone();

        loop {
            let blocked = *gate.borrow_and_update();
            if !blocked || gate.changed().await.is_err() {
                break;
            }
        }
    }
}

#[async_trait]
impl ExecutorDirectory for MockExecutorDirectory {
    async fn executor(
        &self,
        message: &ProduceMessage,
    ) -> Result<Arc<dyn SendMessageExecutor>, BoxedError> {
        self.pass_gate().await;

        let (fail, panic) = {
            let mut script = self.script.lock().unwrap();
            let fail = Script::consume(&mut script.failures, &message.message_id);
            let panic = Script::consume(&mut script.panics, &message.message_id);
            (fail, panic)
        };

        if panic {
            self.attempts
                .lock()
                .unwrap()
                .push(Attempt::Failed(message.message_id.clone()));
            panic!("scripted panic for {}", message);
        }

        if fail {
            self.attempts
                .lock()
                .unwrap()
                .push(Attempt::Failed(message.message_id.clone()));
            return Err(format!("scripted failure for {}", message).into());
        }

        Ok(Arc::new(MockExecutor {
            group: MessageGroup::new(&message.subject, format!("{}#0", message.subject), "mock"),
            attempts: self.attempts.clone(),
            script: self.script.clone(),
        }))
    }
}

struct MockExecutor {
    group: MessageGroup,
    attempts: Arc<Mutex<Vec<Attempt>>>,
    script: Arc<Mutex<Script>>,
}

impl SendMessageExecutor for MockExecutor {
    fn message_group(&self) -> &MessageGroup {
        &self.group
    }

    fn add_message(&self, message: Arc<ProduceMessage>) -> EmptyResult {
        let reject = Script::consume(
            &mut self.script.lock().unwrap().rejections,
            &message.message_id,
        );

        if reject {
            self.attempts
                .lock()
                .unwrap()
                .push(Attempt::Rejected(message.message_id.clone()));
            return Err(format!("scripted rejection for {}", message).into());
        }

        self.attempts
            .lock()
            .unwrap()
            .push(Attempt::HandedOff(message.message_id.clone()));
        Ok(())
    }
}
