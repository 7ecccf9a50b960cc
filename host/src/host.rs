//! Async host owning a single table view engine.
//!
//! One tokio task owns the engine, so every operation is serialized through
//! its command channel. The task sleeps until the engine's pending filter
//! deadline; a newer filter moves the deadline, which replaces the sleep on
//! the next loop turn. After each change the displayed set is published on a
//! watch channel for the presentation layer to observe.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use tableview_engine::{
    Column, Envelope, Record, RecordId, TableViewEngine, Timestamp, ViewSnapshot,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::config::Config;
use crate::error::{HostError, Result};

/// Rows currently on screen.
pub type Displayed = Arc<[Record]>;

type Reply<T> = oneshot::Sender<T>;

/// Engine operations, each with its reply channel.
#[derive(Debug)]
enum Command {
    Load {
        records: Vec<Record>,
        reply: Reply<usize>,
    },
    SetFilter {
        text: String,
        reply: Reply<Timestamp>,
    },
    Sort {
        key: String,
        reply: Reply<tableview_engine::error::Result<Vec<Record>>>,
    },
    Delete {
        id: RecordId,
        reply: Reply<usize>,
    },
    Restore {
        reply: Reply<()>,
    },
    Displayed {
        reply: Reply<Displayed>,
    },
    Snapshot {
        reply: Reply<ViewSnapshot>,
    },
}

/// What travels over the channel: work for the engine, or a stop request.
#[derive(Debug)]
enum Message {
    Command(Command),
    Shutdown,
}

/// Spawns the engine task.
pub struct TableHost;

impl TableHost {
    /// Build an engine from `config` and start its task on the current runtime.
    pub fn spawn(config: &Config) -> Result<(TableHandle, JoinHandle<()>)> {
        let engine = TableViewEngine::new(config.engine_config())?;
        let (tx, rx) = mpsc::channel(config.command_buffer);
        let (displayed_tx, displayed_rx) = watch::channel(engine.compute_displayed());

        tracing::info!(
            locale = %config.locale,
            debounce_ms = config.debounce_ms,
            "Starting table host"
        );

        let worker = Worker {
            engine,
            epoch: Instant::now(),
            displayed: displayed_tx,
        };
        let join = tokio::spawn(worker.run(rx));

        Ok((
            TableHandle {
                tx,
                displayed: displayed_rx,
            },
            join,
        ))
    }
}

/// Cloneable handle for talking to the engine task.
#[derive(Debug, Clone)]
pub struct TableHandle {
    tx: mpsc::Sender<Message>,
    displayed: watch::Receiver<Displayed>,
}

impl TableHandle {
    async fn request<T>(&self, make: impl FnOnce(Reply<T>) -> Command) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Message::Command(make(reply)))
            .await
            .map_err(|_| HostError::Closed)?;
        rx.await.map_err(|_| HostError::Closed)
    }

    /// Replace the baseline. Returns the number of rows loaded.
    pub async fn load(&self, records: Vec<Record>) -> Result<usize> {
        self.request(|reply| Command::Load { records, reply }).await
    }

    /// Unwrap an upstream `{"results": [...]}` response and load it.
    pub async fn load_envelope_json(&self, json: &str) -> Result<usize> {
        let envelope = Envelope::from_json(json)?;
        self.load(envelope.into_records()).await
    }

    /// Set the filter text. The displayed set follows after the debounce
    /// window, unless another call arrives first.
    pub async fn set_filter(&self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.request(|reply| Command::SetFilter { text, reply })
            .await
            .map(|_| ())
    }

    /// Sort by a column key. Unknown keys surface as an engine error.
    pub async fn sort_by_key(&self, key: &str) -> Result<Vec<Record>> {
        let key = key.to_string();
        Ok(self.request(|reply| Command::Sort { key, reply }).await??)
    }

    pub async fn sort_by_column(&self, column: Column) -> Result<Vec<Record>> {
        self.sort_by_key(column.key()).await
    }

    pub async fn sort_by_country(&self) -> Result<Vec<Record>> {
        self.sort_by_column(Column::Country).await
    }

    /// Delete every rendered row with `id`. Returns how many were removed.
    pub async fn delete(&self, id: RecordId) -> Result<usize> {
        self.request(|reply| Command::Delete { id, reply }).await
    }

    /// Undo all deletions.
    pub async fn restore(&self) -> Result<()> {
        self.request(|reply| Command::Restore { reply }).await
    }

    /// Ask the engine for the displayed set right now.
    pub async fn displayed(&self) -> Result<Displayed> {
        self.request(|reply| Command::Displayed { reply }).await
    }

    pub async fn snapshot(&self) -> Result<ViewSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to displayed-set updates.
    pub fn subscribe(&self) -> watch::Receiver<Displayed> {
        self.displayed.clone()
    }

    /// Stop the engine task. Later calls on any handle return `Closed`.
    pub async fn shutdown(&self) -> Result<()> {
        self.tx
            .send(Message::Shutdown)
            .await
            .map_err(|_| HostError::Closed)
    }
}

struct Worker {
    engine: TableViewEngine,
    epoch: Instant,
    displayed: watch::Sender<Displayed>,
}

impl Worker {
    async fn run(mut self, mut rx: mpsc::Receiver<Message>) {
        loop {
            let deadline = self
                .engine
                .pending_deadline()
                .map(|ms| self.epoch + Duration::from_millis(ms));

            tokio::select! {
                message = rx.recv() => match message {
                    Some(Message::Command(command)) => self.handle(command),
                    Some(Message::Shutdown) | None => break,
                },
                _ = sleep_until_some(deadline) => {
                    if self.engine.poll(self.now()) {
                        self.publish();
                    }
                }
            }
        }

        tracing::info!("Table host stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Load { records, reply } => {
                self.engine.load(records);
                self.publish();
                let _ = reply.send(self.engine.baseline().len());
            }
            Command::SetFilter { text, reply } => {
                let deadline = self.engine.set_filter(text, self.now());
                tracing::debug!(deadline, "Filter scheduled");
                if self.engine.filter_text().is_empty() {
                    self.publish();
                }
                let _ = reply.send(deadline);
            }
            Command::Sort { key, reply } => {
                let result = self.engine.sort_by_key(&key).map(<[Record]>::to_vec);
                match &result {
                    Ok(_) => self.publish(),
                    Err(e) => tracing::warn!("Sort rejected: {}", e),
                }
                let _ = reply.send(result);
            }
            Command::Delete { id, reply } => {
                let removed = self.engine.delete_record(&id);
                if removed > 0 {
                    self.publish();
                }
                let _ = reply.send(removed);
            }
            Command::Restore { reply } => {
                self.engine.restore();
                self.publish();
                let _ = reply.send(());
            }
            Command::Displayed { reply } => {
                let _ = reply.send(self.engine.compute_displayed());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.engine.snapshot());
            }
        }
    }

    fn publish(&self) {
        self.displayed.send_replace(self.engine.compute_displayed());
    }

    /// Milliseconds since the task started.
    fn now(&self) -> Timestamp {
        Timestamp::try_from(self.epoch.elapsed().as_millis()).unwrap_or(Timestamp::MAX)
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}
