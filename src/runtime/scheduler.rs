//! Single-task timer queue for deferred page work
//!
//! Jobs are ordered by due instant; jobs due at the same instant run in the
//! order they were scheduled. Every job runs with exclusive access to the
//! page, so deferred work never interleaves with itself.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering as AtomicOrdering}
    },
    time::Duration
};

use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::{Instant, sleep_until}
};
use tracing::{Level, event};

use super::PageContext;
use crate::domain::{I18nError, constant::scheduler};

pub type Job = Box<dyn FnOnce(&mut PageContext) + Send + 'static>;

struct ScheduledJob {
    due:   Instant,
    seq:   u64,
    label: &'static str,
    job:   Job
}

impl PartialEq for ScheduledJob {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for ScheduledJob {}

impl PartialOrd for ScheduledJob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledJob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

pub struct Scheduler {
    sender:   mpsc::UnboundedSender<ScheduledJob>,
    next_seq: AtomicU64,
    worker:   JoinHandle<()>
}

impl Scheduler {
    /// Start the worker task that runs jobs against `context`
    pub fn spawn(context: Arc<Mutex<PageContext>>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(context, receiver));
        event!(Level::DEBUG, event = scheduler::SCHEDULER_STARTED);
        Self { sender, next_seq: AtomicU64::new(0), worker }
    }

    /// Run `job` once `delay` has elapsed
    pub fn schedule(
        &self,
        delay: Duration,
        label: &'static str,
        job: impl FnOnce(&mut PageContext) + Send + 'static
    ) -> Result<(), I18nError> {
        let seq = self.next_seq.fetch_add(1, AtomicOrdering::SeqCst);
        let scheduled = ScheduledJob { due: Instant::now() + delay, seq, label, job: Box::new(job) };

        self.sender
            .send(scheduled)
            .map_err(|_| I18nError::Generic(format!("Scheduler stopped; dropped job: {}", label)))?;

        event!(Level::TRACE, event = scheduler::JOB_SCHEDULED, label, seq, delay_ms = delay.as_millis() as u64);
        Ok(())
    }

    /// Stop accepting jobs and wait until every pending one has run
    pub async fn shutdown(self) -> Result<(), I18nError> {
        let Self { sender, worker, .. } = self;
        drop(sender);
        worker.await.map_err(|e| I18nError::Generic(format!("Scheduler task failed: {}", e)))
    }
}

async fn run(context: Arc<Mutex<PageContext>>, mut receiver: mpsc::UnboundedReceiver<ScheduledJob>) {
    let mut queue: BinaryHeap<Reverse<ScheduledJob>> = BinaryHeap::new();
    let mut open = true;

    loop {
        let next_due = queue.peek().map(|Reverse(job)| job.due);
        if !open && next_due.is_none() {
            break;
        }

        tokio::select! {
            received = receiver.recv(), if open => match received {
                Some(job) => queue.push(Reverse(job)),
                None => open = false
            },
            _ = sleep_until(next_due.unwrap_or_else(Instant::now)), if next_due.is_some() => {
                let now = Instant::now();
                let mut page = context.lock().await;
                while queue.peek().is_some_and(|Reverse(job)| job.due <= now) {
                    if let Some(Reverse(ScheduledJob { label, seq, job, .. })) = queue.pop() {
                        job(&mut *page);
                        event!(Level::TRACE, event = scheduler::JOB_EXECUTED, label, seq);
                    }
                }
            }
        }
    }

    event!(Level::DEBUG, event = scheduler::SCHEDULER_STOPPED);
}
