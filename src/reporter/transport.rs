//! Default HTTP transport.
//!
//! # Design Decisions
//! - One worker thread drains a bounded queue and POSTs each event as JSON;
//!   log call sites never touch the network
//! - A full queue drops the event and bumps a counter instead of blocking
//! - The handshake is a plain GET at construction time; any HTTP answer
//!   proves the endpoint is reachable

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread;
use std::time::{Duration, Instant};

use url::Url;

use crate::observability::metrics;
use crate::reporter::client::{Event, TransmissionError, Transport};

const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);
const ENQUEUE_RETRY: Duration = Duration::from_millis(5);

enum Job {
    Send(Url, Event),
    Flush(SyncSender<()>),
}

/// Queue-backed transport posting JSON events over HTTP.
pub struct HttpTransport {
    queue: SyncSender<Job>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (queue, jobs) = mpsc::sync_channel(capacity);
        // If the spawn fails the receiver is dropped and submits surface
        // WorkerGone; nothing to report from inside a logging pipeline.
        let _ = thread::Builder::new()
            .name("logtee-transport".to_string())
            .spawn(move || deliver(jobs));
        Self { queue }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn deliver(jobs: Receiver<Job>) {
    let client = reqwest::blocking::Client::new();
    for job in jobs {
        match job {
            Job::Send(endpoint, event) => {
                let sent = client
                    .post(endpoint)
                    .json(&event)
                    .send()
                    .map(|resp| resp.status().is_success());
                if !matches!(sent, Ok(true)) {
                    metrics::record_transmission_error();
                }
            }
            Job::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

impl Transport for HttpTransport {
    fn handshake(&self, endpoint: &Url) -> Result<(), TransmissionError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HANDSHAKE_TIMEOUT)
            .build()
            .map_err(|e| TransmissionError::Unreachable(e.to_string()))?;
        client
            .get(endpoint.clone())
            .send()
            .map_err(|e| TransmissionError::Unreachable(e.to_string()))?;
        Ok(())
    }

    fn submit(&self, endpoint: &Url, event: Event) -> Result<(), TransmissionError> {
        match self.queue.try_send(Job::Send(endpoint.clone(), event)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                metrics::record_queue_drop();
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(TransmissionError::WorkerGone),
        }
    }

    fn flush(&self) -> Result<(), TransmissionError> {
        // One deadline covers the enqueue and the ack wait; a full queue
        // behind a slow endpoint must not stall flush (or fatal) past it.
        let deadline = Instant::now() + FLUSH_TIMEOUT;
        let (ack, done) = mpsc::sync_channel(1);
        send_with_deadline(&self.queue, Job::Flush(ack), deadline)?;
        done.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .map_err(|e| match e {
                RecvTimeoutError::Timeout => TransmissionError::Timeout,
                RecvTimeoutError::Disconnected => TransmissionError::WorkerGone,
            })
    }
}

fn send_with_deadline(
    queue: &SyncSender<Job>,
    job: Job,
    deadline: Instant,
) -> Result<(), TransmissionError> {
    let mut job = job;
    loop {
        match queue.try_send(job) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Full(returned)) => {
                if Instant::now() >= deadline {
                    return Err(TransmissionError::Timeout);
                }
                job = returned;
                thread::sleep(ENQUEUE_RETRY);
            }
            Err(TrySendError::Disconnected(_)) => return Err(TransmissionError::WorkerGone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn stub_event() -> Event {
        Event {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            level: Level::Error,
            message: "queued".to_string(),
            tags: BTreeMap::new(),
            fields: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_enqueue_respects_deadline_when_queue_stays_full() {
        let endpoint = Url::parse("https://errors.example.com/ingest").unwrap();
        let (queue, _jobs) = mpsc::sync_channel(1);
        queue
            .try_send(Job::Send(endpoint.clone(), stub_event()))
            .unwrap();

        // Nothing drains `_jobs`, so the queue stays full and the send must
        // give up at the deadline instead of blocking.
        let started = Instant::now();
        let deadline = started + Duration::from_millis(50);
        let result = send_with_deadline(&queue, Job::Send(endpoint, stub_event()), deadline);

        assert!(matches!(result, Err(TransmissionError::Timeout)));
        assert!(started.elapsed() >= Duration::from_millis(50));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_enqueue_fails_fast_when_worker_is_gone() {
        let endpoint = Url::parse("https://errors.example.com/ingest").unwrap();
        let (queue, jobs) = mpsc::sync_channel(1);
        drop(jobs);

        let result = send_with_deadline(
            &queue,
            Job::Send(endpoint, stub_event()),
            Instant::now() + Duration::from_secs(1),
        );
        assert!(matches!(result, Err(TransmissionError::WorkerGone)));
    }
}
