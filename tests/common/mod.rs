//! Shared test transports injected at the builder's transport seam.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use logtee::reporter::{Event, TransmissionError, Transport};
use url::Url;

/// Records every handshake and submitted event.
#[derive(Default)]
pub struct RecordingTransport {
    pub handshakes: AtomicUsize,
    pub events: Mutex<Vec<Event>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[allow(dead_code)]
    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl Transport for RecordingTransport {
    fn handshake(&self, _endpoint: &Url) -> Result<(), TransmissionError> {
        self.handshakes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
    fn submit(&self, _endpoint: &Url, event: Event) -> Result<(), TransmissionError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
    fn flush(&self) -> Result<(), TransmissionError> {
        Ok(())
    }
}

/// Handshakes fine, then fails every submit.
#[allow(dead_code)]
pub struct FailingTransport;

impl Transport for FailingTransport {
    fn handshake(&self, _endpoint: &Url) -> Result<(), TransmissionError> {
        Ok(())
    }
    fn submit(&self, _endpoint: &Url, _event: Event) -> Result<(), TransmissionError> {
        Err(TransmissionError::Unreachable("connection reset".into()))
    }
    fn flush(&self) -> Result<(), TransmissionError> {
        Err(TransmissionError::Unreachable("connection reset".into()))
    }
}

/// Refuses the construction-time handshake.
#[allow(dead_code)]
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn handshake(&self, _endpoint: &Url) -> Result<(), TransmissionError> {
        Err(TransmissionError::Unreachable("no route to host".into()))
    }
    fn submit(&self, _endpoint: &Url, _event: Event) -> Result<(), TransmissionError> {
        Ok(())
    }
    fn flush(&self) -> Result<(), TransmissionError> {
        Ok(())
    }
}
