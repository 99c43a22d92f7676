//! Fan-out composition.
//!
//! # Design Decisions
//! - The tee forwards every record to every child in order, synchronously,
//!   on the calling thread; children apply their own thresholds
//! - A failing child never blocks the others and never propagates: the
//!   failure is counted via self-monitoring and the tee reports Ok
//! - Composing with an absent extra child returns the base unchanged; an
//!   absent child is never wrapped

use std::sync::Arc;

use crate::backend::{Backend, BackendError};
use crate::observability::metrics;
use crate::record::{Level, Record};

/// Forwards each record to every child backend.
pub struct TeeBackend {
    children: Vec<Arc<dyn Backend>>,
}

impl TeeBackend {
    pub fn new(children: Vec<Arc<dyn Backend>>) -> Self {
        Self { children }
    }
}

impl Backend for TeeBackend {
    fn kind(&self) -> &'static str {
        "tee"
    }

    fn enabled(&self, level: Level) -> bool {
        self.children.iter().any(|c| c.enabled(level))
    }

    fn log(&self, record: &Record<'_>) -> Result<(), BackendError> {
        for child in &self.children {
            if let Err(_err) = child.log(record) {
                metrics::record_forward_failure(child.kind());
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        for child in &self.children {
            if child.flush().is_err() {
                metrics::record_forward_failure(child.kind());
            }
        }
        Ok(())
    }
}

/// Tie a base backend and an optional extra backend together.
///
/// With no extra child this is a passthrough: the base is returned as-is.
pub fn compose(base: Arc<dyn Backend>, extra: Option<Arc<dyn Backend>>) -> Arc<dyn Backend> {
    match extra {
        Some(extra) => Arc::new(TeeBackend::new(vec![base, extra])),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NopBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<String>>,
        order: Arc<AtomicUsize>,
        positions: Mutex<Vec<usize>>,
    }

    impl Recording {
        fn new(order: Arc<AtomicUsize>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                order,
                positions: Mutex::new(Vec::new()),
            }
        }
    }

    impl Backend for Recording {
        fn kind(&self) -> &'static str {
            "recording"
        }
        fn enabled(&self, _level: Level) -> bool {
            true
        }
        fn log(&self, record: &Record<'_>) -> Result<(), BackendError> {
            self.seen.lock().unwrap().push(record.message.to_string());
            self.positions
                .lock()
                .unwrap()
                .push(self.order.fetch_add(1, Ordering::SeqCst));
            Ok(())
        }
        fn flush(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    struct Failing;

    impl Backend for Failing {
        fn kind(&self) -> &'static str {
            "failing"
        }
        fn enabled(&self, _level: Level) -> bool {
            true
        }
        fn log(&self, _record: &Record<'_>) -> Result<(), BackendError> {
            Err(BackendError::Io(std::io::Error::other("pipe closed")))
        }
        fn flush(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn test_both_children_receive_once_in_order() {
        let order = Arc::new(AtomicUsize::new(0));
        let base = Arc::new(Recording::new(order.clone()));
        let extra = Arc::new(Recording::new(order));

        let tee = compose(base.clone(), Some(extra.clone()));
        tee.log(&Record::new(Level::Info, "ping", &[])).unwrap();

        assert_eq!(*base.seen.lock().unwrap(), vec!["ping".to_string()]);
        assert_eq!(*extra.seen.lock().unwrap(), vec!["ping".to_string()]);
        assert!(base.positions.lock().unwrap()[0] < extra.positions.lock().unwrap()[0]);
    }

    #[test]
    fn test_failing_child_does_not_block_sibling() {
        let order = Arc::new(AtomicUsize::new(0));
        let base = Arc::new(Recording::new(order));

        // Failing child first, so success of the second proves isolation.
        let tee = TeeBackend::new(vec![Arc::new(Failing), base.clone()]);
        let result = tee.log(&Record::new(Level::Error, "boom", &[]));

        assert!(result.is_ok());
        assert_eq!(*base.seen.lock().unwrap(), vec!["boom".to_string()]);
    }

    #[test]
    fn test_compose_without_extra_is_passthrough() {
        let base: Arc<dyn Backend> = Arc::new(NopBackend);
        let composed = compose(base.clone(), None);
        assert!(Arc::ptr_eq(&base, &composed));
    }

    #[test]
    fn test_enabled_when_any_child_enabled() {
        let order = Arc::new(AtomicUsize::new(0));
        let tee = TeeBackend::new(vec![Arc::new(NopBackend), Arc::new(Recording::new(order))]);
        assert!(tee.enabled(Level::Debug));

        let silent = TeeBackend::new(vec![Arc::new(NopBackend)]);
        assert!(!silent.enabled(Level::Fatal));
    }
}
