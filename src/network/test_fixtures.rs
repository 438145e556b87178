//! Shared probe test doubles.

use super::{ConnectivityProbe, ProbeError, ProbeReport};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock probe that returns predefined results, then repeats the last report.
///
/// Uses `Mutex<VecDeque>` to avoid requiring `Clone` on `ProbeError`.
pub struct MockProbe {
    results: Mutex<VecDeque<Result<ProbeReport, ProbeError>>>,
    last: Mutex<ProbeReport>,
    calls: AtomicUsize,
}

impl MockProbe {
    pub fn new(results: Vec<Result<ProbeReport, ProbeError>>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            last: Mutex::new(ProbeReport::offline()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning_reports(reports: Vec<ProbeReport>) -> Self {
        Self::new(reports.into_iter().map(Ok).collect())
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(ProbeError::ServiceMissing {
            service: message.to_string(),
        })])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConnectivityProbe for MockProbe {
    fn probe(&self) -> Result<ProbeReport, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.results.lock().unwrap().pop_front();
        match next {
            Some(Ok(report)) => {
                *self.last.lock().unwrap() = report;
                Ok(report)
            }
            Some(Err(e)) => Err(e),
            None => Ok(*self.last.lock().unwrap()),
        }
    }
}
