//! Structured logging emitted by the engines and the verification oracle.

use std::io;
use std::sync::{Arc, Mutex};

use formula_core::types::{BlackMarketData, NormalMarketData, OptionSpec};
use formula_models::analytical::{BachelierFormula, BlackFormula};
use formula_models::verify::{verify_bachelier_adjoint, VerificationConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber and returns everything it logged.
fn capture_logs<F: FnOnce()>(filter: &str, f: F) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(move || writer.clone()),
        );
    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

#[test]
fn test_degenerate_branches_trace() {
    let logs = capture_logs("trace", || {
        let data = BlackMarketData::new(104.0, 0.9, 0.0).unwrap();
        let _ = BlackFormula::price(&OptionSpec::call(94.0, 4.5).unwrap(), &data);
        let _ = BlackFormula::price(&OptionSpec::call(0.0, 4.5).unwrap(), &data);
    });
    assert!(logs.contains("black: intrinsic branch"), "{logs}");
    assert!(logs.contains("black: zero-strike branch"), "{logs}");
    assert!(logs.contains("sigma_root_t"), "{logs}");
}

#[test]
fn test_smooth_branch_is_silent() {
    let logs = capture_logs("trace", || {
        let data = NormalMarketData::new(104.0, 0.9, 25.0).unwrap();
        let _ = BachelierFormula::price_adjoint(&OptionSpec::put(94.0, 4.5).unwrap(), &data);
    });
    assert!(logs.is_empty(), "{logs}");
}

#[test]
fn test_failed_check_warns() {
    let logs = capture_logs("warn", || {
        let option = OptionSpec::call(104.0, 4.5).unwrap();
        let data = NormalMarketData::new(104.0, 0.9, 0.0).unwrap();
        let report =
            verify_bachelier_adjoint(&option, &data, &VerificationConfig::default()).unwrap();
        assert!(!report.all_passed());
    });
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("forward-forward"), "{logs}");
    assert!(!logs.contains("TRACE"), "{logs}");
}
