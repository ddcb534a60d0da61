//! End-to-end tests: the global sink slot and the lock working together
//! under concurrent callers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use emberkit::logging::{self, LogCategories, LogMessageType, LogSink, MemorySink};
use emberkit::sync::Lock;
use emberkit::{log_error, log_text};
use parking_lot::Mutex;

// The global slot is process state; tests touching it must not interleave.
static SLOT_GUARD: Mutex<()> = Mutex::new(());

fn install() -> Arc<MemorySink> {
    let sink = Arc::new(MemorySink::new());
    let as_dyn: Arc<dyn LogSink> = sink.clone();
    logging::set_global_sink(Some(&as_dyn));
    sink
}

#[test]
fn concurrent_emitters_share_one_sink() {
    let _guard = SLOT_GUARD.lock();
    let sink = install();

    let threads = 4;
    let per_thread = 250;

    let mut handles = vec![];
    for id in 0..threads {
        handles.push(thread::spawn(move || {
            for i in 0..per_thread {
                log_error!("worker {} step {}", id, i);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let messages = sink.messages();
    assert_eq!(messages.len(), threads * per_thread);
    assert!(messages
        .iter()
        .all(|(ty, text)| *ty == LogMessageType::Error && text.starts_with("Error: ")));

    logging::set_global_sink(None);
}

#[test]
fn guarded_sections_serialize_and_log() {
    let _guard = SLOT_GUARD.lock();
    let sink = install();

    let threads = 4;
    let increments = 1000;

    let lock = Arc::new(Lock::with_spin_count(64));
    let counter = Arc::new(AtomicUsize::new(0));

    let mut handles = vec![];
    for _ in 0..threads {
        let lock = Arc::clone(&lock);
        let counter = Arc::clone(&counter);
        handles.push(thread::spawn(move || {
            for _ in 0..increments {
                let _section = lock.lock();
                let value = counter.load(Ordering::Relaxed);
                counter.store(value + 1, Ordering::Relaxed);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.load(Ordering::Relaxed), threads * increments);

    log_text!("final count {}", counter.load(Ordering::Relaxed));
    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].1, format!("final count {}", threads * increments));

    logging::set_global_sink(None);
}

#[test]
fn mask_changes_apply_to_the_installed_sink() {
    let _guard = SLOT_GUARD.lock();
    let sink = install();

    sink.set_logging_mask(LogCategories::ALL - LogCategories::TEXT);
    log_text!("filtered");
    log_error!("kept");

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, LogMessageType::Error);

    sink.set_logging_mask(LogCategories::ALL);
    log_text!("visible again");
    assert_eq!(sink.len(), 2);

    logging::set_global_sink(None);
}

#[test]
fn replacing_the_global_sink_reroutes_emitters() {
    let _guard = SLOT_GUARD.lock();

    let first = install();
    log_text!("one");

    let second = install();
    log_text!("two");

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(second.messages()[0].1, "two");

    logging::set_global_sink(None);
    log_text!("dropped");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}
