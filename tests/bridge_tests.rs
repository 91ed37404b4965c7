// Host-side tests for the parameter adapter and the pending-write queue.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod error {
        include!("../src/core/error.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod queue {
        include!("../src/core/queue.rs");
    }
}

use crate::core::error::BridgeError;
use crate::core::params::*;
use crate::core::queue::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Recorded {
    writes: RefCell<Vec<(String, f32)>>,
    listeners: RefCell<Vec<EventListener>>,
}

struct MockEngine {
    known: Vec<&'static str>,
    log: Rc<Recorded>,
}

impl Engine for MockEngine {
    fn recognizes(&self, id: &str) -> bool {
        self.known.contains(&id)
    }
    fn write(&self, id: &str, value: f32) {
        self.log.writes.borrow_mut().push((id.to_string(), value));
    }
    fn subscribe(&self, listener: EventListener) {
        self.log.listeners.borrow_mut().push(listener);
    }
}

fn mock(known: &[&'static str]) -> (Box<dyn Engine>, Rc<Recorded>) {
    let log = Rc::new(Recorded::default());
    let engine = MockEngine {
        known: known.to_vec(),
        log: log.clone(),
    };
    (Box::new(engine), log)
}

fn writes_for(log: &Recorded, id: &str) -> Vec<f32> {
    log.writes
        .borrow()
        .iter()
        .filter(|(i, _)| i == id)
        .map(|(_, v)| *v)
        .collect()
}

#[test]
fn queued_writes_keep_only_the_last_value_per_id() {
    let mut bridge = ParamBridge::new();
    bridge.enqueue_or_write("a", 0.1);
    bridge.enqueue_or_write("a", 0.2);
    bridge.enqueue_or_write("a", 0.3);
    assert_eq!(bridge.pending().len(), 1);
    assert_eq!(bridge.pending().get("a"), Some(0.3));

    let (engine, log) = mock(&["a", "b"]);
    let written = bridge.become_ready(engine).expect("first attach");
    assert_eq!(written, 1);
    assert_eq!(writes_for(&log, "a"), vec![0.3]);
    assert!(bridge.pending().is_empty());
}

#[test]
fn flush_never_writes_ids_that_were_not_enqueued() {
    let mut bridge = ParamBridge::new();
    bridge.enqueue_or_write("a", 0.5);
    let (engine, log) = mock(&["a", "b", "c"]);
    bridge.become_ready(engine).unwrap();
    assert!(writes_for(&log, "b").is_empty());
    assert!(writes_for(&log, "c").is_empty());
    assert_eq!(log.writes.borrow().len(), 1);
}

#[test]
fn second_flush_is_a_no_op() {
    let mut bridge = ParamBridge::new();
    bridge.enqueue_or_write("a", 0.3);
    let (engine, log) = mock(&["a"]);
    bridge.become_ready(engine).unwrap();
    assert_eq!(writes_for(&log, "a"), vec![0.3]);

    assert_eq!(bridge.flush(), 0);
    assert_eq!(log.writes.borrow().len(), 1);
}

#[test]
fn writes_after_ready_bypass_the_queue() {
    let mut bridge = ParamBridge::new();
    let (engine, log) = mock(&["volume"]);
    bridge.become_ready(engine).unwrap();

    bridge.enqueue_or_write("volume", 0.4);
    bridge.enqueue_or_write("volume", 0.6);
    assert!(bridge.pending().is_empty());
    assert_eq!(writes_for(&log, "volume"), vec![0.4, 0.6]);
}

#[test]
fn flush_drops_unknown_ids_after_one_attempt() {
    let mut bridge = ParamBridge::new();
    bridge.enqueue_or_write("ghost", 0.9);
    bridge.enqueue_or_write("a", 0.2);
    let (engine, log) = mock(&["a"]);
    assert_eq!(bridge.become_ready(engine).unwrap(), 1);
    assert!(bridge.pending().is_empty());
    assert!(writes_for(&log, "ghost").is_empty());
    assert_eq!(bridge.flush(), 0);
}

#[test]
fn flush_on_empty_queue_writes_nothing() {
    let adapter = ParamAdapter::new();
    let mut pending = PendingWrites::new();
    assert_eq!(pending.flush(&adapter), 0);
    assert!(pending.is_empty());
}

#[test]
fn adapter_reports_not_ready_and_unknown_ids() {
    let mut adapter = ParamAdapter::new();
    assert!(!adapter.is_ready());
    assert_eq!(adapter.set_parameter("a", 0.5), Err(BridgeError::NotReady));
    assert!(matches!(adapter.event_source(), Err(BridgeError::NotReady)));

    let (engine, log) = mock(&["a"]);
    adapter.attach(engine).unwrap();
    assert!(adapter.is_ready());
    assert!(adapter.event_source().is_ok());
    assert_eq!(
        adapter.set_parameter("zzz", 0.5),
        Err(BridgeError::UnknownParameter("zzz".to_string()))
    );
    assert_eq!(adapter.set_parameter("a", 0.25), Ok(()));
    assert_eq!(writes_for(&log, "a"), vec![0.25]);
}

#[test]
fn second_engine_is_refused() {
    let mut bridge = ParamBridge::new();
    let (first, first_log) = mock(&["a"]);
    let (second, second_log) = mock(&["a"]);
    bridge.become_ready(first).unwrap();
    assert_eq!(bridge.become_ready(second), Err(BridgeError::AlreadyReady));

    bridge.enqueue_or_write("a", 0.7);
    assert_eq!(writes_for(&first_log, "a"), vec![0.7]);
    assert!(second_log.writes.borrow().is_empty());
}

#[test]
fn tagged_event_value_is_first_payload_entry() {
    let ev = TaggedEvent::new("speed", &[0.4, 9.0]);
    assert_eq!(ev.value(), Some(0.4));
    assert_eq!(TaggedEvent::new("bang", &[]).value(), None);
}
