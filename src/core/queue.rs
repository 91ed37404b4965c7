use super::error::BridgeError;
use super::params::{Engine, ParamAdapter};
use fnv::FnvHashMap;

/// Outbound write path used by widgets.
pub trait ParamWriter {
    fn enqueue_or_write(&mut self, id: &str, value: f32);
}

/// Writes requested before the store exists. At most one value per id.
#[derive(Default, Debug)]
pub struct PendingWrites {
    entries: FnvHashMap<String, f32>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<f32> {
        self.entries.get(id).copied()
    }

    pub fn enqueue_or_write(&mut self, adapter: &ParamAdapter, id: &str, value: f32) {
        if adapter.is_ready() {
            _ = adapter.set_parameter(id, value);
            return;
        }
        // Only the most recent value matters; intermediate drag values are dropped.
        self.entries.insert(id.to_string(), value);
    }

    /// Drains the queue into the store. Ids the store does not recognise are
    /// dropped after this single attempt. Returns the number of writes made.
    pub fn flush(&mut self, adapter: &ParamAdapter) -> usize {
        if self.entries.is_empty() {
            return 0;
        }
        let mut written = 0;
        for (id, value) in self.entries.drain() {
            if !adapter.recognizes(&id) {
                log::warn!("[bridge] dropping queued write for unknown `{}`", id);
                continue;
            }
            if adapter.set_parameter(&id, value).is_ok() {
                written += 1;
            }
        }
        written
    }
}

/// Adapter plus queue: the single entry point for parameter writes.
#[derive(Default)]
pub struct ParamBridge {
    adapter: ParamAdapter,
    pending: PendingWrites,
}

impl ParamBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn adapter(&self) -> &ParamAdapter {
        &self.adapter
    }

    pub fn pending(&self) -> &PendingWrites {
        &self.pending
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.adapter.is_ready()
    }

    /// Attaches the engine and drains everything queued so far.
    pub fn become_ready(&mut self, engine: Box<dyn Engine>) -> Result<usize, BridgeError> {
        self.adapter.attach(engine)?;
        let queued = self.pending.len();
        let written = self.pending.flush(&self.adapter);
        log::info!("[bridge] store ready; flushed {}/{} queued writes", written, queued);
        Ok(written)
    }

    pub fn flush(&mut self) -> usize {
        self.pending.flush(&self.adapter)
    }
}

impl ParamWriter for ParamBridge {
    fn enqueue_or_write(&mut self, id: &str, value: f32) {
        self.pending.enqueue_or_write(&self.adapter, id, value);
    }
}
