use super::error::BridgeError;
use smallvec::SmallVec;

/// Payload of an engine message; most carry a single number.
pub type Payload = SmallVec<[f32; 4]>;

/// `{tag, payload}` record delivered by the engine's outbound stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaggedEvent {
    pub tag: String,
    pub payload: Payload,
}

impl TaggedEvent {
    pub fn new(tag: impl Into<String>, payload: &[f32]) -> Self {
        Self {
            tag: tag.into(),
            payload: SmallVec::from_slice(payload),
        }
    }

    #[inline]
    pub fn value(&self) -> Option<f32> {
        self.payload.first().copied()
    }
}

pub type EventListener = Box<dyn FnMut(TaggedEvent)>;

/// Capabilities the bridge needs from the external audio engine.
///
/// The browser side provides one implementation per engine flavour (a
/// parameter map or a send-message call); which one is used is decided once
/// when the handle is wrapped.
pub trait Engine {
    fn recognizes(&self, id: &str) -> bool;
    fn write(&self, id: &str, value: f32);
    fn subscribe(&self, listener: EventListener);
}

/// Mediates every access to the externally owned parameter store.
#[derive(Default)]
pub struct ParamAdapter {
    engine: Option<Box<dyn Engine>>,
}

impl ParamAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    /// One-shot readiness transition. A second engine is refused and the
    /// first one stays attached.
    pub fn attach(&mut self, engine: Box<dyn Engine>) -> Result<(), BridgeError> {
        if self.engine.is_some() {
            log::warn!("[bridge] engine already attached; ignoring second handle");
            return Err(BridgeError::AlreadyReady);
        }
        self.engine = Some(engine);
        Ok(())
    }

    pub fn recognizes(&self, id: &str) -> bool {
        self.engine.as_ref().map_or(false, |e| e.recognizes(id))
    }

    pub fn set_parameter(&self, id: &str, value: f32) -> Result<(), BridgeError> {
        let Some(engine) = self.engine.as_ref() else {
            log::debug!("[bridge] store not ready; dropped {}={:.3}", id, value);
            return Err(BridgeError::NotReady);
        };
        if !engine.recognizes(id) {
            log::warn!("[bridge] unknown parameter `{}`", id);
            return Err(BridgeError::UnknownParameter(id.to_string()));
        }
        engine.write(id, value);
        Ok(())
    }

    /// Callers are expected to check [`Self::is_ready`] first.
    pub fn event_source(&self) -> Result<&dyn Engine, BridgeError> {
        self.engine.as_deref().ok_or(BridgeError::NotReady)
    }
}
