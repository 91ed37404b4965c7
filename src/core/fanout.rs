use super::error::BridgeError;
use super::params::{ParamAdapter, TaggedEvent};
use super::widgets::Control;
use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedControl = Rc<RefCell<dyn Control>>;

/// Fire-and-forget visual effect; the effect owns its own decay.
pub type TriggerFn = Box<dyn FnMut(&TaggedEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routed {
    Control,
    /// The control is mid-gesture; the echo is skipped.
    Busy,
    Trigger(usize),
    Ignored,
}

/// Routes the engine's tagged events to controls and visual triggers.
#[derive(Default)]
pub struct EventFanout {
    controls: FnvHashMap<String, SharedControl>,
    triggers: FnvHashMap<String, SmallVec<[TriggerFn; 2]>>,
    subscribed: bool,
}

impl EventFanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_control(&mut self, control: SharedControl) {
        let id = control.borrow().id().to_string();
        if self.controls.insert(id.clone(), control).is_some() {
            log::warn!("[fanout] control `{}` registered twice; keeping the latest", id);
        }
    }

    pub fn on_trigger(&mut self, tag: impl Into<String>, effect: TriggerFn) {
        self.triggers.entry(tag.into()).or_default().push(effect);
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn dispatch(&mut self, event: &TaggedEvent) -> Routed {
        if let Some(control) = self.controls.get(&event.tag) {
            let Some(value) = event.value() else {
                log::debug!("[fanout] `{}` carried no payload", event.tag);
                return Routed::Ignored;
            };
            return match control.try_borrow_mut() {
                Ok(mut c) => {
                    c.apply_external_value(value);
                    Routed::Control
                }
                Err(_) => Routed::Busy,
            };
        }
        if let Some(effects) = self.triggers.get_mut(&event.tag) {
            for effect in effects.iter_mut() {
                effect(event);
            }
            return Routed::Trigger(effects.len());
        }
        Routed::Ignored
    }
}

/// Subscribes the fan-out to the engine's stream. Allowed once, and only
/// after the store is ready.
pub fn subscribe(
    fanout: &Rc<RefCell<EventFanout>>,
    adapter: &ParamAdapter,
) -> Result<(), BridgeError> {
    if fanout.borrow().subscribed {
        return Err(BridgeError::AlreadySubscribed);
    }
    let source = adapter.event_source()?;
    let target = fanout.clone();
    source.subscribe(Box::new(move |event: TaggedEvent| {
        let routed = target.borrow_mut().dispatch(&event);
        log::trace!("[fanout] {} -> {:?}", event.tag, routed);
    }));
    fanout.borrow_mut().subscribed = true;
    Ok(())
}
