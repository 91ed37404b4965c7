use crate::core::{Engine, EventListener, Payload, TaggedEvent};
use fnv::FnvHashSet;
use js_sys::{Array, Function, Map, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

#[inline]
fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn payload_from_js(value: &JsValue) -> Payload {
    if let Some(n) = value.as_f64() {
        return Payload::from_slice(&[n as f32]);
    }
    if Array::is_array(value) {
        return Array::from(value)
            .iter()
            .filter_map(|v| v.as_f64())
            .map(|n| n as f32)
            .collect();
    }
    Payload::new()
}

/// Subscribes `listener` to `device.messageEvent`. The JS callback lives for
/// the page session.
fn subscribe_message_event(device: &JsValue, mut listener: EventListener) {
    let message_event = get(device, "messageEvent");
    let Some(subscribe) = get(&message_event, "subscribe").dyn_ref::<Function>().cloned() else {
        log::warn!("[engine] device has no messageEvent stream");
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: JsValue| {
        let Some(tag) = get(&ev, "tag").as_string() else {
            return;
        };
        listener(TaggedEvent {
            tag,
            payload: payload_from_js(&get(&ev, "payload")),
        });
    }) as Box<dyn FnMut(JsValue)>);
    if let Err(e) = subscribe.call1(&message_event, closure.as_ref().unchecked_ref()) {
        log::error!("[engine] messageEvent.subscribe failed: {:?}", e);
    }
    closure.forget();
}

/// Engine exposing `parametersById` (a `Map` of objects with `.value`).
pub struct ParameterMapEngine {
    device: JsValue,
    params: Map,
}

impl Engine for ParameterMapEngine {
    fn recognizes(&self, id: &str) -> bool {
        self.params.has(&JsValue::from_str(id))
    }

    fn write(&self, id: &str, value: f32) {
        let param = self.params.get(&JsValue::from_str(id));
        let value = JsValue::from_f64(value as f64);
        if let Err(e) = Reflect::set(&param, &JsValue::from_str("value"), &value) {
            log::error!("[engine] set {} failed: {:?}", id, e);
        }
    }

    fn subscribe(&self, listener: EventListener) {
        subscribe_message_event(&self.device, listener);
    }
}

/// Engine driven through `sendMessage(tag, payload)`. Without a lookup of its
/// own, the recognised ids come from the patch description; an empty set
/// accepts every id.
pub struct MessageEngine {
    device: JsValue,
    send: Function,
    known: FnvHashSet<String>,
}

impl Engine for MessageEngine {
    fn recognizes(&self, id: &str) -> bool {
        self.known.is_empty() || self.known.contains(id)
    }

    fn write(&self, id: &str, value: f32) {
        let payload = Array::of1(&JsValue::from_f64(value as f64));
        if let Err(e) = self.send.call2(&self.device, &JsValue::from_str(id), &payload) {
            log::error!("[engine] sendMessage {} failed: {:?}", id, e);
        }
    }

    fn subscribe(&self, listener: EventListener) {
        subscribe_message_event(&self.device, listener);
    }
}

/// Picks the engine flavour once, by what the device exposes.
pub fn wrap_device(device: JsValue, known: FnvHashSet<String>) -> Option<Box<dyn Engine>> {
    if let Ok(params) = get(&device, "parametersById").dyn_into::<Map>() {
        log::info!("[engine] parameter map with {} entries", params.size());
        return Some(Box::new(ParameterMapEngine { device, params }));
    }
    if let Ok(send) = get(&device, "sendMessage").dyn_into::<Function>() {
        log::info!("[engine] send-message device ({} known ids)", known.len());
        return Some(Box::new(MessageEngine { device, send, known }));
    }
    log::error!("[engine] device exposes neither parametersById nor sendMessage");
    None
}

/// Calls the page-provided `RNBO.createDevice({ context, patcher })`.
pub async fn create_device(
    context: &web::AudioContext,
    patcher: &JsValue,
) -> anyhow::Result<JsValue> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let rnbo = get(&window, "RNBO");
    if rnbo.is_undefined() {
        anyhow::bail!("RNBO runtime not loaded on page");
    }
    let factory = get(&rnbo, "createDevice")
        .dyn_into::<Function>()
        .map_err(|_| anyhow::anyhow!("RNBO.createDevice missing"))?;
    let opts = Object::new();
    Reflect::set(&opts, &"context".into(), context).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Reflect::set(&opts, &"patcher".into(), patcher).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let promise = factory
        .call1(&rnbo, &opts)
        .map_err(|e| anyhow::anyhow!("createDevice: {:?}", e))?;
    JsFuture::from(js_sys::Promise::resolve(&promise))
        .await
        .map_err(|e| anyhow::anyhow!("createDevice rejected: {:?}", e))
}

/// The device's audio output node, if any.
pub fn device_node(device: &JsValue) -> Option<web::AudioNode> {
    get(device, "node").dyn_into::<web::AudioNode>().ok()
}
