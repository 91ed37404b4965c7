#![cfg(target_arch = "wasm32")]
use crate::core::{
    subscribe, BridgeConfig, EventFanout, ParamBridge, PatchExport, TaggedEvent, VisualState,
    CONFIG_ELEMENT_ID,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod audio;
mod controls;
mod core;
mod dom;
mod engine;
mod frame;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("patch-bridge starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// The canvas to draw into: the configured element itself, or a fresh canvas
/// appended to it when it is a container.
fn resolve_canvas(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    if let Some(canvas) = el.dyn_ref::<web::HtmlCanvasElement>() {
        return Ok(canvas.clone());
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.set_attribute("style", "width:100%;height:100%;display:block");
    el.append_child(&canvas).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("patch export is not text"))
}

/// Fetches the patch, creates the engine and performs the readiness
/// transition: attach, flush queued writes, subscribe the fan-out.
async fn connect_engine(
    config: BridgeConfig,
    graph: Rc<audio::AudioGraph>,
    bridge: controls::SharedBridge,
    fanout: Rc<RefCell<EventFanout>>,
) -> anyhow::Result<()> {
    let text = fetch_text(&config.patch_url).await?;
    let patcher = js_sys::JSON::parse(&text).map_err(|e| anyhow::anyhow!("patch json: {:?}", e))?;
    let export = PatchExport::parse(&text).unwrap_or_else(|e| {
        log::warn!("[engine] unreadable patch description ({}); assuming defaults", e);
        PatchExport::default()
    });
    log::info!(
        "[engine] patch runtime version {}",
        export.runtime_version().unwrap_or("unknown")
    );

    let device = engine::create_device(&graph.ctx, &patcher).await?;
    if let Some(node) = engine::device_node(&device) {
        graph.connect_source(&node);
    }
    let handle = engine::wrap_device(device, export.known_ids())
        .ok_or_else(|| anyhow::anyhow!("unsupported device handle"))?;

    bridge.borrow_mut().become_ready(handle)?;
    subscribe(&fanout, bridge.borrow().adapter())?;
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = BridgeConfig::load(dom::inline_text(&document, CONFIG_ELEMENT_ID).as_deref());

    let graph = Rc::new(audio::build_graph()?);
    audio::resume_on_body_click(&graph.ctx);

    let bridge: controls::SharedBridge = Rc::new(RefCell::new(ParamBridge::new()));
    let fanout = Rc::new(RefCell::new(EventFanout::new()));
    let visual = Rc::new(RefCell::new(VisualState::new()));

    // Controls go live before the engine exists; their writes are queued.
    let wired = controls::wire_controls(&document, &config, &bridge, &fanout);

    {
        let mut f = fanout.borrow_mut();
        let v = visual.clone();
        f.on_trigger(
            config.flash_tag.as_str(),
            Box::new(move |ev: &TaggedEvent| v.borrow_mut().trigger_flash(ev.value())),
        );
        let v = visual.clone();
        f.on_trigger(
            config.post_tag.as_str(),
            Box::new(move |ev: &TaggedEvent| v.borrow_mut().toggle_post(ev.value())),
        );
    }

    spawn_local({
        let config = config.clone();
        let graph = graph.clone();
        let bridge = bridge.clone();
        let fanout = fanout.clone();
        async move {
            if let Err(e) = connect_engine(config, graph, bridge, fanout).await {
                log::error!("[engine] not connected: {:?}", e);
            }
        }
    });

    match resolve_canvas(&document, &config.canvas_id) {
        Ok(canvas) => {
            frame::wire_canvas_resize(&canvas);
            let gpu = frame::init_gpu(&canvas).await;
            let ctx = frame::FrameContext::new(visual, graph, wired, canvas, gpu);
            frame::start_loop(Rc::new(RefCell::new(ctx)));
        }
        Err(e) => log::warn!("[visual] no canvas ({}); running without visuals", e),
    }

    Ok(())
}
