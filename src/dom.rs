use crate::core::BridgeError;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Looks up a required element. Absence is logged and reported, never fatal.
pub fn html_element(document: &web::Document, id: &str) -> Result<web::HtmlElement, BridgeError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        .ok_or_else(|| {
            log::warn!("[controls] missing element #{}; skipping", id);
            BridgeError::MissingElement(id.to_string())
        })
}

#[inline]
pub fn add_click_listener(element: &web::HtmlElement, mut handler: impl FnMut() + 'static) {
    let closure =
        wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn add_pointer_listener(
    element: &web::HtmlElement,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
    _ = element.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Visual centre of an element in client coordinates.
#[inline]
pub fn element_center(element: &web::HtmlElement) -> Vec2 {
    let rect = element.get_bounding_client_rect();
    Vec2::new(
        (rect.left() + rect.width() * 0.5) as f32,
        (rect.top() + rect.height() * 0.5) as f32,
    )
}

#[inline]
pub fn pointer_client(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

#[inline]
pub fn element_width(element: &web::HtmlElement) -> f32 {
    element.get_bounding_client_rect().width() as f32
}

#[inline]
pub fn set_style(element: &web::HtmlElement, property: &str, value: &str) {
    _ = element.style().set_property(property, value);
}

/// Text of an inline JSON element, e.g. `<script type="application/json">`.
pub fn inline_text(document: &web::Document, id: &str) -> Option<String> {
    document.get_element_by_id(id).and_then(|el| el.text_content())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
