use crate::core::{
    BridgeConfig, BridgeError, Control, EventFanout, ParamBridge, RotaryKnob, SharedControl,
    ToggleButton, ToggleValues, VolumeSlider, TOGGLE_OFF_FILL, TOGGLE_ON_FILL,
};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type SharedBridge = Rc<RefCell<ParamBridge>>;

// ---------------- Views: core widget + the element(s) it renders into ----------------

pub struct RotaryView {
    knob: RotaryKnob,
    element: web::HtmlElement,
}

impl RotaryView {
    fn render(&self) {
        let transform = format!("rotate({:.2}deg)", self.knob.rotation_deg());
        dom::set_style(&self.element, "transform", &transform);
    }
}

impl Control for RotaryView {
    fn id(&self) -> &str {
        self.knob.id()
    }
    fn value(&self) -> f32 {
        self.knob.value()
    }
    fn apply_external_value(&mut self, value: f32) {
        self.knob.apply_external_value(value);
        self.render();
    }
}

pub struct SliderView {
    slider: VolumeSlider,
    track: web::HtmlElement,
    thumb: web::HtmlElement,
}

impl SliderView {
    fn measure(&mut self) {
        self.slider
            .set_geometry(dom::element_width(&self.track), dom::element_width(&self.thumb));
    }

    fn render(&self) {
        dom::set_style(&self.thumb, "left", &format!("{:.1}px", self.slider.offset()));
    }
}

impl Control for SliderView {
    fn id(&self) -> &str {
        self.slider.id()
    }
    fn value(&self) -> f32 {
        self.slider.value()
    }
    fn apply_external_value(&mut self, value: f32) {
        self.slider.apply_external_value(value);
        self.render();
    }
}

pub struct ToggleView {
    button: ToggleButton,
    element: web::HtmlElement,
}

impl ToggleView {
    fn render(&self) {
        let active = self.button.is_active();
        dom::set_style(
            &self.element,
            "background-color",
            if active { TOGGLE_ON_FILL } else { TOGGLE_OFF_FILL },
        );
        _ = self.element.class_list().toggle_with_force("active", active);
    }
}

impl Control for ToggleView {
    fn id(&self) -> &str {
        self.button.id()
    }
    fn value(&self) -> f32 {
        self.button.value()
    }
    fn apply_external_value(&mut self, value: f32) {
        self.button.apply_external_value(value);
        self.render();
    }
}

// ---------------- Wiring ----------------

fn release_capture(element: &web::HtmlElement, ev: &web::PointerEvent) {
    if element.has_pointer_capture(ev.pointer_id()) {
        _ = element.release_pointer_capture(ev.pointer_id());
    }
}

fn wire_rotary(
    document: &web::Document,
    config: &BridgeConfig,
    id: &str,
    bridge: &SharedBridge,
) -> Result<Rc<RefCell<RotaryView>>, BridgeError> {
    let element = dom::html_element(document, &BridgeConfig::rotary_element_id(id))?;
    let view = Rc::new(RefCell::new(RotaryView {
        knob: RotaryKnob::new(id, config.rotary_mode()),
        element: element.clone(),
    }));
    view.borrow().render();

    {
        let view = view.clone();
        let el = element.clone();
        dom::add_pointer_listener(&element, "pointerdown", move |ev| {
            let center = dom::element_center(&el);
            view.borrow_mut().knob.pointer_down(dom::pointer_client(&ev), center);
            _ = el.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        });
    }
    {
        let view = view.clone();
        let bridge = bridge.clone();
        let el = element.clone();
        dom::add_pointer_listener(&element, "pointermove", move |ev| {
            let mut v = view.borrow_mut();
            if !v.knob.is_dragging() {
                return;
            }
            let center = dom::element_center(&el);
            let moved = v
                .knob
                .pointer_move(dom::pointer_client(&ev), center, &mut *bridge.borrow_mut());
            if moved.is_some() {
                v.render();
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let view = view.clone();
        let el = element.clone();
        dom::add_pointer_listener(&element, event, move |ev| {
            {
                let mut v = view.borrow_mut();
                if ev.type_() == "pointercancel" {
                    v.knob.pointer_cancel();
                } else {
                    v.knob.pointer_up();
                }
            }
            release_capture(&el, &ev);
        });
    }
    Ok(view)
}

fn wire_volume(
    document: &web::Document,
    config: &BridgeConfig,
    bridge: &SharedBridge,
) -> Result<Rc<RefCell<SliderView>>, BridgeError> {
    let track = dom::html_element(document, &config.volume.track_id)?;
    let thumb = dom::html_element(document, &config.volume.thumb_id)?;
    let view = Rc::new(RefCell::new(SliderView {
        slider: VolumeSlider::new(
            config.volume.id.as_str(),
            dom::element_width(&track),
            dom::element_width(&thumb),
        ),
        track,
        thumb: thumb.clone(),
    }));
    {
        let mut v = view.borrow_mut();
        v.slider
            .apply_default(config.volume.default, &mut *bridge.borrow_mut());
        v.render();
    }

    {
        let view = view.clone();
        let el = thumb.clone();
        dom::add_pointer_listener(&thumb, "pointerdown", move |ev| {
            let mut v = view.borrow_mut();
            v.measure();
            v.slider.pointer_down(ev.client_x() as f32);
            _ = el.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        });
    }
    {
        let view = view.clone();
        let bridge = bridge.clone();
        dom::add_pointer_listener(&thumb, "pointermove", move |ev| {
            let mut v = view.borrow_mut();
            if !v.slider.is_dragging() {
                return;
            }
            if v
                .slider
                .pointer_move(ev.client_x() as f32, &mut *bridge.borrow_mut())
                .is_some()
            {
                v.render();
            }
        });
    }
    for event in ["pointerup", "pointercancel"] {
        let view = view.clone();
        let el = thumb.clone();
        dom::add_pointer_listener(&thumb, event, move |ev| {
            {
                let mut v = view.borrow_mut();
                if ev.type_() == "pointercancel" {
                    v.slider.pointer_cancel();
                } else {
                    v.slider.pointer_up();
                }
            }
            release_capture(&el, &ev);
        });
    }
    Ok(view)
}

fn wire_toggle(
    document: &web::Document,
    id: &str,
    values: ToggleValues,
    bridge: &SharedBridge,
) -> Result<Rc<RefCell<ToggleView>>, BridgeError> {
    let element = dom::html_element(document, id)?;
    let view = Rc::new(RefCell::new(ToggleView {
        button: ToggleButton::new(id, values),
        element: element.clone(),
    }));
    view.borrow().render();

    let v2 = view.clone();
    let bridge = bridge.clone();
    dom::add_click_listener(&element, move || {
        let mut v = v2.borrow_mut();
        let value = v.button.click(&mut *bridge.borrow_mut());
        v.render();
        log::info!("[controls] {} -> {}", v.button.id(), value);
    });
    Ok(view)
}

/// Binds every configured control that has its elements on the page and
/// registers it with the fan-out. Controls with missing elements are skipped.
pub fn wire_controls(
    document: &web::Document,
    config: &BridgeConfig,
    bridge: &SharedBridge,
    fanout: &Rc<RefCell<EventFanout>>,
) -> Vec<SharedControl> {
    let mut controls: Vec<SharedControl> = Vec::new();

    for id in &config.rotaries {
        if let Ok(view) = wire_rotary(document, config, id, bridge) {
            controls.push(view);
        }
    }
    if let Ok(view) = wire_volume(document, config, bridge) {
        controls.push(view);
    }
    for toggle in &config.toggles {
        if let Ok(view) = wire_toggle(document, &toggle.id, toggle.values(), bridge) {
            controls.push(view);
        }
    }

    let mut f = fanout.borrow_mut();
    for c in &controls {
        f.register_control(c.clone());
    }
    log::info!(
        "[controls] wired {} controls ({} queued writes)",
        controls.len(),
        bridge.borrow().pending().len()
    );
    controls
}
