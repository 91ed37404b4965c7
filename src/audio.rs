use crate::core::{band_levels, BandLevels, ANALYSER_FFT_SIZE};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct AudioGraph {
    pub ctx: web::AudioContext,
    pub output: web::GainNode,
    pub analyser: Option<web::AnalyserNode>,
    pub analyser_buf: Rc<RefCell<Vec<u8>>>,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

// Analyser plus a byte buffer sized to its bin count
fn create_analyser(
    audio_ctx: &web::AudioContext,
) -> (Option<web::AnalyserNode>, Rc<RefCell<Vec<u8>>>) {
    let analyser: Option<web::AnalyserNode> = web::AnalyserNode::new(audio_ctx).ok();
    let buf: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    if let Some(a) = &analyser {
        a.set_fft_size(ANALYSER_FFT_SIZE);
        buf.borrow_mut().resize(a.frequency_bin_count() as usize, 0);
    } else {
        log::warn!("[audio] AnalyserNode unavailable; visuals will not react");
    }
    (analyser, buf)
}

pub fn build_graph() -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let output = create_gain(&ctx, 1.0, "Output")?;
    _ = output.connect_with_audio_node(&ctx.destination());
    let (analyser, analyser_buf) = create_analyser(&ctx);
    Ok(AudioGraph {
        ctx,
        output,
        analyser,
        analyser_buf,
    })
}

impl AudioGraph {
    /// Routes the engine's output into the speakers and the analyser.
    pub fn connect_source(&self, node: &web::AudioNode) {
        _ = node.connect_with_audio_node(&self.output);
        if let Some(a) = &self.analyser {
            _ = node.connect_with_audio_node(a);
        }
    }

    pub fn read_bands(&self) -> BandLevels {
        let Some(a) = &self.analyser else {
            return BandLevels::default();
        };
        let mut buf = self.analyser_buf.borrow_mut();
        a.get_byte_frequency_data(&mut buf);
        band_levels(&buf)
    }
}

// Browsers keep the context suspended until a user gesture
pub fn resume_on_body_click(audio_ctx: &web::AudioContext) {
    let Some(body) = web::window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let ctx = audio_ctx.clone();
    let closure = Closure::wrap(Box::new(move || {
        _ = ctx.resume();
    }) as Box<dyn FnMut()>);
    _ = body.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
