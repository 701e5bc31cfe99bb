use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod config;
pub mod growth;
pub mod math;
pub mod render;
pub mod scene;
pub mod scheduler;

use config::TreeConfig;
use render::{CanvasSurface, Surface};
use scene::{Scene, Viewport};
use scheduler::{DebounceTimer, FrameScheduler};

/// Quiet period before a resize burst triggers re-initialization
const RESIZE_DEBOUNCE_MS: i32 = 180;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Hero tree growth animation exposed to JavaScript.
///
/// The page constructs it with the hero canvas, then forwards DOM events:
/// `start` on load, `resize` on window/container resize notifications, and
/// `regrow` on pointer activation. Frame scheduling, debouncing, and the
/// growth loop itself all live on this side.
#[wasm_bindgen]
pub struct HeroTree {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    surface: CanvasSurface,
    scene: Scene,
    frame: FrameScheduler,
    resize_delay: DebounceTimer,
    pending_viewport: Option<(f32, f32, f32)>,
}

#[wasm_bindgen]
impl HeroTree {
    /// Create an engine bound to the given canvas
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> Result<HeroTree, JsValue> {
        let surface = CanvasSurface::new(canvas).map_err(err_to_js)?;
        let inner = Rc::new(RefCell::new(Inner {
            surface,
            scene: Scene::new(TreeConfig::default()),
            frame: FrameScheduler::new(),
            resize_delay: DebounceTimer::new(RESIZE_DEBOUNCE_MS),
            pending_viewport: None,
        }));

        let weak = Rc::downgrade(&inner);
        let on_frame = Closure::wrap(Box::new(move |now_ms: f64| {
            if let Some(inner) = weak.upgrade() {
                Inner::on_frame(&inner, now_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        inner.borrow_mut().frame.install(on_frame);

        let weak = Rc::downgrade(&inner);
        let on_resize_settled = Closure::wrap(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Inner::on_resize_settled(&inner);
            }
        }) as Box<dyn FnMut()>);
        inner.borrow_mut().resize_delay.install(on_resize_settled);

        Ok(HeroTree { inner })
    }

    /// Size the canvas and start growing from a freshly drawn seed
    pub fn start(&self, width: f32, height: f32, dpr: f32) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.surface.fit(width, height, dpr).map_err(err_to_js)?;
        inner.scene.clear_seed();
        inner.restart(Viewport::new(width, height)).map_err(err_to_js)
    }

    /// Notify a viewport change. Re-initialization is debounced over a
    /// short quiet period and keeps the current seed, so the regrown tree
    /// reads as a continuation rather than a fresh shape.
    pub fn resize(&self, width: f32, height: f32, dpr: f32) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.pending_viewport = Some((width, height, dpr));
        inner.resize_delay.schedule().map_err(err_to_js)
    }

    /// Pointer activation: discard the tree and regrow with a new seed
    pub fn regrow(&self) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.scene.clear_seed();
        let viewport = inner.scene.viewport();
        inner.restart(viewport).map_err(err_to_js)
    }

    /// Replace tuning constants from a YAML string and regrow
    pub fn set_tuning(&self, yaml: &str) -> Result<(), JsValue> {
        let cfg = TreeConfig::from_yaml(yaml).map_err(err_to_js)?;
        let mut inner = self.inner.borrow_mut();
        inner.scene.set_config(cfg);
        let viewport = inner.scene.viewport();
        inner.restart(viewport).map_err(err_to_js)
    }

    /// Whether a frame is currently scheduled
    pub fn is_running(&self) -> bool {
        self.inner.borrow().frame.pending()
    }

    pub fn node_count(&self) -> usize {
        self.inner.borrow().scene.arena().len()
    }

    /// Growth state snapshot as a JSON string
    pub fn stats_json(&self) -> String {
        let inner = self.inner.borrow();
        let scene = &inner.scene;
        format!(
            r#"{{"nodes":{},"maxDepth":{},"settled":{},"suspended":{}}}"#,
            scene.arena().len(),
            scene.arena().max_depth_reached(),
            scene.arena().settled(scene.config().max_depth),
            scene.suspended(),
        )
    }
}

impl Inner {
    /// Cancel any pending frame, rebuild the scene, and either resume the
    /// tick loop or clear and hide the surface while suspended
    fn restart(&mut self, viewport: Viewport) -> Result<(), String> {
        self.frame.cancel();
        self.scene
            .rebuild(viewport, js_sys::Math::random(), js_sys::Math::random());

        if self.scene.suspended() {
            self.surface.clear();
            self.surface.set_hidden(true);
            return Ok(());
        }
        self.surface.set_hidden(false);
        self.frame.request()
    }

    fn on_frame(rc: &Rc<RefCell<Inner>>, now_ms: f64) {
        let mut guard = rc.borrow_mut();
        let inner = &mut *guard;
        inner.frame.acknowledge();
        let grew = inner.scene.tick(&mut inner.surface, now_ms / 1000.0);
        if grew {
            let _ = inner.frame.request();
        }
    }

    fn on_resize_settled(rc: &Rc<RefCell<Inner>>) {
        let mut inner = rc.borrow_mut();
        inner.resize_delay.acknowledge();
        if let Some((width, height, dpr)) = inner.pending_viewport.take() {
            if inner.surface.fit(width, height, dpr).is_ok() {
                let _ = inner.restart(Viewport::new(width, height));
            }
        }
    }
}

fn err_to_js(e: String) -> JsValue {
    JsValue::from_str(&e)
}
