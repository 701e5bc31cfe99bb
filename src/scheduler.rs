use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "no window object".to_string())
}

/// Single-owner wrapper around requestAnimationFrame.
///
/// At most one request is outstanding at a time; any pending handle is
/// cancelled and cleared before a new scheduling decision.
pub struct FrameScheduler {
    pending: Option<i32>,
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            pending: None,
            callback: None,
        }
    }

    /// Install the per-frame callback once, after construction
    pub fn install(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }

    pub fn pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark the in-flight request as delivered
    pub fn acknowledge(&mut self) {
        self.pending = None;
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Ok(window) = window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Cancel any outstanding request, then schedule a new frame
    pub fn request(&mut self) -> Result<(), String> {
        self.cancel();
        let window = window()?;
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| "frame callback not installed".to_string())?;
        let handle = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|_| "requestAnimationFrame failed".to_string())?;
        self.pending = Some(handle);
        Ok(())
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Coalescing debounce timer: each signal replaces any pending deferred
/// job, so a burst fires the callback once after the quiet period.
pub struct DebounceTimer {
    delay_ms: i32,
    pending: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl DebounceTimer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
            callback: None,
        }
    }

    /// Install the settled callback once, after construction
    pub fn install(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }

    pub fn pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark the in-flight timeout as delivered
    pub fn acknowledge(&mut self) {
        self.pending = None;
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Ok(window) = window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }

    /// Restart the quiet period
    pub fn schedule(&mut self) -> Result<(), String> {
        self.cancel();
        let window = window()?;
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| "debounce callback not installed".to_string())?;
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                self.delay_ms,
            )
            .map_err(|_| "setTimeout failed".to_string())?;
        self.pending = Some(handle);
        Ok(())
    }
}
