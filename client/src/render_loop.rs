use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Coalesces repaint requests into one `requestAnimationFrame` callback.
///
/// Several avatar images finishing in the same frame cost a single redraw.
pub struct FrameScheduler {
    inner: Rc<Inner>,
}

struct Inner {
    window: Option<web_sys::Window>,
    pending: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler {
    pub fn new(on_frame: impl Fn() + 'static) -> Self {
        let inner = Rc::new(Inner {
            window: web_sys::window(),
            pending: Cell::new(false),
            raf_id: Cell::new(None),
            callback: RefCell::new(None),
        });

        let inner_cb = inner.clone();
        let cb = Closure::<dyn FnMut()>::new(move || {
            inner_cb.pending.set(false);
            inner_cb.raf_id.set(None);
            on_frame();
        });
        *inner.callback.borrow_mut() = Some(cb);

        Self { inner }
    }

    pub fn request(&self) {
        if self.inner.pending.get() {
            return;
        }
        let Some(window) = self.inner.window.as_ref() else {
            return;
        };
        let cb_ref = self.inner.callback.borrow();
        let Some(cb) = cb_ref.as_ref() else {
            return;
        };
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            self.inner.pending.set(true);
            self.inner.raf_id.set(Some(id));
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        if let Some(raf_id) = self.inner.raf_id.replace(None)
            && let Some(window) = self.inner.window.as_ref()
        {
            let _ = window.cancel_animation_frame(raf_id);
        }
        self.inner.pending.set(false);
        self.inner.callback.borrow_mut().take();
    }
}
