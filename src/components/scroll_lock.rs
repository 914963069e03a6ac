use std::cell::RefCell;

use web_sys::HtmlElement;

/// Nesting-aware bookkeeping for the body scroll lock. Overlays may
/// overlap (loader then lightbox), so only the outermost acquire saves the
/// original `overflow` and only the last release restores it.
#[derive(Debug, Default)]
pub struct LockCount {
    holders: usize,
    saved: Option<String>,
}

impl LockCount {
    /// Returns true when this acquire should hide overflow.
    pub fn acquire(&mut self, current: impl FnOnce() -> String) -> bool {
        self.holders += 1;
        if self.holders == 1 {
            self.saved = Some(current());
            true
        } else {
            false
        }
    }

    /// Returns the value to restore when the last holder lets go.
    pub fn release(&mut self) -> Option<String> {
        match self.holders {
            0 => None,
            1 => {
                self.holders = 0;
                Some(self.saved.take().unwrap_or_default())
            }
            _ => {
                self.holders -= 1;
                None
            }
        }
    }
}

thread_local! {
    static BODY_LOCK: RefCell<LockCount> = RefCell::new(LockCount::default());
}

fn body() -> Option<HtmlElement> {
    web_sys::window()?.document()?.body()
}

/// Suppresses background scrolling for as long as it is alive.
pub struct ScrollLock {
    _private: (),
}

impl ScrollLock {
    pub fn acquire() -> Self {
        BODY_LOCK.with(|lock| {
            let body = body();
            let current = || {
                body.as_ref()
                    .and_then(|b| b.style().get_property_value("overflow").ok())
                    .unwrap_or_default()
            };
            if lock.borrow_mut().acquire(current) {
                if let Some(body) = &body {
                    if body.style().set_property("overflow", "hidden").is_err() {
                        log::warn!("Could not lock body scroll");
                    }
                }
            }
        });
        Self { _private: () }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        BODY_LOCK.with(|lock| {
            if let Some(previous) = lock.borrow_mut().release() {
                if let Some(body) = body() {
                    let style = body.style();
                    let restored = if previous.is_empty() {
                        style.remove_property("overflow").map(|_| ())
                    } else {
                        style.set_property("overflow", &previous)
                    };
                    if restored.is_err() {
                        log::warn!("Could not restore body scroll");
                    }
                }
            }
        });
    }
}
