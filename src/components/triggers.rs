use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent};

use crate::config::{is_valid_subcategory_id, GalleryConfig};

pub const SUBCATEGORY_ATTR: &str = "data-subcategoria-id";
pub const PHOTO_INDEX_ATTR: &str = "data-foto-index";

/// A "view photos" activation read off the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub subcategory_id: String,
    pub start_index: usize,
}

impl Trigger {
    pub fn from_attributes(subcategory_id: Option<String>, photo_index: Option<String>) -> Option<Self> {
        let subcategory_id = subcategory_id?.trim().to_string();
        if !is_valid_subcategory_id(&subcategory_id) {
            return None;
        }
        let start_index = photo_index
            .and_then(|i| i.trim().parse().ok())
            .unwrap_or(0);
        Some(Self {
            subcategory_id,
            start_index,
        })
    }
}

/// One delegated `click` listener on the document for every trigger
/// element; removed when dropped.
pub struct TriggerListener {
    document: Document,
    handler: Closure<dyn Fn(MouseEvent)>,
}

impl TriggerListener {
    pub fn install<F>(config: &GalleryConfig, on_trigger: F) -> Option<Self>
    where
        F: Fn(Trigger) + 'static,
    {
        let document = web_sys::window()?.document()?;
        let selector = config.trigger_selector.clone();
        let nav_link = format!(".{}", config.nav_link_class);

        let handler = Closure::<dyn Fn(MouseEvent)>::new(move |e: MouseEvent| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let Ok(Some(element)) = target.closest(&selector) else {
                return;
            };
            if element.matches(&nav_link).unwrap_or(false) {
                e.prevent_default();
            }
            match Trigger::from_attributes(
                element.get_attribute(SUBCATEGORY_ATTR),
                element.get_attribute(PHOTO_INDEX_ATTR),
            ) {
                Some(trigger) => on_trigger(trigger),
                None => log::warn!("Gallery trigger has no valid {}", SUBCATEGORY_ATTR),
            }
        });

        if let Err(e) =
            document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        {
            log::error!("Failed to bind gallery triggers: {:?}", e);
            return None;
        }
        Some(Self { document, handler })
    }
}

impl Drop for TriggerListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("click", self.handler.as_ref().unchecked_ref())
        {
            log::error!("Failed to unbind gallery triggers: {:?}", e);
        }
    }
}
