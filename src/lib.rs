pub mod components;
pub mod config;
pub mod error;
pub mod gallery;
pub mod models;
pub mod utils;

use crate::components::gallery_host::{GalleryHost, GalleryHostProps};
use crate::config::GalleryConfig;

/// Mounts the gallery into `#gallery-root`, creating the element at the end
/// of `<body>` when the page does not provide one.
pub fn mount() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No document available, gallery not mounted");
        return;
    };
    let default_id = GalleryConfig::default().mount_id;

    let root = match document.get_element_by_id(&default_id) {
        Some(root) => root,
        None => {
            let created = document.create_element("div").and_then(|root| {
                root.set_id(&default_id);
                if let Some(body) = document.body() {
                    body.append_child(&root)?;
                }
                Ok(root)
            });
            match created {
                Ok(root) => root,
                Err(e) => {
                    log::error!("Failed to create gallery root: {:?}", e);
                    return;
                }
            }
        }
    };

    let config = GalleryConfig::from_element(&root);
    log::info!("Mounting gallery into #{}", config.mount_id);
    yew::Renderer::<GalleryHost>::with_root_and_props(root, GalleryHostProps { config }).render();
}
