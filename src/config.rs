use web_sys::Element;

/// Backend origin prefixed to every API path. Empty means same origin,
/// which is how the landing page is normally served.
pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

/// Subcategory ids are database keys: ASCII digits only. Anything else
/// would change the route once interpolated into the path.
pub fn is_valid_subcategory_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

pub fn subcategory_photos_path(subcategory_id: &str) -> String {
    format!("/api/subcategoria/{}/fotos/", subcategory_id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryConfig {
    pub mount_id: String,
    pub trigger_selector: String,
    pub nav_link_class: String,
    pub fade_ms: u32,
    pub toast_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            mount_id: "gallery-root".to_string(),
            trigger_selector: ".btn-ver-fotos, .navbar-producto-link".to_string(),
            nav_link_class: "navbar-producto-link".to_string(),
            fade_ms: 150,
            toast_ms: 5000,
        }
    }
}

impl GalleryConfig {
    /// Applies `data-fade-ms`, `data-toast-ms` and `data-trigger-selector`
    /// from the mount element. Unparseable values keep their defaults.
    pub fn with_overrides<F>(mut self, attr: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ms) = attr("data-fade-ms").and_then(|v| v.trim().parse().ok()) {
            self.fade_ms = ms;
        }
        if let Some(ms) = attr("data-toast-ms").and_then(|v| v.trim().parse().ok()) {
            self.toast_ms = ms;
        }
        if let Some(selector) = attr("data-trigger-selector").filter(|s| !s.trim().is_empty()) {
            self.trigger_selector = selector;
        }
        self
    }

    pub fn from_element(element: &Element) -> Self {
        let mount_id = element.id();
        let mut config = Self::default().with_overrides(|name| element.get_attribute(name));
        if !mount_id.is_empty() {
            config.mount_id = mount_id;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn photos_path_matches_backend_route() {
        assert_eq!(subcategory_photos_path("42"), "/api/subcategoria/42/fotos/");
    }

    #[test]
    fn only_numeric_ids_are_valid() {
        assert!(is_valid_subcategory_id("42"));
        assert!(!is_valid_subcategory_id(""));
        assert!(!is_valid_subcategory_id("1/../x"));
        assert!(!is_valid_subcategory_id("1?y"));
        assert!(!is_valid_subcategory_id("-3"));
    }

    #[test]
    fn overrides_apply_and_bad_values_are_ignored() {
        let attrs: HashMap<&str, &str> =
            HashMap::from([("data-fade-ms", "300"), ("data-toast-ms", "soon")]);
        let config = GalleryConfig::default()
            .with_overrides(|name| attrs.get(name).map(|v| v.to_string()));
        assert_eq!(config.fade_ms, 300);
        assert_eq!(config.toast_ms, 5000);
        assert_eq!(config.trigger_selector, ".btn-ver-fotos, .navbar-producto-link");
    }
}
