use crate::gallery::state::SessionId;
use crate::models::gallery_models::Photo;

pub const PHOTO_ALT_FALLBACK: &str = "Foto de producto";

/// One photo as the overlay should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView {
    pub session: SessionId,
    pub photo: Photo,
    pub index: usize,
    pub total: usize,
    pub title: String,
}

impl LightboxView {
    pub fn has_navigation(&self) -> bool {
        self.total > 1
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }

    pub fn alt_text(&self) -> &str {
        self.photo
            .description
            .as_deref()
            .unwrap_or(PHOTO_ALT_FALLBACK)
    }
}

/// What the overlay layer should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scene {
    Closed,
    Empty { session: SessionId, subcategory: String },
    Lightbox(LightboxView),
}

impl Scene {
    pub fn session(&self) -> Option<SessionId> {
        match self {
            Scene::Closed => None,
            Scene::Empty { session, .. } => Some(*session),
            Scene::Lightbox(view) => Some(view.session),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Scene::Closed)
    }
}

/// Renders gallery scenes. A scene carrying the same session id as the one
/// on screen is an in-place refresh; a different id means rebuild.
pub trait Presenter {
    fn show(&mut self, scene: Scene);
    fn set_loading(&mut self, loading: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "bg-success",
            NoticeKind::Error => "bg-danger",
            NoticeKind::Warning => "bg-warning",
            NoticeKind::Info => "bg-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Transient messages for the surrounding page. Presentation is the page's.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&self, notice: Notice);
}
