use crate::error::StateError;
use crate::gallery::presenter::{LightboxView, Scene};
use crate::models::gallery_models::{PhotoSet, Subcategory};

/// Identifies one open gallery. A fresh id is handed out by every `open`,
/// so a superseding open is distinguishable from navigation within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    subcategory: Subcategory,
    photos: PhotoSet,
    current_index: usize,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn photos(&self) -> &PhotoSet {
        &self.photos
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    fn view(&self) -> LightboxView {
        LightboxView {
            session: self.id,
            photo: self.photos[self.current_index].clone(),
            index: self.current_index,
            total: self.photos.len(),
            title: self.subcategory.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Inactive,
    Empty { id: SessionId, subcategory: Subcategory },
    Active(Session),
}

/// The live gallery, if any. Owned by the controller and mutated only
/// through `open`, `next`, `previous` and `close`.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    phase: Phase,
    opened: u64,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Inactive,
            opened: 0,
        }
    }

    /// Replaces whatever was open. An empty set enters the terminal
    /// "no photos" display, which has no navigable index.
    pub fn open(
        &mut self,
        subcategory: Subcategory,
        photos: PhotoSet,
        start_index: usize,
    ) -> Result<SessionId, StateError> {
        if !photos.is_empty() && start_index >= photos.len() {
            return Err(StateError::StartIndexOutOfRange {
                index: start_index,
                len: photos.len(),
            });
        }

        self.opened += 1;
        let id = SessionId(self.opened);
        self.phase = if photos.is_empty() {
            Phase::Empty { id, subcategory }
        } else {
            Phase::Active(Session {
                id,
                subcategory,
                photos,
                current_index: start_index,
            })
        };
        Ok(id)
    }

    /// Returns true when the index moved.
    pub fn next(&mut self) -> bool {
        match &mut self.phase {
            Phase::Active(session) if session.photos.len() > 1 => {
                session.current_index = (session.current_index + 1) % session.photos.len();
                true
            }
            _ => false,
        }
    }

    /// Returns true when the index moved.
    pub fn previous(&mut self) -> bool {
        match &mut self.phase {
            Phase::Active(session) if session.photos.len() > 1 => {
                let len = session.photos.len();
                session.current_index = (session.current_index + len - 1) % len;
                true
            }
            _ => false,
        }
    }

    /// Returns true when something was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.phase = Phase::Inactive;
        was_open
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.phase, Phase::Inactive)
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        match &self.phase {
            Phase::Inactive => None,
            Phase::Empty { id, .. } => Some(*id),
            Phase::Active(session) => Some(session.id),
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session().map(Session::current_index)
    }

    pub fn scene(&self) -> Scene {
        match &self.phase {
            Phase::Inactive => Scene::Closed,
            Phase::Empty { id, subcategory } => Scene::Empty {
                session: *id,
                subcategory: subcategory.name.clone(),
            },
            Phase::Active(session) => Scene::Lightbox(session.view()),
        }
    }
}
