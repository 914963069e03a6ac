use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, error, info, warn};

use crate::config::is_valid_subcategory_id;
use crate::error::FetchError;
use crate::gallery::fetcher::PhotoSource;
use crate::gallery::presenter::{Notice, NoticeKind, Notifier, Presenter, Scene};
use crate::gallery::state::GalleryState;
use crate::models::gallery_models::FetchedGallery;

/// Issued for every fetch; only the most recent one may touch the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPlan {
    Rejected,
    InFlight,
    Cached,
    Fetch(RequestTicket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Rejected,
    InFlight,
    Cached,
    Applied,
    Stale,
}

#[derive(Debug)]
struct PendingRequest {
    ticket: RequestTicket,
    subcategory_id: String,
    start_index: usize,
}

pub fn empty_gallery_message(subcategory: &str) -> String {
    format!("No hay fotos disponibles para {}", subcategory)
}

/// Owns the gallery session and mediates between fetches, navigation and
/// the presenter. Lives on the UI thread only.
pub struct GalleryController {
    state: GalleryState,
    presenter: Box<dyn Presenter>,
    notifier: Box<dyn Notifier>,
    issued: u64,
    pending: Option<PendingRequest>,
    cache: HashMap<String, FetchedGallery>,
}

impl GalleryController {
    pub fn new(presenter: Box<dyn Presenter>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            state: GalleryState::new(),
            presenter,
            notifier,
            issued: 0,
            pending: None,
            cache: HashMap::new(),
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Decides what a trigger for `subcategory_id` should do. A repeat of
    /// the request already in flight is a no-op; anything else supersedes it.
    pub fn request(&mut self, subcategory_id: &str, start_index: usize) -> RequestPlan {
        let subcategory_id = subcategory_id.trim();
        if !is_valid_subcategory_id(subcategory_id) {
            warn!("Gallery trigger with invalid subcategory id {:?}", subcategory_id);
            self.notifier
                .notify(Notice::new(NoticeKind::Error, crate::error::FETCH_FAILED_MESSAGE));
            return RequestPlan::Rejected;
        }

        if let Some(pending) = &mut self.pending {
            if pending.subcategory_id == subcategory_id {
                debug!("Request for subcategory {} already in flight", subcategory_id);
                pending.start_index = start_index;
                return RequestPlan::InFlight;
            }
        }

        if let Some(gallery) = self.cache.get(subcategory_id).cloned() {
            info!("Opening subcategory {} from cache", subcategory_id);
            if self.pending.take().is_some() {
                self.presenter.set_loading(false);
            }
            self.apply(gallery, start_index);
            return RequestPlan::Cached;
        }

        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        if let Some(superseded) = self.pending.replace(PendingRequest {
            ticket,
            subcategory_id: subcategory_id.to_string(),
            start_index,
        }) {
            debug!(
                "Request for subcategory {} superseded by {}",
                superseded.subcategory_id, subcategory_id
            );
        } else {
            self.presenter.set_loading(true);
        }
        info!("Fetching photos for subcategory {}", subcategory_id);
        RequestPlan::Fetch(ticket)
    }

    /// Applies a finished fetch if its ticket is still the latest one.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<FetchedGallery, FetchError>,
    ) -> Resolution {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            latest => {
                self.pending = latest;
                debug!("Discarding stale gallery response {:?}", ticket);
                return Resolution::Stale;
            }
        };
        self.presenter.set_loading(false);

        match result {
            Ok(gallery) => {
                self.cache
                    .insert(pending.subcategory_id.clone(), gallery.clone());
                self.apply(gallery, pending.start_index);
            }
            Err(e) => {
                error!(
                    "Error loading photos for subcategory {}: {}",
                    pending.subcategory_id, e
                );
                self.notifier
                    .notify(Notice::new(NoticeKind::Error, e.user_message()));
            }
        }
        Resolution::Applied
    }

    pub fn next(&mut self) {
        if self.state.next() {
            self.presenter.show(self.state.scene());
        }
    }

    pub fn previous(&mut self) {
        if self.state.previous() {
            self.presenter.show(self.state.scene());
        }
    }

    pub fn close(&mut self) {
        if self.state.close() {
            self.presenter.show(Scene::Closed);
        }
    }

    fn apply(&mut self, gallery: FetchedGallery, start_index: usize) {
        let FetchedGallery {
            subcategory,
            photos,
        } = gallery;
        let start_index = if start_index < photos.len() { start_index } else { 0 };
        let name = subcategory.name.clone();
        let empty = photos.is_empty();

        if let Err(e) = self.state.open(subcategory, photos, start_index) {
            error!("Could not open gallery: {}", e);
            return;
        }
        if empty {
            self.notifier
                .notify(Notice::new(NoticeKind::Info, empty_gallery_message(&name)));
        }
        self.presenter.show(self.state.scene());
    }
}

/// Runs one trigger end to end. No borrow of the controller is held while
/// the fetch is pending, so input keeps flowing during the await.
pub async fn open_subcategory(
    controller: Rc<RefCell<GalleryController>>,
    source: Rc<dyn PhotoSource>,
    subcategory_id: String,
    start_index: usize,
) -> OpenOutcome {
    let plan = controller.borrow_mut().request(&subcategory_id, start_index);
    let ticket = match plan {
        RequestPlan::Rejected => return OpenOutcome::Rejected,
        RequestPlan::InFlight => return OpenOutcome::InFlight,
        RequestPlan::Cached => return OpenOutcome::Cached,
        RequestPlan::Fetch(ticket) => ticket,
    };

    let result = source.fetch_photos(subcategory_id.trim()).await;

    match controller.borrow_mut().resolve(ticket, result) {
        Resolution::Applied => OpenOutcome::Applied,
        Resolution::Stale => OpenOutcome::Stale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::presenter::MockNotifier;
    use crate::models::gallery_models::{Photo, Subcategory};
    use pretty_assertions::assert_eq;

    #[derive(Default, Clone)]
    struct Recorder {
        scenes: Rc<RefCell<Vec<Scene>>>,
        loading: Rc<RefCell<Vec<bool>>>,
    }

    impl Presenter for Recorder {
        fn show(&mut self, scene: Scene) {
            self.scenes.borrow_mut().push(scene);
        }

        fn set_loading(&mut self, loading: bool) {
            self.loading.borrow_mut().push(loading);
        }
    }

    fn quiet_notifier() -> Box<MockNotifier> {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);
        Box::new(notifier)
    }

    fn gallery(name: &str, n: usize) -> FetchedGallery {
        FetchedGallery {
            subcategory: Subcategory {
                name: name.to_string(),
                ..Subcategory::default()
            },
            photos: (0..n).map(|i| Photo::new(format!("{name}-{i}.jpg"))).collect(),
        }
    }

    fn fetch_ticket(plan: RequestPlan) -> RequestTicket {
        match plan {
            RequestPlan::Fetch(ticket) => ticket,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn stale_response_is_discarded() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder.clone()), quiet_notifier());

        let a = fetch_ticket(controller.request("1", 0));
        let b = fetch_ticket(controller.request("2", 0));

        assert_eq!(controller.resolve(b, Ok(gallery("B", 2))), Resolution::Applied);
        assert_eq!(controller.resolve(a, Ok(gallery("A", 3))), Resolution::Stale);

        let scenes = recorder.scenes.borrow();
        assert_eq!(scenes.len(), 1);
        match scenes.last() {
            Some(Scene::Lightbox(view)) => assert_eq!(view.title, "B"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(*recorder.loading.borrow(), vec![true, false]);
    }

    #[test]
    fn duplicate_in_flight_request_is_a_noop() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder.clone()), quiet_notifier());

        let first = fetch_ticket(controller.request("5", 0));
        assert_eq!(controller.request("5", 0), RequestPlan::InFlight);
        assert_eq!(controller.request(" 5 ", 0), RequestPlan::InFlight);
        assert_eq!(controller.resolve(first, Ok(gallery("Sillas", 2))), Resolution::Applied);
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn failure_notifies_once_and_keeps_open_session() {
        let recorder = Recorder::default();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.kind == NoticeKind::Error && n.message == crate::error::FETCH_FAILED_MESSAGE)
            .times(1)
            .return_const(());
        let mut controller = GalleryController::new(Box::new(recorder.clone()), Box::new(notifier));

        let a = fetch_ticket(controller.request("1", 0));
        controller.resolve(a, Ok(gallery("A", 3)));
        controller.next();
        let before = controller.state().clone();

        let b = fetch_ticket(controller.request("99", 0));
        controller.resolve(b, Err(FetchError::Http { status: 500, reason: None }));

        assert_eq!(controller.state(), &before);
        assert_eq!(controller.current_index(), Some(1));
        assert!(!controller.is_loading());
    }

    #[test]
    fn empty_result_shows_empty_scene_and_info_notice() {
        let recorder = Recorder::default();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.kind == NoticeKind::Info && n.message == "No hay fotos disponibles para Closets")
            .times(1)
            .return_const(());
        let mut controller = GalleryController::new(Box::new(recorder.clone()), Box::new(notifier));

        let ticket = fetch_ticket(controller.request("42", 0));
        controller.resolve(ticket, Ok(gallery("Closets", 0)));

        assert_eq!(controller.current_index(), None);
        assert!(matches!(
            recorder.scenes.borrow().last(),
            Some(Scene::Empty { subcategory, .. }) if subcategory == "Closets"
        ));
    }

    #[test]
    fn repeat_click_while_in_flight_moves_start_index() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder), quiet_notifier());

        let ticket = fetch_ticket(controller.request("6", 0));
        assert_eq!(controller.request("6", 3), RequestPlan::InFlight);
        controller.resolve(ticket, Ok(gallery("Baños", 5)));
        assert_eq!(controller.current_index(), Some(3));
    }

    #[test]
    fn path_like_id_is_rejected_without_fetch() {
        let recorder = Recorder::default();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.kind == NoticeKind::Error)
            .times(1)
            .return_const(());
        let mut controller = GalleryController::new(Box::new(recorder.clone()), Box::new(notifier));
        assert_eq!(controller.request("1/../x", 0), RequestPlan::Rejected);
        assert!(!controller.is_loading());
        assert!(recorder.loading.borrow().is_empty());
    }

    #[test]
    fn cached_subcategory_opens_without_fetch() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder.clone()), quiet_notifier());

        let ticket = fetch_ticket(controller.request("3", 0));
        controller.resolve(ticket, Ok(gallery("Camas", 4)));
        controller.close();

        assert_eq!(controller.request("3", 2), RequestPlan::Cached);
        assert_eq!(controller.current_index(), Some(2));
    }

    #[test]
    fn cached_open_supersedes_pending_fetch() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder.clone()), quiet_notifier());

        let first = fetch_ticket(controller.request("3", 0));
        controller.resolve(first, Ok(gallery("Camas", 2)));

        let pending = fetch_ticket(controller.request("4", 0));
        assert_eq!(controller.request("3", 0), RequestPlan::Cached);
        assert_eq!(controller.resolve(pending, Ok(gallery("Mesas", 5))), Resolution::Stale);
        assert_eq!(controller.state().session().unwrap().photos().len(), 2);
        assert!(!controller.is_loading());
    }

    #[test]
    fn out_of_range_start_index_falls_back_to_first_photo() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder), quiet_notifier());
        let ticket = fetch_ticket(controller.request("8", 10));
        controller.resolve(ticket, Ok(gallery("Puertas", 3)));
        assert_eq!(controller.current_index(), Some(0));
    }

    #[test]
    fn blank_id_is_rejected_with_notice() {
        let recorder = Recorder::default();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| n.kind == NoticeKind::Error)
            .times(1)
            .return_const(());
        let mut controller = GalleryController::new(Box::new(recorder.clone()), Box::new(notifier));
        assert_eq!(controller.request("  ", 0), RequestPlan::Rejected);
        assert!(recorder.loading.borrow().is_empty());
    }

    #[test]
    fn navigation_refreshes_same_session_and_close_is_idempotent() {
        let recorder = Recorder::default();
        let mut controller = GalleryController::new(Box::new(recorder.clone()), quiet_notifier());
        let ticket = fetch_ticket(controller.request("1", 0));
        controller.resolve(ticket, Ok(gallery("A", 3)));
        controller.next();
        controller.previous();
        controller.close();
        controller.close();

        let scenes = recorder.scenes.borrow();
        assert_eq!(scenes.len(), 4);
        let sessions: Vec<_> = scenes[..3].iter().map(Scene::session).collect();
        assert!(sessions.iter().all(|s| s.is_some() && *s == sessions[0]));
        assert_eq!(scenes[3], Scene::Closed);
    }
}
