use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::lightbox::Lightbox;
use crate::components::loader::Loader;
use crate::components::toast::{ToastAction, ToastNotifier, ToastQueue, ToastStack};
use crate::components::triggers::TriggerListener;
use crate::config::GalleryConfig;
use crate::gallery::controller::{open_subcategory, GalleryController};
use crate::gallery::fetcher::{HttpPhotoSource, PhotoSource};
use crate::gallery::presenter::{Presenter, Scene};

/// Hands scenes to the host's component state.
struct StatePresenter {
    scene: UseStateSetter<Scene>,
    loading: UseStateSetter<bool>,
}

impl Presenter for StatePresenter {
    fn show(&mut self, scene: Scene) {
        self.scene.set(scene);
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading.set(loading);
    }
}

#[derive(Properties, PartialEq)]
pub struct GalleryHostProps {
    pub config: GalleryConfig,
}

#[function_component(GalleryHost)]
pub fn gallery_host(props: &GalleryHostProps) -> Html {
    let scene = use_state(|| Scene::Closed);
    let loading = use_state(|| false);
    let toasts = use_reducer(ToastQueue::default);

    let controller: Rc<RefCell<GalleryController>> = {
        let scene = scene.clone();
        let loading = loading.clone();
        let toasts = toasts.clone();
        use_mut_ref(move || {
            let presenter = StatePresenter {
                scene: scene.setter(),
                loading: loading.setter(),
            };
            let notifier = ToastNotifier::new(toasts.dispatcher());
            GalleryController::new(Box::new(presenter), Box::new(notifier))
        })
    };

    {
        let controller = controller.clone();
        let config = props.config.clone();
        use_effect_with_deps(
            move |_| {
                let source: Rc<dyn PhotoSource> = Rc::new(HttpPhotoSource);
                let listener = TriggerListener::install(&config, move |trigger| {
                    let controller = controller.clone();
                    let source = source.clone();
                    spawn_local(async move {
                        let outcome = open_subcategory(
                            controller,
                            source,
                            trigger.subcategory_id.clone(),
                            trigger.start_index,
                        )
                        .await;
                        log::debug!("Subcategory {}: {:?}", trigger.subcategory_id, outcome);
                    });
                });
                move || drop(listener)
            },
            (),
        );
    }

    let on_next = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.borrow_mut().next())
    };
    let on_previous = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.borrow_mut().previous())
    };
    let on_close = {
        let controller = controller.clone();
        Callback::from(move |_: ()| controller.borrow_mut().close())
    };
    let on_dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u64| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <>
            if let Some(session) = scene.session() {
                <Lightbox
                    key={session.get().to_string()}
                    scene={(*scene).clone()}
                    fade_ms={props.config.fade_ms}
                    on_next={on_next}
                    on_previous={on_previous}
                    on_close={on_close}
                />
            }
            if *loading {
                <Loader />
            }
            <ToastStack
                toasts={toasts.toasts.clone()}
                toast_ms={props.config.toast_ms}
                on_dismiss={on_dismiss}
            />
        </>
    }
}
