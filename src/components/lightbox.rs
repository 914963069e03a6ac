use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, KeyboardEvent};
use yew::prelude::*;

use crate::components::scroll_lock::ScrollLock;
use crate::gallery::presenter::Scene;

pub const EMPTY_HEADING: &str = "No hay fotos disponibles";
pub const EMPTY_BODY: &str = "No hay fotos disponibles para esta subcategoría.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Previous,
    Next,
    Close,
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "ArrowLeft" => Some(KeyAction::Previous),
        "ArrowRight" => Some(KeyAction::Next),
        "Escape" => Some(KeyAction::Close),
        _ => None,
    }
}

/// What the overlay does when the requested scene changes. Returning to
/// the photo already on screen (next then previous inside the fade window)
/// must settle back to fully visible, since the pending fade was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStep {
    Settle,
    FadeTo,
}

pub fn fade_step(shown: &Scene, requested: &Scene) -> FadeStep {
    if shown == requested {
        FadeStep::Settle
    } else {
        FadeStep::FadeTo
    }
}

/// Document `keydown` binding that is removed when dropped.
struct KeyBindings {
    document: Document,
    handler: Closure<dyn Fn(KeyboardEvent)>,
}

impl KeyBindings {
    fn install(
        on_previous: Callback<()>,
        on_next: Callback<()>,
        on_close: Callback<()>,
    ) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let handler = Closure::<dyn Fn(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            match key_action(&e.key()) {
                Some(KeyAction::Previous) => on_previous.emit(()),
                Some(KeyAction::Next) => on_next.emit(()),
                Some(KeyAction::Close) => on_close.emit(()),
                None => {}
            }
        });
        if let Err(e) =
            document.add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        {
            log::error!("Failed to bind lightbox keys: {:?}", e);
            return None;
        }
        Some(Self { document, handler })
    }
}

impl Drop for KeyBindings {
    fn drop(&mut self) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback("keydown", self.handler.as_ref().unchecked_ref())
        {
            log::error!("Failed to unbind lightbox keys: {:?}", e);
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub scene: Scene,
    pub fade_ms: u32,
    pub on_next: Callback<()>,
    pub on_previous: Callback<()>,
    pub on_close: Callback<()>,
}

/// Full-viewport overlay for one gallery session. The host keys it by
/// session id, so mount and unmount bracket exactly one open session.
#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    let root = use_node_ref();
    let shown = use_state(|| props.scene.clone());
    let fading = use_state(|| false);

    // Key bindings and scroll lock live exactly as long as the overlay.
    {
        let on_previous = props.on_previous.clone();
        let on_next = props.on_next.clone();
        let on_close = props.on_close.clone();
        use_effect_with_deps(
            move |_| {
                let lock = ScrollLock::acquire();
                let keys = KeyBindings::install(on_previous, on_next, on_close);
                move || {
                    drop(keys);
                    drop(lock);
                }
            },
            (),
        );
    }

    // Cross-fade to the new photo instead of rebuilding the overlay.
    {
        let shown = shown.clone();
        let fading = fading.clone();
        let fade_ms = props.fade_ms;
        use_effect_with_deps(
            move |scene: &Scene| {
                let mut timeout = None;
                match fade_step(&shown, scene) {
                    FadeStep::Settle => {
                        if *fading {
                            fading.set(false);
                        }
                    }
                    FadeStep::FadeTo => {
                        fading.set(true);
                        let scene = scene.clone();
                        timeout = Some(Timeout::new(fade_ms, move || {
                            shown.set(scene);
                            fading.set(false);
                        }));
                    }
                }
                move || drop(timeout)
            },
            props.scene.clone(),
        );
    }

    let on_backdrop = {
        let root = root.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            let is_backdrop = match (e.target(), root.get()) {
                (Some(target), Some(node)) => JsValue::from(target) == JsValue::from(node),
                _ => false,
            };
            if is_backdrop {
                on_close.emit(());
            }
        })
    };
    let close = props.on_close.reform(|_: MouseEvent| ());
    let next = props.on_next.reform(|_: MouseEvent| ());
    let previous = props.on_previous.reform(|_: MouseEvent| ());

    let body = match &*shown {
        Scene::Lightbox(view) => {
            let opacity = if *fading { "0" } else { "1" };
            html! {
                <>
                    if view.has_navigation() {
                        <button class="lightbox-nav lightbox-prev" data-role="previous" title="Imagen anterior" onclick={previous}>
                            <i class="fas fa-chevron-left"></i>
                        </button>
                        <button class="lightbox-nav lightbox-next" data-role="next" title="Siguiente imagen" onclick={next.clone()}>
                            <i class="fas fa-chevron-right"></i>
                        </button>
                    }
                    <div class="lightbox-stage">
                        <img
                            data-role="photo"
                            src={view.photo.image_url.clone()}
                            alt={view.alt_text().to_string()}
                            style={format!("opacity: {};", opacity)}
                            onclick={next}
                        />
                        if let Some(description) = &view.photo.description {
                            <div class="lightbox-description" data-role="description">{ description.clone() }</div>
                        }
                        <div class="lightbox-counter" data-role="counter">{ view.counter_label() }</div>
                    </div>
                </>
            }
        }
        Scene::Empty { .. } => html! {
            <div class="lightbox-empty" data-role="empty">
                <i class="fas fa-images"></i>
                <h4>{ EMPTY_HEADING }</h4>
                <p>{ EMPTY_BODY }</p>
            </div>
        },
        Scene::Closed => html! {},
    };

    html! {
        <div class="lightbox-gallery" ref={root} role="dialog" aria-modal="true" onclick={on_backdrop}>
            <button class="lightbox-close" data-role="close" title="Cerrar galería" onclick={close}>
                <i class="fas fa-times"></i>
            </button>
            { body }
            <style>
                {r#"
                .lightbox-gallery {
                    position: fixed;
                    inset: 0;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    background: rgba(0, 0, 0, 0.92);
                    z-index: 2000;
                }
                .lightbox-stage {
                    text-align: center;
                }
                .lightbox-stage img {
                    max-height: 85vh;
                    max-width: 90vw;
                    cursor: pointer;
                    transition: opacity 0.15s ease;
                }
                .lightbox-close, .lightbox-nav {
                    position: absolute;
                    border: 1px solid #fff;
                    border-radius: 50%;
                    background: transparent;
                    color: #fff;
                    z-index: 10;
                }
                .lightbox-close {
                    top: 20px;
                    right: 20px;
                    width: 50px;
                    height: 50px;
                }
                .lightbox-nav {
                    top: 50%;
                    transform: translateY(-50%);
                    width: 60px;
                    height: 60px;
                }
                .lightbox-prev {
                    left: 30px;
                }
                .lightbox-next {
                    right: 30px;
                }
                .lightbox-description, .lightbox-counter {
                    display: inline-block;
                    margin-top: 0.75rem;
                    padding: 0.25rem 0.75rem;
                    border-radius: 0.375rem;
                    background: rgba(0, 0, 0, 0.6);
                    color: #fff;
                }
                .lightbox-counter {
                    display: block;
                    width: fit-content;
                    margin: 0.5rem auto 0;
                    font-size: 0.875rem;
                }
                .lightbox-empty {
                    color: #ddd;
                    text-align: center;
                }
                "#}
            </style>
        </div>
    }
}
