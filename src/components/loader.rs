use yew::prelude::*;

use crate::components::scroll_lock::ScrollLock;

#[function_component(Loader)]
pub fn loader() -> Html {
    use_effect_with_deps(
        |_| {
            let lock = ScrollLock::acquire();
            move || drop(lock)
        },
        (),
    );

    html! {
        <div class="temp-loader" style="position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background: rgba(0, 0, 0, 0.7); z-index: 1500;">
            <div class="text-center text-white">
                <div class="spinner-border text-light mb-3" role="status" style="width: 3rem; height: 3rem;">
                    <span class="visually-hidden">{"Cargando..."}</span>
                </div>
                <p class="mb-0 fw-semibold">{"Cargando galería..."}</p>
                <small class="text-white-50">{"Preparando las imágenes"}</small>
            </div>
        </div>
    }
}
