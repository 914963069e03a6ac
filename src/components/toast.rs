use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::gallery::presenter::{Notice, Notifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Push(Notice),
    Dismiss(u64),
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut queue = (*self).clone();
        match action {
            ToastAction::Push(notice) => {
                queue.next_id += 1;
                let id = queue.next_id;
                queue.toasts.push(Toast { id, notice });
            }
            ToastAction::Dismiss(id) => {
                queue.toasts.retain(|toast| toast.id != id);
            }
        }
        Rc::new(queue)
    }
}

/// Routes controller notices into the toast queue.
pub struct ToastNotifier {
    dispatcher: UseReducerDispatcher<ToastQueue>,
}

impl ToastNotifier {
    pub fn new(dispatcher: UseReducerDispatcher<ToastQueue>) -> Self {
        Self { dispatcher }
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, notice: Notice) {
        self.dispatcher.dispatch(ToastAction::Push(notice));
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    toast_ms: u32,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        let toast_ms = props.toast_ms;
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(toast_ms, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    let id = props.toast.id;
    let dismiss = props.on_dismiss.reform(move |_: MouseEvent| id);
    html! {
        <div class={classes!("toast", "show", "text-white", "border-0", props.toast.notice.kind.css_class())}
             role="alert" aria-live="assertive" aria-atomic="true">
            <div class="d-flex">
                <div class="toast-body">{ props.toast.notice.message.clone() }</div>
                <button type="button" class="btn-close btn-close-white me-2 m-auto" aria-label="Close" onclick={dismiss}></button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub toast_ms: u32,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-container position-fixed top-0 end-0 p-3" style="z-index: 2100;">
            { for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id.to_string()}
                    toast={toast.clone()}
                    toast_ms={props.toast_ms}
                    on_dismiss={props.on_dismiss.clone()}
                />
            }) }
        </div>
    }
}
