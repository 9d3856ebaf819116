use super::super::{Model, Msg};
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || inner_callback()));
    })
}

/// The first file of a pick, drop or paste. The type is checked later by
/// the workflow so that a wrong type is reported rather than skipped.
pub fn first_file(file_list: &FileList) -> Option<GlooFile> {
    file_list.item(0).map(GlooFile::from)
}

pub fn render_advisory(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(advisory) = model.workflow.advisory() else {
        return html! {};
    };

    html! {
        <div class="advisory-message">
            <i class="fa-solid fa-circle-info"></i>
            <p>{ advisory.to_string() }</p>
            <button
                class="dismiss-btn"
                title="Dismiss"
                onclick={ctx.link().callback(|_| Msg::DismissAdvisory)}
            >
                <i class="fa-solid fa-times"></i>
            </button>
        </div>
    }
}
