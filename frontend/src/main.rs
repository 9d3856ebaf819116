mod components;
mod transport;

use components::handlers;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ClientConfig, Completion, SampleIndex, Workflow};
use transport::{BrowserClock, FetchTransport};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub enum Msg {
    // Selection
    SelectSample(SampleIndex),
    FileChosen(GlooFile),
    FileLoaded(GlooFile, Vec<u8>),
    FileReadFailed(String),

    // Submission
    Submit,
    SubmissionFinished(Completion),

    // UI states
    DismissAdvisory,
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct Model {
    workflow: Workflow<FetchTransport, BrowserClock>,
    upload_preview: Option<ObjectUrl>,
    upload_name: Option<String>,
    is_dragging: bool,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = ClientConfig::from_override(option_env!("CLASSIFIER_API_URL"));
        log::info!("Classification endpoint: {}", config.endpoint);

        let mut model = Self {
            workflow: Workflow::new(config, FetchTransport, BrowserClock),
            upload_preview: None,
            upload_name: None,
            is_dragging: false,
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SelectSample(index) => handlers::handle_select_sample(self, index),
            Msg::FileChosen(file) => handlers::handle_file_chosen(ctx, file),
            Msg::FileLoaded(file, bytes) => handlers::handle_file_loaded(self, file, bytes),
            Msg::FileReadFailed(reason) => {
                log::error!("Could not read the chosen file: {}", reason);
                false
            }

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::SubmissionFinished(completion) => self.workflow.complete(completion),

            Msg::DismissAdvisory => {
                self.workflow.dismiss_advisory();
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { components::header::render_header() }

                <main class="main-content">
                    <section class="analysis-panel">
                        <h2>{"Choose image:"}</h2>
                        { components::sample_gallery::render_sample_gallery(self, ctx) }
                        { components::upload_section::render_upload_section(self, ctx) }
                        { components::upload_section::render_submit_button(self, ctx) }
                        { components::utils::render_advisory(self, ctx) }
                        { components::results::render_outcome(self) }
                    </section>
                </main>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
