use super::super::{Model, Msg};
use super::utils::{debounce, first_file};
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        // Reset so picking the same file again still fires `change`.
        input.set_value("");

        file.map(Msg::FileChosen)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="upload-section">
            <h3>{"Or upload your own image:"}</h3>
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
            >
                <button
                    id="upload-button"
                    class="choose-btn"
                    onclick={debounce(300, {
                        let trigger_file_input = trigger_file_input.clone();
                        move || trigger_file_input.emit(())
                    })}
                >
                    {"Choose File"}
                </button>
                <span class="file-name">
                    { model.upload_name.clone().unwrap_or_else(|| "No file chosen".to_string()) }
                </span>
            </div>

            {
                if let Some(url) = &model.upload_preview {
                    html! {
                        <img id="upload-preview" src={url.to_string()} alt="Uploaded chest X-ray" />
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

pub fn render_submit_button(model: &Model, ctx: &Context<Model>) -> Html {
    let processing = model.workflow.is_processing();
    let link = ctx.link().clone();

    html! {
        <button
            id="submit-button"
            class={classes!("submit-btn", processing.then_some("processing"))}
            disabled={processing}
            onclick={debounce(300, move || link.send_message(Msg::Submit))}
        >
            {
                if processing {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}</> }
                } else {
                    html! { <>{"Submit for Analysis"}</> }
                }
            }
        </button>
    }
}
