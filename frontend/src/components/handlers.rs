use super::super::{Model, Msg};
use super::utils::first_file;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{SampleIndex, UploadedFile};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub fn handle_select_sample(model: &mut Model, index: SampleIndex) -> bool {
    model.workflow.select_sample(index);
    model.upload_preview = None;
    model.upload_name = None;
    true
}

/// Reads the file off the main path; the bytes come back as `FileLoaded`.
pub fn handle_file_chosen(ctx: &Context<Model>, file: GlooFile) -> bool {
    let link = ctx.link().clone();
    spawn_local(async move {
        match gloo_file::futures::read_as_bytes(&file).await {
            Ok(bytes) => link.send_message(Msg::FileLoaded(file, bytes)),
            Err(e) => link.send_message(Msg::FileReadFailed(e.to_string())),
        }
    });
    false
}

pub fn handle_file_loaded(model: &mut Model, file: GlooFile, bytes: Vec<u8>) -> bool {
    let upload = UploadedFile {
        name: file.name(),
        byte_size: file.size(),
        mime_type: file.raw_mime_type(),
        data: bytes,
    };

    if model.workflow.select_upload(upload).is_ok() {
        model.upload_name = Some(file.name());
        model.upload_preview = Some(ObjectUrl::from(file));
    }
    true
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.workflow.submit() {
        Ok(submission) => {
            let link = ctx.link().clone();
            spawn_local(async move {
                let completion = submission.await;
                link.send_message(Msg::SubmissionFinished(completion));
            });
        }
        Err(kind) => log::debug!("Submit not started: {}", kind.as_ref()),
    }
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .as_ref()
        .and_then(first_file)
    {
        ctx.link().send_message(Msg::FileChosen(file));
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(file) = event
        .clipboard_data()
        .and_then(|data_transfer| data_transfer.files())
        .as_ref()
        .and_then(first_file)
    {
        event.prevent_default();
        ctx.link().send_message(Msg::FileChosen(file));
    }
    false
}
