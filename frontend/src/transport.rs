use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use shared::{Clock, HttpReply, ImagePayload, Transport, WorkflowError};
use std::time::Duration;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, FormData};

/// Aborts the guarded fetch when dropped. Aborting a finished fetch does
/// nothing.
struct AbortOnDrop(AbortController);

impl AbortOnDrop {
    fn new() -> Result<Self, WorkflowError> {
        AbortController::new().map(Self).map_err(js_error)
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

fn js_error(value: JsValue) -> WorkflowError {
    WorkflowError::NetworkError(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

fn net_error(err: gloo_net::Error) -> WorkflowError {
    WorkflowError::NetworkError(err.to_string())
}

/// `fetch`-backed transport.
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn fetch_sample(&self, path: &str) -> Result<Vec<u8>, WorkflowError> {
        let abort = AbortOnDrop::new()?;
        let response = Request::get(path)
            .abort_signal(Some(&abort.0.signal()))
            .send()
            .await
            .map_err(net_error)?;

        if !response.ok() {
            return Err(WorkflowError::NetworkError(format!(
                "sample asset {} returned {}",
                path,
                response.status()
            )));
        }
        response.binary().await.map_err(net_error)
    }

    async fn post_image(
        &self,
        endpoint: &str,
        image: ImagePayload,
    ) -> Result<HttpReply, WorkflowError> {
        let abort = AbortOnDrop::new()?;
        let form = multipart_body(&image)?;

        let response = Request::post(endpoint)
            .abort_signal(Some(&abort.0.signal()))
            .body(form)
            .map_err(net_error)?
            .send()
            .await
            .map_err(net_error)?;

        let status = response.status();
        let body = response.text().await.map_err(net_error)?;
        Ok(HttpReply { status, body })
    }
}

fn multipart_body(image: &ImagePayload) -> Result<FormData, WorkflowError> {
    let parts = Array::of1(&Uint8Array::from(image.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&image.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;

    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(image.field_name, &blob, &image.filename)
        .map_err(js_error)?;
    Ok(form)
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
