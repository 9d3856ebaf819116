use super::super::Model;
use shared::{DisplayState, ImageSource, ResultView};
use yew::prelude::*;

pub fn render_outcome(model: &Model) -> Html {
    match model.workflow.display() {
        DisplayState::Idle => html! {},
        DisplayState::Processing => html! {
            <p class="processing-message">
                <i class="fa-solid fa-spinner fa-spin"></i>{" Processing..."}
            </p>
        },
        DisplayState::Error(message) => html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
        },
        DisplayState::Result(view) => html! {
            <>
                { render_result_details(&view) }
                { render_verdict(model, &view) }
            </>
        },
    }
}

fn render_result_details(view: &ResultView) -> Html {
    html! {
        <div class="results-container">
            <h3>{"API Result:"}</h3>
            <p><strong>{"Prediction: "}</strong>{ &view.predicted_class }</p>
            <div class="confidence-meter">
                <div class="meter-label">{"Confidence:"}</div>
                <div class="meter">
                    <div class="meter-fill" style={format!("width: {}%", view.confidence * 100.0)}></div>
                </div>
                <div class="meter-value">{ &view.confidence_text }</div>
            </div>
            <div class="result-bars">
                { for view.probabilities.iter().map(|row| html! {
                    <div class="result-item" key={row.label.clone()}>
                        <div class="result-label">{ format!("{} Probability:", row.label) }</div>
                        <div class="result-bar-container">
                            <div class="result-bar" style={format!("width: {}%", row.value * 100.0)}></div>
                        </div>
                        <div class="result-value">{ &row.percentage }</div>
                    </div>
                })}
            </div>
        </div>
    }
}

fn render_verdict(model: &Model, view: &ResultView) -> Html {
    let image_src = match model.workflow.active_source() {
        Some(ImageSource::Sample(index)) => {
            Some(model.workflow.controller().config().sample_path(*index))
        }
        Some(ImageSource::Upload(_)) => model.upload_preview.as_ref().map(|url| url.to_string()),
        None => None,
    };

    html! {
        <div class="verdict">
            <h3>{"AI verdict:"}</h3>
            {
                match image_src {
                    Some(src) => html! {
                        <img class="verdict-image" src={src} alt="Selected or uploaded chest X-ray" />
                    },
                    None => html! {},
                }
            }
            <div class="verdict-card">
                <div class="verdict-confidence">{ &view.confidence_text }</div>
                <div>{ &view.predicted_class }</div>
            </div>
        </div>
    }
}
