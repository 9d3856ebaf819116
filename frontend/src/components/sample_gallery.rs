use super::super::{Model, Msg};
use shared::{ImageSource, SampleIndex};
use yew::prelude::*;

pub fn render_sample_gallery(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div id="sample-gallery">
            { for SampleIndex::all().map(|index| render_sample_item(model, ctx, index)) }
        </div>
    }
}

fn render_sample_item(model: &Model, ctx: &Context<Model>, index: SampleIndex) -> Html {
    let is_selected = model.workflow.active_source() == Some(&ImageSource::Sample(index));
    let src = model.workflow.controller().config().sample_path(index);

    html! {
        <div
            class={classes!("sample-item", is_selected.then_some("selected"))}
            key={index.get().to_string()}
            onclick={ctx.link().callback(move |_| Msg::SelectSample(index))}
            title={format!("Use sample X-ray {}", index)}
        >
            <img src={src} alt={format!("Chest X-ray {}", index)} />
        </div>
    }
}
