use yew::prelude::*;

const INFO_CARDS: [&str; 3] = [
    "PNEUMONIA",
    "Normal Alveoli VS Pneumonia",
    "Affects the Body",
];

pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1>{"Pneumonia Classification"}</h1>
            <div class="info-cards">
                { for INFO_CARDS.iter().enumerate().map(|(i, title)| html! {
                    <div class="info-card" key={title.to_string()}>
                        <h2>{ *title }</h2>
                        <img src={format!("/images/image{}.png", i + 1)} alt={*title} />
                    </div>
                })}
            </div>
            <section class="description">
                <h2>{"Description"}</h2>
                <p>
                    {"This project uses deep learning to automatically classify chest X-ray images \
                      into different stages of pneumonia. Convolutional neural networks are trained \
                      on large datasets of chest X-ray images to detect and classify the severity of \
                      pneumonia, aiding in quick and accurate diagnosis."}
                </p>
                <h2>{"Tools & Technologies"}</h2>
                <p>{"Deep Learning, PyTorch, Keras, TensorFlow"}</p>
            </section>
        </header>
    }
}
