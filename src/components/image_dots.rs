use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ImageDotsProps {
    pub count: usize,
    pub current: usize,
    pub on_select: Callback<usize>,
}

#[function_component(ImageDots)]
pub fn image_dots(props: &ImageDotsProps) -> Html {
    if props.count < 2 {
        return html! {};
    }
    let dots = (0..props.count)
        .map(|i| {
            let cb = props.on_select.clone();
            let onclick = Callback::from(move |_| cb.emit(i));
            let bg = if i == props.current { "#e6edf3" } else { "rgba(230,237,243,0.35)" };
            html! {
                <button key={i} {onclick} aria-label={format!("Image {}", i + 1)}
                    style={format!("width:8px; height:8px; padding:0; border:none; border-radius:4px; background:{};", bg)}>
                </button>
            }
        })
        .collect::<Html>();
    html! {<div style="position:absolute; bottom:20px; left:50%; transform:translateX(-50%); display:flex; gap:8px;">
        { dots }
    </div>}
}
