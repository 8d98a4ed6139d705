use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerControlsProps {
    pub has_prev: bool,
    pub has_next: bool,
    pub zoomed: bool,
    pub on_prev: Callback<()>,
    pub on_next: Callback<()>,
    pub on_zoom_in: Callback<()>,
    pub on_zoom_out: Callback<()>,
    pub on_reset_zoom: Callback<()>,
}

#[function_component(ViewerControls)]
pub fn viewer_controls(props: &ViewerControlsProps) -> Html {
    let prev = {
        let cb = props.on_prev.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let next = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zi = {
        let cb = props.on_zoom_in.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let zo = {
        let cb = props.on_zoom_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset = {
        let cb = props.on_reset_zoom.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let arrow_style = "position:absolute; top:50%; transform:translateY(-50%); width:44px; height:44px; border-radius:22px; border:1px solid #30363d; background:rgba(22,27,34,0.8); color:#e6edf3; font-size:20px;";
    html! {<>
        if props.has_prev {
            <button onclick={prev} aria-label="Previous image" style={format!("{} left:12px;", arrow_style)}>{"‹"}</button>
        }
        if props.has_next {
            <button onclick={next} aria-label="Next image" style={format!("{} right:12px;", arrow_style)}>{"›"}</button>
        }
        <div style="position:absolute; right:12px; bottom:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
            <button onclick={zo} disabled={!props.zoomed}> {"-"} </button>
            <button onclick={zi}> {"+"} </button>
            <span style="width:8px;"></span>
            <button onclick={reset} disabled={!props.zoomed}> {"1:1"} </button>
        </div>
    </>}
}
