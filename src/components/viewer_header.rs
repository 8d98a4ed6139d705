use crate::util::format_counter;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerHeaderProps {
    pub title: AttrValue,
    pub index: usize,
    pub count: usize,
    pub on_close: Callback<()>,
}

#[function_component(ViewerHeader)]
pub fn viewer_header(props: &ViewerHeaderProps) -> Html {
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="position:absolute; top:0; left:0; right:0; padding:12px 16px; display:flex; justify-content:space-between; align-items:center; gap:12px; background:linear-gradient(rgba(0,0,0,0.6), rgba(0,0,0,0));">
        <div style="display:flex; flex-direction:column; min-width:0;">
            <span style="font-size:16px; font-weight:600; white-space:nowrap; overflow:hidden; text-overflow:ellipsis;">{ props.title.clone() }</span>
            <span style="font-size:12px; opacity:0.75; font-variant-numeric:tabular-nums;">{ format_counter(props.index, props.count) }</span>
        </div>
        <button onclick={close_cb} aria-label="Close viewer" style="padding:4px 10px; font-size:18px;">{"✕"}</button>
    </div>}
}
