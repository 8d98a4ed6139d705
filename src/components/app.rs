use super::image_viewer::ImageViewer;
use yew::prelude::*;

const LAST_PRODUCT_KEY: &str = "gv_last_product";

#[derive(Clone, PartialEq)]
struct Product {
    title: AttrValue,
    images: Vec<AttrValue>,
}

fn product(title: &'static str, seed: &'static str, count: usize) -> Product {
    Product {
        title: AttrValue::Static(title),
        images: (0..count)
            .map(|i| AttrValue::from(format!("https://picsum.photos/seed/{seed}{i}/1200/900")))
            .collect(),
    }
}

fn catalog() -> Vec<Product> {
    vec![
        product("Canvas Backpack", "pack", 5),
        product("Trail Runner", "shoe", 4),
        product("Desk Lamp", "lamp", 3),
        product("Ceramic Mug", "mug", 1),
    ]
}

fn load_last_product(len: usize) -> usize {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .and_then(|store| store.get_item(LAST_PRODUCT_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str::<usize>(&raw).ok())
        .filter(|&i| i < len)
        .unwrap_or(0)
}

fn store_last_product(index: usize) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(raw) = serde_json::to_string(&index) {
                let _ = store.set_item(LAST_PRODUCT_KEY, &raw);
            }
        }
    }
}

/// Demo host: a product grid that opens the full-screen viewer.
#[function_component(App)]
pub fn app() -> Html {
    let products = use_memo((), |_| catalog());
    let current = use_state(|| load_last_product(products.len()));
    let open = use_state(|| None::<usize>);

    {
        use_effect_with(*current, move |index| {
            store_last_product(*index);
            || ()
        });
    }

    let viewer = (*open).map(|start| {
        let item = &products[*current];
        let on_close = {
            let open = open.clone();
            Callback::from(move |_| open.set(None))
        };
        // Switching product always opens it at its first image
        let on_next_item = (*current + 1 < products.len()).then(|| {
            let current = current.clone();
            let open = open.clone();
            let next = *current + 1;
            Callback::from(move |_| {
                log::info!("viewer moved to product {}", next);
                current.set(next);
                open.set(Some(0));
            })
        });
        let on_prev_item = (*current > 0).then(|| {
            let current = current.clone();
            let open = open.clone();
            let prev = *current - 1;
            Callback::from(move |_| {
                log::info!("viewer moved to product {}", prev);
                current.set(prev);
                open.set(Some(0));
            })
        });
        html! {
            <ImageViewer
                images={item.images.clone()}
                initial_index={start}
                title={item.title.clone()}
                {on_close}
                {on_next_item}
                {on_prev_item}
            />
        }
    });

    let cards = products
        .iter()
        .enumerate()
        .map(|(pi, p)| {
            let thumbs = p
                .images
                .iter()
                .enumerate()
                .map(|(ii, src)| {
                    let onclick = {
                        let current = current.clone();
                        let open = open.clone();
                        Callback::from(move |_| {
                            current.set(pi);
                            open.set(Some(ii));
                        })
                    };
                    html! {
                        <img key={ii} src={src.clone()} alt={p.title.clone()} {onclick}
                            style="width:96px; height:72px; object-fit:cover; border-radius:4px; cursor:pointer;" />
                    }
                })
                .collect::<Html>();
            html! {
                <div key={pi} style="background:#161b22; border:1px solid #30363d; border-radius:8px; padding:12px; margin-bottom:12px;">
                    <div style="font-weight:600; margin-bottom:8px;">
                        { p.title.clone() }
                        <span style="opacity:0.6; font-weight:400; margin-left:8px;">{ format!("{} photos", p.images.len()) }</span>
                    </div>
                    <div style="display:flex; gap:8px; flex-wrap:wrap;">{ thumbs }</div>
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#e6edf3; font-family:sans-serif; padding:16px;">
            <h1 style="font-size:20px; margin:0 0 16px 0;">{"Gallery"}</h1>
            { cards }
            { for viewer }
        </div>
    }
}
