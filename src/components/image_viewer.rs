use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, KeyboardEvent, PointerEvent, WheelEvent};
use yew::prelude::*;

use crate::config::GestureConfig;
use crate::model::{ItemNavigation, NavigationIntent, Point};
use crate::state::{GestureEngine, NavigationOutcome};
use crate::util::{now_ms, preload_images, vibrate};

use super::{image_dots::ImageDots, viewer_controls::ViewerControls, viewer_header::ViewerHeader};

#[derive(Properties, PartialEq, Clone)]
pub struct ImageViewerProps {
    /// Image URLs for one product, in display order. Expected non-empty.
    pub images: Vec<AttrValue>,
    #[prop_or(0)]
    pub initial_index: usize,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub on_next_item: Option<Callback<()>>,
    #[prop_or_default]
    pub on_prev_item: Option<Callback<()>>,
}

impl ImageViewerProps {
    fn item_navigation(&self) -> ItemNavigation {
        ItemNavigation {
            has_next_item: self.on_next_item.is_some(),
            has_prev_item: self.on_prev_item.is_some(),
        }
    }
}

/// Carries out the side effects the engine asked for. Call with no engine borrow held.
fn apply_outcome(outcome: &NavigationOutcome, cfg: &GestureConfig, props: &ImageViewerProps) {
    if let Some(pulse) = outcome.haptic {
        vibrate(cfg, pulse);
    }
    if !outcome.preload.is_empty() {
        preload_images(&props.images, &outcome.preload);
    }
    match outcome.intent {
        NavigationIntent::NextItem => {
            if let Some(cb) = &props.on_next_item {
                cb.emit(());
            }
        }
        NavigationIntent::PrevItem => {
            if let Some(cb) = &props.on_prev_item {
                cb.emit(());
            }
        }
        _ => {}
    }
}

fn local_point(stage: &HtmlElement, client_x: i32, client_y: i32) -> Point {
    let rect = stage.get_bounding_client_rect();
    Point::new(client_x as f64 - rect.left(), client_y as f64 - rect.top())
}

fn measure(stage: &HtmlElement, engine: &RefCell<GestureEngine>) {
    let rect = stage.get_bounding_client_rect();
    engine.borrow_mut().set_viewport(rect.width(), rect.height());
}

#[function_component(ImageViewer)]
pub fn image_viewer(props: &ImageViewerProps) -> Html {
    let stage_ref = use_node_ref();
    let engine = use_mut_ref(|| {
        GestureEngine::new(
            GestureConfig::load_stored(),
            props.images.len(),
            props.initial_index,
        )
    });
    let props_ref = use_mut_ref(|| props.clone());
    let kick_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let force = use_force_update();

    // Keep the latest props for the DOM listeners
    {
        let props_ref = props_ref.clone();
        let engine = engine.clone();
        use_effect_with(props.clone(), move |p| {
            *props_ref.borrow_mut() = p.clone();
            engine.borrow_mut().set_item_navigation(p.item_navigation());
            || ()
        });
    }
    // New image list or requested index: reset and preload around it
    {
        let engine = engine.clone();
        let force = force.clone();
        use_effect_with(
            (props.images.clone(), props.initial_index),
            move |(images, index)| {
                let preload = {
                    let mut eng = engine.borrow_mut();
                    eng.set_item_count(images.len());
                    eng.go_to(*index)
                };
                log::debug!("viewer showing {} images from {}", images.len(), index);
                preload_images(images, &preload);
                force.force_update();
                || ()
            },
        );
    }
    // Mount: pointer, wheel, key and resize listeners plus the settle frame loop
    {
        let stage_ref = stage_ref.clone();
        let engine = engine.clone();
        let props_ref = props_ref.clone();
        let kick_ref = kick_ref.clone();
        let force = force.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("no window");
            let stage = stage_ref
                .cast::<HtmlElement>()
                .expect("viewer stage not mounted");
            measure(&stage, &engine);

            // Frame loop, only scheduled while a settle animation runs
            let running = Rc::new(Cell::new(false));
            let raf_id = Rc::new(Cell::new(None::<i32>));
            let frame_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                Rc::new(RefCell::new(None));
            {
                let frame_cell_inner = frame_cell.clone();
                let running = running.clone();
                let raf_id = raf_id.clone();
                let engine = engine.clone();
                let force = force.clone();
                let window_loop = window.clone();
                *frame_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let still = engine.borrow().is_animating(now_ms());
                    force.force_update();
                    if !still {
                        running.set(false);
                        raf_id.set(None);
                        return;
                    }
                    if let Some(cb) = frame_cell_inner.borrow().as_ref() {
                        if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref())
                        {
                            raf_id.set(Some(id));
                        }
                    }
                })
                    as Box<dyn FnMut()>));
            }
            let kick: Rc<dyn Fn()> = {
                let running = running.clone();
                let raf_id = raf_id.clone();
                let frame_cell = frame_cell.clone();
                let window = window.clone();
                Rc::new(move || {
                    if running.get() {
                        return;
                    }
                    if let Some(cb) = frame_cell.borrow().as_ref() {
                        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            running.set(true);
                            raf_id.set(Some(id));
                        }
                    }
                })
            };
            *kick_ref.borrow_mut() = Some(kick.clone());

            let pointerdown_cb = {
                let stage_pc = stage.clone();
                let engine = engine.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    if e.pointer_type() == "mouse" && e.button() != 0 {
                        return;
                    }
                    measure(&stage_pc, &engine);
                    let p = local_point(&stage_pc, e.client_x(), e.client_y());
                    engine.borrow_mut().pointer_down(e.pointer_id(), p);
                    let _ = stage_pc.set_pointer_capture(e.pointer_id());
                    e.prevent_default();
                    force.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            stage
                .add_event_listener_with_callback(
                    "pointerdown",
                    pointerdown_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let pointermove_cb = {
                let stage_pc = stage.clone();
                let engine = engine.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let p = local_point(&stage_pc, e.client_x(), e.client_y());
                    let changed = engine.borrow_mut().pointer_move(e.pointer_id(), p).is_some();
                    if engine.borrow().is_gesturing() {
                        e.prevent_default();
                    }
                    if changed {
                        force.force_update();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            stage
                .add_event_listener_with_callback(
                    "pointermove",
                    pointermove_cb.as_ref().unchecked_ref(),
                )
                .ok();
            // Shared by pointerup and pointercancel
            let pointerup_cb = {
                let engine = engine.clone();
                let props_ref = props_ref.clone();
                let kick = kick.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |e: PointerEvent| {
                    let now = now_ms();
                    let outcome = engine.borrow_mut().pointer_up(e.pointer_id(), now);
                    if let Some(outcome) = outcome {
                        let cfg = engine.borrow().config().clone();
                        let props = props_ref.borrow().clone();
                        apply_outcome(&outcome, &cfg, &props);
                        if engine.borrow().is_animating(now) {
                            kick();
                        }
                    }
                    force.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            stage
                .add_event_listener_with_callback("pointerup", pointerup_cb.as_ref().unchecked_ref())
                .ok();
            stage
                .add_event_listener_with_callback(
                    "pointercancel",
                    pointerup_cb.as_ref().unchecked_ref(),
                )
                .ok();
            let wheel_cb = {
                let stage_wc = stage.clone();
                let engine = engine.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |e: WheelEvent| {
                    e.prevent_default();
                    let p = local_point(&stage_wc, e.client_x(), e.client_y());
                    engine.borrow_mut().wheel(e.delta_y(), p);
                    force.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            stage
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .ok();
            let keydown_cb = {
                let engine = engine.clone();
                let props_ref = props_ref.clone();
                let kick = kick.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    let now = now_ms();
                    let outcome = {
                        let mut eng = engine.borrow_mut();
                        let step = eng.config().keyboard_zoom_step;
                        match e.key().as_str() {
                            "ArrowRight" => Some(eng.step(true)),
                            "ArrowLeft" => Some(eng.step(false)),
                            "ArrowDown" => Some(eng.request_item(true)),
                            "ArrowUp" => Some(eng.request_item(false)),
                            "+" | "=" => {
                                eng.zoom_by(step, now);
                                None
                            }
                            "-" | "_" => {
                                eng.zoom_by(1.0 / step, now);
                                None
                            }
                            "0" => {
                                eng.reset_zoom(now);
                                None
                            }
                            "Escape" => {
                                drop(eng);
                                e.prevent_default();
                                let on_close = props_ref.borrow().on_close.clone();
                                on_close.emit(());
                                return;
                            }
                            _ => return,
                        }
                    };
                    e.prevent_default();
                    if let Some(outcome) = outcome {
                        let cfg = engine.borrow().config().clone();
                        let props = props_ref.borrow().clone();
                        apply_outcome(&outcome, &cfg, &props);
                    }
                    if engine.borrow().is_animating(now) {
                        kick();
                    }
                    force.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();
            let resize_cb = {
                let stage_rc = stage.clone();
                let engine = engine.clone();
                let force = force.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    measure(&stage_rc, &engine);
                    force.force_update();
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .ok();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = stage.remove_event_listener_with_callback(
                    "pointerdown",
                    pointerdown_cb.as_ref().unchecked_ref(),
                );
                let _ = stage.remove_event_listener_with_callback(
                    "pointermove",
                    pointermove_cb.as_ref().unchecked_ref(),
                );
                let _ = stage.remove_event_listener_with_callback(
                    "pointerup",
                    pointerup_cb.as_ref().unchecked_ref(),
                );
                let _ = stage.remove_event_listener_with_callback(
                    "pointercancel",
                    pointerup_cb.as_ref().unchecked_ref(),
                );
                let _ = stage
                    .remove_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref());
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = raf_id.get() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                *kick_ref.borrow_mut() = None;
                // breaks the frame closure's reference to itself
                frame_cell.borrow_mut().take();
                let _keep_alive = (
                    &pointerdown_cb,
                    &pointermove_cb,
                    &pointerup_cb,
                    &wheel_cb,
                    &keydown_cb,
                    &resize_cb,
                );
            }
        });
    }

    // Button callbacks route through the same engine operations as gestures
    let run = {
        let engine = engine.clone();
        let props_ref = props_ref.clone();
        let kick_ref = kick_ref.clone();
        let force = force.clone();
        Rc::new(move |f: &dyn Fn(&mut GestureEngine, f64) -> Option<NavigationOutcome>| {
            let now = now_ms();
            let outcome = f(&mut engine.borrow_mut(), now);
            if let Some(outcome) = outcome {
                let cfg = engine.borrow().config().clone();
                let props = props_ref.borrow().clone();
                apply_outcome(&outcome, &cfg, &props);
            }
            if engine.borrow().is_animating(now) {
                if let Some(kick) = &*kick_ref.borrow() {
                    kick();
                }
            }
            force.force_update();
        })
    };
    let on_prev = {
        let run = run.clone();
        Callback::from(move |_| run(&|eng: &mut GestureEngine, _| Some(eng.step(false))))
    };
    let on_next = {
        let run = run.clone();
        Callback::from(move |_| run(&|eng: &mut GestureEngine, _| Some(eng.step(true))))
    };
    let on_zoom_in = {
        let run = run.clone();
        Callback::from(move |_| {
            run(&|eng: &mut GestureEngine, now: f64| {
                let step = eng.config().keyboard_zoom_step;
                eng.zoom_by(step, now);
                None
            })
        })
    };
    let on_zoom_out = {
        let run = run.clone();
        Callback::from(move |_| {
            run(&|eng: &mut GestureEngine, now: f64| {
                let step = eng.config().keyboard_zoom_step;
                eng.zoom_by(1.0 / step, now);
                None
            })
        })
    };
    let on_reset_zoom = {
        let run = run.clone();
        Callback::from(move |_| {
            run(&|eng: &mut GestureEngine, now: f64| {
                eng.reset_zoom(now);
                None
            })
        })
    };
    let on_select = {
        let run = run.clone();
        let images = props.images.clone();
        Callback::from(move |i: usize| {
            let images = images.clone();
            run(&move |eng: &mut GestureEngine, _| {
                let preload = eng.go_to(i);
                preload_images(&images, &preload);
                None
            })
        })
    };

    let (shown, position, zoomed, gesturing) = {
        let mut eng = engine.borrow_mut();
        let shown = eng.displayed(now_ms());
        (shown, eng.position(), eng.transform().is_zoomed(), eng.is_gesturing())
    };

    let slides = [-1_i64, 0, 1]
        .iter()
        .filter_map(|&k| {
            let idx = position.current_index as i64 + k;
            if idx < 0 || idx as usize >= props.images.len() {
                return None;
            }
            let src = props.images[idx as usize].clone();
            let slide_style = format!(
                "position:absolute; inset:0; display:flex; align-items:center; justify-content:center; transform:translate3d(calc({}% + {:.2}px), 0, 0);",
                k * 100,
                shown.swipe_offset
            );
            let img_style = if k == 0 {
                format!(
                    "max-width:100%; max-height:100%; transform:{}; transform-origin:center center; will-change:transform;",
                    shown.to_css()
                )
            } else {
                "max-width:100%; max-height:100%;".to_string()
            };
            let alt = format!("{} ({} of {})", props.title, idx + 1, props.images.len());
            Some(html! {
                <div key={idx.to_string()} style={slide_style}>
                    <img {src} {alt} draggable="false" style={img_style} />
                </div>
            })
        })
        .collect::<Html>();

    let cursor = if gesturing {
        "grabbing"
    } else if zoomed {
        "grab"
    } else {
        "default"
    };

    html! {
        <div style="position:fixed; inset:0; background:#0d1117; color:#e6edf3; z-index:100; overflow:hidden;">
            <div ref={stage_ref}
                style={format!("position:absolute; inset:0; touch-action:none; user-select:none; cursor:{};", cursor)}>
                { slides }
            </div>
            <ViewerHeader
                title={props.title.clone()}
                index={position.current_index}
                count={position.item_count}
                on_close={props.on_close.clone()}
            />
            <ViewerControls
                has_prev={position.has_prev}
                has_next={position.has_next}
                {zoomed}
                {on_prev}
                {on_next}
                {on_zoom_in}
                {on_zoom_out}
                {on_reset_zoom}
            />
            <ImageDots count={position.item_count} current={position.current_index} {on_select} />
        </div>
    }
}
