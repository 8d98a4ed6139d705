use gallery_viewer::components::app::App;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("gallery viewer starting");
    yew::Renderer::<App>::new().render();
}
