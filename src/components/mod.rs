pub mod app;
pub mod image_dots;
pub mod image_viewer;
pub mod viewer_controls;
pub mod viewer_header;
