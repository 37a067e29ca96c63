pub mod handle_list;
pub mod handle_serve;
pub mod handle_upload;

pub use handle_list::list_images_handler;
pub use handle_serve::serve_upload_handler;
pub use handle_upload::upload_image_handler;
