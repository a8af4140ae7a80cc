pub mod header;
pub mod movie_form;
pub mod movie_gallery;
