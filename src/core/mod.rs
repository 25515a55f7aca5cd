pub mod form;
pub mod history;
pub mod photo;
pub mod submit;
