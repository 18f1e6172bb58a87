pub mod diagnostic;
pub mod file_formats;
pub mod form;
pub mod roi;
