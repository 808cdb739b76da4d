//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `prediction_form`: The health risk form, its button and result

mod field_renderer;
mod prediction_form;

pub use prediction_form::draw_prediction_form;
