pub mod cost_model;
pub mod currency;
pub mod diagnostic;
pub mod error;
pub mod quiz;
pub mod roi;
pub mod validation;
