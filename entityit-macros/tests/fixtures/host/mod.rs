pub mod address;
pub mod model;
