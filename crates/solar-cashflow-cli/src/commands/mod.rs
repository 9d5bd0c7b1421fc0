pub mod locations;
pub mod model;
