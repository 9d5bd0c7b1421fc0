pub mod location;
pub mod parameters;
pub mod session;
