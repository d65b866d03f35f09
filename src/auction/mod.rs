pub mod events;
pub mod gallery;
pub mod model;
