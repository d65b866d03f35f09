pub mod pagination;
pub mod seller;
pub mod view;
