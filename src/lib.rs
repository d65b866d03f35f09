pub mod admin;
pub mod api;
pub mod auction;
pub mod bidding;
pub mod config;
pub mod deals;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod listing;
pub mod notify;
pub mod profile;
pub mod reports;
pub mod reviews;
pub mod scheduler;
pub mod search;
pub mod upload;
