pub mod commands;
pub mod rules;
