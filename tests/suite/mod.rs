mod config;
mod history;
mod validate;
