pub mod config;
pub mod misc;
pub mod model;
pub mod service;
pub mod view;
