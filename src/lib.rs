pub mod app;
pub mod common;
pub mod components;
pub mod course;
pub mod data;
pub mod routes;
pub mod view;
