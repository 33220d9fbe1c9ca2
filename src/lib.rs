pub mod animation;
pub mod app;
pub mod args;
pub mod demo;
pub mod demos;
pub mod image;
pub mod logging;
pub mod shaders;
