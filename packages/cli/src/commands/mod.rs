pub mod build;
pub mod components;
pub mod init;
pub mod render;

pub use build::{build, BuildArgs};
pub use components::{components, ComponentsArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
