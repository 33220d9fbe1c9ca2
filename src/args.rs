use std::path::PathBuf;

use clap::Parser;

use crate::app::WindowConfig;
use crate::demo::{DemoKind, DemoOptions};
use crate::logging::LoggingConfig;

#[derive(Debug, Parser)]
pub struct Args {
    /// Tutorial step to run
    #[arg(value_enum)]
    pub demo: DemoKind,
    /// Width of the window
    #[arg(long, default_value_t = 800)]
    pub width: u32,
    /// Height of the window
    #[arg(long, default_value_t = 600)]
    pub height: u32,
    /// Directory with `<name>.vert`/`<name>.frag` files replacing the built-in shaders
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,
    /// PNG image for the textured demos (a checkerboard is used otherwise)
    #[arg(long)]
    pub texture: Option<PathBuf>,
    /// Fill polygons instead of drawing the rectangle as wireframe
    #[arg(long)]
    pub fill: bool,
    /// Disable vertical sync
    #[arg(long)]
    pub no_vsync: bool,
    /// Log filter in env_logger syntax, overrides RUST_LOG
    #[arg(long)]
    pub log: Option<String>,
}

impl Args {
    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            width: self.width,
            height: self.height,
            title: format!("Experiments - {}", self.demo.title()),
            vsync: !self.no_vsync,
        }
    }

    pub fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            shader_dir: self.shader_dir.clone(),
            texture: self.texture.clone(),
            wireframe: !self.fill,
        }
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            filter: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["experimentgl", "rectangle"]).unwrap();

        assert_eq!(args.demo, DemoKind::Rectangle);
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 600);

        let window = args.window_config();
        assert!(window.vsync);
        assert_eq!(window.title, "Experiments - Rectangle");

        let options = args.demo_options();
        assert!(options.wireframe);
        assert!(options.texture.is_none());
        assert!(args.logging_config().filter.is_none());
    }

    #[test]
    fn all_flags() {
        let args = Args::try_parse_from([
            "experimentgl",
            "textured-nearest",
            "--width",
            "1024",
            "--height",
            "768",
            "--shader-dir",
            "shaders",
            "--texture",
            "textures/texture_d.png",
            "--fill",
            "--no-vsync",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.demo, DemoKind::TexturedNearest);
        assert_eq!(args.window_config().width, 1024);
        assert!(!args.window_config().vsync);

        let options = args.demo_options();
        assert!(!options.wireframe);
        assert_eq!(options.shader_dir, Some(PathBuf::from("shaders")));
        assert_eq!(options.texture, Some(PathBuf::from("textures/texture_d.png")));
        assert_eq!(args.logging_config().filter.as_deref(), Some("debug"));
    }

    #[test]
    fn unknown_demo_is_rejected() {
        assert!(Args::try_parse_from(["experimentgl", "teapot"]).is_err());
        assert!(Args::try_parse_from(["experimentgl"]).is_err());
    }
}
