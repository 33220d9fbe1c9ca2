use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;

use gl_wrapper::geometry::GBError;
use gl_wrapper::program::ProgramError;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::TextureError;

use crate::demos::{Rectangle, Textured, Triangles, Uniform, VertexColors};
use crate::image::ImageError;
use crate::shaders::ShaderSourceError;

/// Background shared by all demos.
pub const CLEAR_COLOR: [f32; 3] = [0.2, 0.3, 0.3];

/// One tutorial step. GL resources are created when the demo is built and released on drop.
pub trait Demo {
    /// Renders a frame, `time` is in seconds since the render loop started.
    fn frame(&mut self, renderer: &mut GlRenderer, time: f32) -> Result<(), DemoError>;
}

#[derive(Clone, Debug, Default)]
pub struct DemoOptions {
    pub shader_dir: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    pub wireframe: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    Rectangle,
    Triangles,
    Uniform,
    VertexColors,
    Textured,
    TexturedNearest,
}

impl DemoKind {
    pub fn title(&self) -> &'static str {
        match self {
            DemoKind::Rectangle => "Rectangle",
            DemoKind::Triangles => "Triangles",
            DemoKind::Uniform => "Uniform color",
            DemoKind::VertexColors => "Vertex colors",
            DemoKind::Textured => "Textured",
            DemoKind::TexturedNearest => "Textured (nearest)",
        }
    }

    /// Creates the demo's GL resources. Needs a current GL context.
    pub fn build(&self, options: &DemoOptions) -> Result<Box<dyn Demo>, DemoError> {
        let demo: Box<dyn Demo> = match self {
            DemoKind::Rectangle => Box::new(Rectangle::new(options)?),
            DemoKind::Triangles => Box::new(Triangles::new(options)?),
            DemoKind::Uniform => Box::new(Uniform::new(options)?),
            DemoKind::VertexColors => Box::new(VertexColors::new(options)?),
            DemoKind::Textured => Box::new(Textured::new(options, false)?),
            DemoKind::TexturedNearest => Box::new(Textured::new(options, true)?),
        };

        Ok(demo)
    }
}

#[derive(Debug, Error)]
pub enum DemoError {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GBError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    ShaderSource(#[from] ShaderSourceError),
    #[error(transparent)]
    Image(#[from] ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_names() {
        let names: Vec<String> = DemoKind::value_variants()
            .iter()
            .filter_map(|k| k.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();

        assert_eq!(
            names,
            [
                "rectangle",
                "triangles",
                "uniform",
                "vertex-colors",
                "textured",
                "textured-nearest"
            ]
        );
        assert_eq!(
            DemoKind::from_str("vertex-colors", false),
            Ok(DemoKind::VertexColors)
        );
    }

    #[test]
    fn titles() {
        assert_eq!(DemoKind::Rectangle.title(), "Rectangle");
        assert_eq!(DemoKind::Uniform.title(), "Uniform color");
        assert_eq!(DemoKind::TexturedNearest.title(), "Textured (nearest)");

        for kind in DemoKind::value_variants() {
            assert!(!kind.title().is_empty());
        }
    }
}
