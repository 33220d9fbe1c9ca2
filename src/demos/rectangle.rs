use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::{GlRenderer, PolygonMode};

use crate::demo::{Demo, DemoError, DemoOptions, CLEAR_COLOR};
use crate::demos::ORANGE;
use crate::shaders::ShaderSource;

#[rustfmt::skip]
const VERTICES: [f32; 12] = [
    0.5, 0.5, 0.0,
    0.5, -0.5, 0.0,
    -0.5, -0.5, 0.0,
    -0.5, 0.5, 0.0,
];

#[rustfmt::skip]
const INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Two indexed triangles sharing a diagonal.
pub struct Rectangle {
    program: Program,
    geometry: Geometry,
    mode: PolygonMode,
}

impl Rectangle {
    pub fn new(options: &DemoOptions) -> Result<Self, DemoError> {
        let program = ShaderSource::load("solid", options.shader_dir.as_deref())?.build()?;
        let geometry = builder().build()?;

        let mode = if options.wireframe {
            PolygonMode::Line
        } else {
            PolygonMode::Fill
        };

        Ok(Self {
            program,
            geometry,
            mode,
        })
    }
}

fn builder() -> GeometryBuilder<'static> {
    GeometryBuilder::new(&VERTICES)
        .with_attribute(VertexAttribute::Vec3)
        .with_indices(&INDICES)
}

impl Demo for Rectangle {
    fn frame(&mut self, renderer: &mut GlRenderer, _time: f32) -> Result<(), DemoError> {
        let [r, g, b] = CLEAR_COLOR;
        renderer.clear_color(r, g, b);
        renderer.set_polygon_mode(self.mode);

        renderer.use_program(&self.program);
        self.program.set_vec4("ourColor", ORANGE)?;
        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_corners_six_indices() {
        let (_, vertices) = builder().validate().unwrap();
        assert_eq!(vertices, 4);
        assert_eq!(INDICES.len(), 6);
    }
}
