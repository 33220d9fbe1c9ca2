use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;

use crate::demo::{Demo, DemoError, DemoOptions, CLEAR_COLOR};
use crate::demos::{ORANGE, YELLOW};
use crate::shaders::ShaderSource;

#[rustfmt::skip]
const LOWER: [f32; 9] = [
    -0.25, -0.25, 0.0,
    0.0, 0.0, 0.0,
    0.25, -0.25, 0.0,
];

#[rustfmt::skip]
const UPPER: [f32; 9] = [
    0.25, 0.25, 0.0,
    0.0, 0.0, 0.0,
    -0.25, 0.25, 0.0,
];

/// Two triangles touching at the origin, each with its own vertex array and color.
pub struct Triangles {
    program: Program,
    triangles: [(Geometry, [f32; 4]); 2],
}

impl Triangles {
    pub fn new(options: &DemoOptions) -> Result<Self, DemoError> {
        let program = ShaderSource::load("solid", options.shader_dir.as_deref())?.build()?;

        let lower = triangle(&LOWER).build()?;
        let upper = triangle(&UPPER).build()?;

        Ok(Self {
            program,
            triangles: [(lower, ORANGE), (upper, YELLOW)],
        })
    }
}

fn triangle(data: &[f32]) -> GeometryBuilder<'_> {
    GeometryBuilder::new(data).with_attribute(VertexAttribute::Vec3)
}

impl Demo for Triangles {
    fn frame(&mut self, renderer: &mut GlRenderer, _time: f32) -> Result<(), DemoError> {
        let [r, g, b] = CLEAR_COLOR;
        renderer.clear_color(r, g, b);

        renderer.use_program(&self.program);
        for (geometry, color) in &self.triangles {
            self.program.set_vec4("ourColor", *color)?;
            renderer.draw(geometry, &self.program);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangles_meet_at_origin() {
        for data in [&LOWER, &UPPER] {
            let (_, vertices) = triangle(data).validate().unwrap();
            assert_eq!(vertices, 3);
            assert_eq!(&data[3..6], &[0.0, 0.0, 0.0]);
        }
    }
}
