use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;

use crate::animation::green_pulse;
use crate::demo::{Demo, DemoError, DemoOptions, CLEAR_COLOR};
use crate::shaders::ShaderSource;

#[rustfmt::skip]
const VERTICES: [f32; 9] = [
    -0.25, -0.25, 0.0,
    0.0, 0.0, 0.0,
    0.25, -0.25, 0.0,
];

fn builder() -> GeometryBuilder<'static> {
    GeometryBuilder::new(&VERTICES).with_attribute(VertexAttribute::Vec3)
}

/// A triangle whose green channel pulses over time through a uniform.
pub struct Uniform {
    program: Program,
    geometry: Geometry,
}

impl Uniform {
    pub fn new(options: &DemoOptions) -> Result<Self, DemoError> {
        let program = ShaderSource::load("solid", options.shader_dir.as_deref())?.build()?;
        let geometry = builder().build()?;

        Ok(Self { program, geometry })
    }
}

impl Demo for Uniform {
    fn frame(&mut self, renderer: &mut GlRenderer, time: f32) -> Result<(), DemoError> {
        let [r, g, b] = CLEAR_COLOR;
        renderer.clear_color(r, g, b);

        // uniforms apply to the bound program
        renderer.use_program(&self.program);
        self.program.set_vec4("ourColor", green_pulse(time).into())?;
        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unindexed_triangle() {
        let (layout, vertices) = builder().validate().unwrap();

        assert_eq!(layout.stride(), 3);
        assert_eq!(vertices, 3);
    }
}
