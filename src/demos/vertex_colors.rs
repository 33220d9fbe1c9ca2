use gl_wrapper::geometry::{BufferUsage, Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;

use crate::animation::corner_colors;
use crate::demo::{Demo, DemoError, DemoOptions, CLEAR_COLOR};
use crate::shaders::ShaderSource;

/// Position and color of the three vertices at time `t`. The bottom vertex stays black.
fn vertices(t: f32) -> [f32; 18] {
    let [left, right] = corner_colors(t);

    #[rustfmt::skip]
    let data = [
        -0.75, 0.75, 0.0, left.x, left.y, left.z,
        0.0, -0.75, 0.0, 0.0, 0.0, 0.0,
        0.75, 0.75, 0.0, right.x, right.y, right.z,
    ];

    data
}

fn builder(data: &[f32]) -> GeometryBuilder<'_> {
    GeometryBuilder::new(data)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec3)
        .with_usage(BufferUsage::Dynamic)
}

/// An inverted triangle with per-vertex colors cycling over time.
pub struct VertexColors {
    program: Program,
    geometry: Geometry,
}

impl VertexColors {
    pub fn new(options: &DemoOptions) -> Result<Self, DemoError> {
        let program = ShaderSource::load("vertex_color", options.shader_dir.as_deref())?.build()?;
        let geometry = builder(&vertices(0.0)).build()?;

        Ok(Self { program, geometry })
    }
}

impl Demo for VertexColors {
    fn frame(&mut self, renderer: &mut GlRenderer, time: f32) -> Result<(), DemoError> {
        self.geometry.update(&vertices(time))?;

        let [r, g, b] = CLEAR_COLOR;
        renderer.clear_color(r, g, b);

        renderer.use_program(&self.program);
        self.program.set_float("rightShiftOffset", 0.0)?;
        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }
}
