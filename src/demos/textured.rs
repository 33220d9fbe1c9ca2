use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::Program;
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter, TextureParams, TextureWrap};

use crate::demo::{Demo, DemoError, DemoOptions, CLEAR_COLOR};
use crate::image::Image;
use crate::shaders::ShaderSource;

#[rustfmt::skip]
const INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

const CHECKER_SIZE: u32 = 256;
const CHECKER_CELLS: u32 = 8;

/// Quad with position, color and texture coordinates, tinted red, green, blue and yellow.
///
/// `tex_scale` stretches the coordinates past 1.0 to show the wrap mode.
fn quad(tex_scale: f32) -> [f32; 32] {
    let s = tex_scale;

    #[rustfmt::skip]
    let data = [
        0.5, 0.5, 0.0,    1.0, 0.0, 0.0,   s, s,
        0.5, -0.5, 0.0,   0.0, 1.0, 0.0,   s, 0.0,
        -0.5, -0.5, 0.0,  0.0, 0.0, 1.0,   0.0, 0.0,
        -0.5, 0.5, 0.0,   1.0, 1.0, 0.0,   0.0, s,
    ];

    data
}

fn builder(data: &[f32]) -> GeometryBuilder<'_> {
    GeometryBuilder::new(data)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec3)
        .with_attribute(VertexAttribute::Vec2)
        .with_indices(&INDICES)
}

fn texture_params(nearest: bool) -> TextureParams {
    if nearest {
        TextureParams {
            filter: TextureFilter::Nearest,
            wrap: TextureWrap::MirroredRepeat,
            mipmaps: false,
        }
    } else {
        TextureParams {
            filter: TextureFilter::Linear,
            wrap: TextureWrap::MirroredRepeat,
            mipmaps: true,
        }
    }
}

pub struct Textured {
    program: Program,
    geometry: Geometry,
    texture: Texture2D,
}

impl Textured {
    /// `nearest` selects unfiltered sampling over plain 0..1 coordinates.
    pub fn new(options: &DemoOptions, nearest: bool) -> Result<Self, DemoError> {
        let program = ShaderSource::load("texture", options.shader_dir.as_deref())?.build()?;

        let data = if nearest { quad(1.0) } else { quad(2.0) };
        let geometry = builder(&data).build()?;

        let image = match &options.texture {
            Some(path) => {
                let image = Image::load_png(path)?;
                log::info!(
                    "loaded texture {:?} ({}x{}, {:?})",
                    path,
                    image.width,
                    image.height,
                    image.format
                );
                image
            }
            None => Image::checkerboard(CHECKER_SIZE, CHECKER_CELLS),
        };
        let texture = image.upload(texture_params(nearest))?;

        Ok(Self {
            program,
            geometry,
            texture,
        })
    }
}

impl Demo for Textured {
    fn frame(&mut self, renderer: &mut GlRenderer, _time: f32) -> Result<(), DemoError> {
        let [r, g, b] = CLEAR_COLOR;
        renderer.clear_color(r, g, b);

        self.texture.bind(0);
        renderer.use_program(&self.program);
        self.program.set_int("ourTexture", 0)?;
        renderer.draw(&self.geometry, &self.program);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_layout() {
        let data = quad(1.0);
        let (layout, vertices) = builder(&data).validate().unwrap();

        assert_eq!(layout.stride(), 8);
        assert_eq!(layout.offsets(), &[0, 3, 6]);
        assert_eq!(vertices, 4);
    }

    #[test]
    fn corners_are_tinted() {
        let data = quad(1.0);
        let colors: Vec<&[f32]> = data.chunks_exact(8).map(|v| &v[3..6]).collect();

        assert_eq!(colors[0], &[1.0, 0.0, 0.0]);
        assert_eq!(colors[1], &[0.0, 1.0, 0.0]);
        assert_eq!(colors[2], &[0.0, 0.0, 1.0]);
        assert_eq!(colors[3], &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn tex_scale_reaches_corners() {
        let data = quad(2.0);

        assert_eq!(&data[6..8], &[2.0, 2.0]);
        assert_eq!(&data[22..24], &[0.0, 0.0]);
    }

    #[test]
    fn nearest_skips_mipmaps() {
        assert_eq!(texture_params(true).filter, TextureFilter::Nearest);
        assert!(!texture_params(true).mipmaps);
        assert!(texture_params(false).mipmaps);
        assert_eq!(texture_params(false).wrap, TextureWrap::MirroredRepeat);
    }
}
