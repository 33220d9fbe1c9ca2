use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use gl_wrapper::texture::{Texture2D, TextureError, TextureFormat, TextureParams};

/// 8-bit pixels in bottom-up row order, ready for `glTexImage2D`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl Image {
    pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Self, ImageError> {
        let file = File::open(path)?;

        Self::decode_png(BufReader::new(file))
    }

    pub fn decode_png<R: Read>(reader: R) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(reader);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let (format, data) = match info.color_type {
            png::ColorType::Rgb => (TextureFormat::Rgb8, buf),
            png::ColorType::Rgba => (TextureFormat::Rgba8, buf),
            png::ColorType::Grayscale => (
                TextureFormat::Rgb8,
                buf.iter().flat_map(|&l| [l, l, l]).collect(),
            ),
            png::ColorType::GrayscaleAlpha => (
                TextureFormat::Rgba8,
                buf.chunks_exact(2)
                    .flat_map(|la| [la[0], la[0], la[0], la[1]])
                    .collect(),
            ),
            other => return Err(ImageError::UnsupportedColor(other)),
        };

        let mut image = Self {
            width: info.width,
            height: info.height,
            format,
            data,
        };
        image.flip_rows();

        Ok(image)
    }

    /// Square RGB8 checkerboard with `cells` x `cells` alternating tiles.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let cell = (size / cells.max(1)).max(1);
        let mut data = Vec::with_capacity((size * size * 3) as usize);

        for y in 0..size {
            for x in 0..size {
                let value = if ((x / cell) + (y / cell)) % 2 == 0 {
                    230
                } else {
                    40
                };
                data.extend_from_slice(&[value, value, value]);
            }
        }

        Self {
            width: size,
            height: size,
            format: TextureFormat::Rgb8,
            data,
        }
    }

    pub fn upload(&self, params: TextureParams) -> Result<Texture2D, TextureError> {
        Texture2D::new(self.width, self.height, &self.data, self.format, params)
    }

    // PNG stores rows top-down, texture coordinates start at the bottom.
    fn flip_rows(&mut self) {
        let row = self.width as usize * self.format.bytes_per_pixel();
        let height = self.height as usize;

        for y in 0..height / 2 {
            let (top, bottom) = self.data.split_at_mut((height - 1 - y) * row);
            top[y * row..(y + 1) * row].swap_with_slice(&mut bottom[..row]);
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not open image: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode PNG: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported PNG color type {0:?}")]
    UnsupportedColor(png::ColorType),
}
