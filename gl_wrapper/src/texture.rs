use gl::types::{GLenum, GLint};
use std::ffi::c_void;
use thiserror::Error;

pub struct Texture2D {
    id: u32,
}

impl Texture2D {
    pub fn new(
        width: u32,
        height: u32,
        data: &[u8],
        format: TextureFormat,
        params: TextureParams,
    ) -> Result<Self, TextureError> {
        check_src_len(width, height, data, format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, (&mut id) as *mut u32);
            gl::BindTexture(gl::TEXTURE_2D, id);

            let wrap = params.wrap.gl_enum() as GLint;
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                params.min_filter() as GLint,
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                params.filter.gl_enum() as GLint,
            );

            // RGB8 rows are not 4-byte aligned in general
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                format.internal_format() as GLint,
                width as i32,
                height as i32,
                0,
                format.pixel_format(),
                gl::UNSIGNED_BYTE,
                data.as_ptr() as *const c_void,
            );

            // the min filter chosen above expects a complete mip chain
            if params.mipmaps {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, (&self.id) as *const u32);
        }
    }
}

/// Byte length a `width` x `height` image of `format` must have.
pub fn expected_len(width: u32, height: u32, format: TextureFormat) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}

fn check_src_len(
    width: u32,
    height: u32,
    data: &[u8],
    format: TextureFormat,
) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::ZeroSize);
    }

    if expected_len(width, height, format) != data.len() {
        return Err(TextureError::InvalidSrcLength);
    }

    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
    #[error("Texture dimensions must be non-zero")]
    ZeroSize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Rgb8,
    Rgba8,
}

impl TextureFormat {
    pub fn channels(&self) -> u8 {
        match self {
            TextureFormat::Rgb8 => 3,
            TextureFormat::Rgba8 => 4,
        }
    }

    /// One byte per channel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() as usize
    }

    fn internal_format(&self) -> GLenum {
        match self {
            TextureFormat::Rgb8 => gl::RGB8,
            TextureFormat::Rgba8 => gl::RGBA8,
        }
    }

    fn pixel_format(&self) -> GLenum {
        match self {
            TextureFormat::Rgb8 => gl::RGB,
            TextureFormat::Rgba8 => gl::RGBA,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

impl TextureFilter {
    fn gl_enum(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureWrap {
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl TextureWrap {
    fn gl_enum(&self) -> GLenum {
        match self {
            TextureWrap::ClampToEdge => gl::CLAMP_TO_EDGE,
            TextureWrap::Repeat => gl::REPEAT,
            TextureWrap::MirroredRepeat => gl::MIRRORED_REPEAT,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextureParams {
    pub filter: TextureFilter,
    pub wrap: TextureWrap,
    pub mipmaps: bool,
}

impl TextureParams {
    fn min_filter(&self) -> GLenum {
        match (self.filter, self.mipmaps) {
            (TextureFilter::Nearest, false) => gl::NEAREST,
            (TextureFilter::Linear, false) => gl::LINEAR,
            (TextureFilter::Nearest, true) => gl::NEAREST_MIPMAP_NEAREST,
            (TextureFilter::Linear, true) => gl::LINEAR_MIPMAP_LINEAR,
        }
    }
}

impl Default for TextureParams {
    fn default() -> Self {
        Self {
            filter: TextureFilter::Linear,
            wrap: TextureWrap::Repeat,
            mipmaps: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn src_len() {
        assert_eq!(expected_len(3, 2, TextureFormat::Rgb8), 18);
        assert_eq!(expected_len(3, 2, TextureFormat::Rgba8), 24);

        assert_eq!(check_src_len(3, 2, &[0; 18], TextureFormat::Rgb8), Ok(()));
        assert_eq!(
            check_src_len(3, 2, &[0; 17], TextureFormat::Rgb8),
            Err(TextureError::InvalidSrcLength)
        );
        assert_eq!(
            check_src_len(0, 2, &[], TextureFormat::Rgb8),
            Err(TextureError::ZeroSize)
        );
    }

    #[test]
    fn formats_are_one_byte_per_channel() {
        for format in [TextureFormat::Rgb8, TextureFormat::Rgba8] {
            assert_eq!(format.bytes_per_pixel(), format.channels() as usize);
            assert_eq!(
                expected_len(5, 7, format),
                5 * 7 * format.channels() as usize
            );
        }
    }

    #[test]
    fn min_filter_follows_mipmaps() {
        let mut params = TextureParams::default();
        assert_eq!(params.min_filter(), gl::LINEAR_MIPMAP_LINEAR);

        params.filter = TextureFilter::Nearest;
        assert_eq!(params.min_filter(), gl::NEAREST_MIPMAP_NEAREST);

        params.mipmaps = false;
        assert_eq!(params.min_filter(), gl::NEAREST);
    }
}
