use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
    usage: BufferUsage,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
            usage: BufferUsage::Static,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_usage(mut self, usage: BufferUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Checks the data against the attribute layout and returns the layout and vertex count.
    pub fn validate(&self) -> Result<(VertexLayout, usize), GBError> {
        if self.attributes.is_empty() {
            return Err(GBError::NoAttributes);
        }

        let layout = VertexLayout::new(&self.attributes);

        if self.data.len() % layout.stride() != 0 {
            return Err(GBError::InvalidDataLength);
        }

        let vertices = self.data.len() / layout.stride();

        if let Some(indices) = self.indices {
            if let Some(&index) = indices.iter().find(|i| **i as usize >= vertices) {
                return Err(GBError::IndexOutOfRange { index, vertices });
            }
        }

        Ok((layout, vertices))
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let (layout, vertices) = self.validate()?;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                self.usage.gl_enum(),
            );

            for (i, attr) in self.attributes.iter().enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride_bytes() as i32,
                    layout.offset_bytes(i) as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);
                // the element binding is part of the vertex array state
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            vertices,
            indices: self.indices.map_or(0, |i| i.len()),
            layout,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

/// Interleaved layout, stride and offsets counted in floats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    stride: usize,
    offsets: Vec<usize>,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        let mut offsets = Vec::with_capacity(attributes.len());
        let mut stride = 0;

        for attr in attributes {
            offsets.push(stride);
            stride += attr.size();
        }

        Self { stride, offsets }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn stride_bytes(&self) -> usize {
        self.stride * std::mem::size_of::<f32>()
    }

    pub fn offset_bytes(&self, attribute: usize) -> usize {
        self.offsets[attribute] * std::mem::size_of::<f32>()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferUsage {
    Static,
    Dynamic,
}

impl BufferUsage {
    fn gl_enum(&self) -> gl::types::GLenum {
        match self {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
        }
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    vertices: usize,
    indices: usize,
    layout: VertexLayout,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn indices(&self) -> usize {
        self.indices
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    pub fn draw_count(&self) -> usize {
        if self.is_indexed() {
            self.indices
        } else {
            self.vertices
        }
    }

    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Replaces the vertex data in place. The new data must describe the same number of vertices.
    pub fn update(&self, data: &[f32]) -> Result<(), GBError> {
        if data.len() != self.vertices * self.layout.stride() {
            return Err(GBError::InvalidDataLength);
        }

        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferSubData(
                gl::ARRAY_BUFFER,
                0,
                std::mem::size_of_val(data) as isize,
                data.as_ptr() as *const c_void,
            );
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        Ok(())
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = &self.ebo {
                gl::DeleteBuffers(1, ebo as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets() {
        let layout = VertexLayout::new(&[
            VertexAttribute::Vec3,
            VertexAttribute::Vec3,
            VertexAttribute::Vec2,
        ]);

        assert_eq!(layout.stride(), 8);
        assert_eq!(layout.offsets(), &[0, 3, 6]);
        assert_eq!(layout.stride_bytes(), 32);
        assert_eq!(layout.offset_bytes(2), 24);
    }

    #[test]
    fn validate_counts_vertices() {
        let data = [0.0_f32; 12];
        let (layout, vertices) = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .validate()
            .unwrap();

        assert_eq!(layout.stride(), 3);
        assert_eq!(vertices, 4);
    }

    #[test]
    fn validate_rejects_bad_input() {
        let data = [0.0_f32; 10];

        assert_eq!(
            GeometryBuilder::new(&data).validate().unwrap_err(),
            GBError::NoAttributes
        );
        assert_eq!(
            GeometryBuilder::new(&data)
                .with_attribute(VertexAttribute::Vec3)
                .validate()
                .unwrap_err(),
            GBError::InvalidDataLength
        );

        let data = [0.0_f32; 9];
        let indices = [0, 1, 3];
        assert_eq!(
            GeometryBuilder::new(&data)
                .with_attribute(VertexAttribute::Vec3)
                .with_indices(&indices)
                .validate()
                .unwrap_err(),
            GBError::IndexOutOfRange {
                index: 3,
                vertices: 3
            }
        );
    }
}
