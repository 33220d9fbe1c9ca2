mod rectangle;
mod textured;
mod triangles;
mod uniform;
mod vertex_colors;

pub use rectangle::Rectangle;
pub use textured::Textured;
pub use triangles::Triangles;
pub use uniform::Uniform;
pub use vertex_colors::VertexColors;

pub const ORANGE: [f32; 4] = [1.0, 0.5, 0.2, 1.0];
pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.2, 1.0];
