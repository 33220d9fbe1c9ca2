use gl::types::{GLenum, GLint, GLuint};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub struct ProgramBuilder {
    vert: String,
    frag: String,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Self {
        Self {
            vert: vert_src.to_owned(),
            frag: frag_src.to_owned(),
        }
    }

    /// Compiles both stages and links them.
    ///
    /// Every intermediate GL object is released on failure, so an `Err` never leaves a
    /// half-built program behind.
    pub fn build(self) -> Result<Program, ProgramError> {
        let vert = compile_shader(ShaderStage::Vertex, &self.vert)?;

        let frag = match compile_shader(ShaderStage::Fragment, &self.frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            let mut success: GLint = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut GLint);

            let result = if success != gl::TRUE as GLint {
                let log = program_info_log(program);
                gl::DeleteProgram(program);
                Err(ProgramError::Linking(log))
            } else {
                gl::DetachShader(program, vert);
                gl::DetachShader(program, frag);
                log::debug!("linked program {program}");
                Ok(Program {
                    id: program,
                    uniforms: RefCell::new(HashMap::new()),
                })
            };

            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            result
        }
    }
}

fn compile_shader(stage: ShaderStage, src: &str) -> Result<GLuint, ProgramError> {
    let src = CString::new(src).map_err(|_| ProgramError::InvalidSource(stage))?;

    unsafe {
        let shader = gl::CreateShader(stage.gl_enum());

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );
        gl::CompileShader(shader);

        let mut success: GLint = 0;
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut GLint);

        if success != gl::TRUE as GLint {
            let log = shader_info_log(shader);
            gl::DeleteShader(shader);
            return Err(ProgramError::Compilation { stage, log });
        }

        Ok(shader)
    }
}

unsafe fn shader_info_log(shader: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetShaderInfoLog(
        shader,
        buf.len() as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut c_char,
    );

    info_log_to_string(&buf)
}

unsafe fn program_info_log(program: GLuint) -> String {
    let mut len: GLint = 0;
    gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, (&mut len) as *mut GLint);

    let mut buf = vec![0_u8; len.max(1) as usize];
    gl::GetProgramInfoLog(
        program,
        buf.len() as i32,
        std::ptr::null_mut(),
        buf.as_mut_ptr() as *mut c_char,
    );

    info_log_to_string(&buf)
}

/// Converts a driver info log buffer into text, stopping at the first NUL.
pub fn info_log_to_string(buf: &[u8]) -> String {
    let data = buf.split(|a| *a == 0).next().unwrap_or(buf);

    String::from_utf8_lossy(data).trim_end().to_string()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(ShaderStage),
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("program linking failed: {0}")]
    Linking(String),
    #[error("uniform name {0:?} contains a NUL byte")]
    InvalidName(String),
    #[error("uniform {0:?} is not active in the program")]
    UnknownUniform(String),
}

/// A successfully linked shader program.
///
/// Uniform setters write to the program that is currently bound, so bind it with
/// [`GlRenderer::use_program`](crate::renderer::GlRenderer::use_program) first.
pub struct Program {
    id: GLuint,
    uniforms: RefCell<HashMap<String, GLint>>,
}

impl Program {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn uniform_location(&self, name: &str) -> Result<GLint, ProgramError> {
        if let Some(location) = self.uniforms.borrow().get(name) {
            return Ok(*location);
        }

        let c_name = CString::new(name).map_err(|_| ProgramError::InvalidName(name.to_owned()))?;
        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location == -1 {
            return Err(ProgramError::UnknownUniform(name.to_owned()));
        }

        self.uniforms
            .borrow_mut()
            .insert(name.to_owned(), location);

        Ok(location)
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), ProgramError> {
        self.set_int(name, value as i32)
    }

    pub fn set_int(&self, name: &str, value: i32) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1i(location, value) }
        Ok(())
    }

    pub fn set_float(&self, name: &str, value: f32) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform1f(location, value) }
        Ok(())
    }

    pub fn set_vec3(&self, name: &str, value: [f32; 3]) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform3f(location, value[0], value[1], value[2]) }
        Ok(())
    }

    pub fn set_vec4(&self, name: &str, value: [f32; 4]) -> Result<(), ProgramError> {
        let location = self.uniform_location(name)?;
        unsafe { gl::Uniform4f(location, value[0], value[1], value[2], value[3]) }
        Ok(())
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = b"0:3(1): error: syntax error\n".to_vec();
        buf.extend_from_slice(&[0, b'x', b'y']);

        assert_eq!(info_log_to_string(&buf), "0:3(1): error: syntax error");
    }

    #[test]
    fn info_log_without_nul() {
        assert_eq!(info_log_to_string(b"link error"), "link error");
        assert_eq!(info_log_to_string(&[0; 16]), "");
        assert_eq!(info_log_to_string(&[]), "");
    }

    #[test]
    fn error_messages() {
        let err = ProgramError::Compilation {
            stage: ShaderStage::Fragment,
            log: "bad".into(),
        };
        assert_eq!(err.to_string(), "fragment shader compilation failed: bad");

        let err = ProgramError::UnknownUniform("ourColor".into());
        assert_eq!(err.to_string(), "uniform \"ourColor\" is not active in the program");
    }
}
