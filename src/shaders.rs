use std::path::{Path, PathBuf};

use thiserror::Error;

use gl_wrapper::program::{Program, ProgramBuilder, ProgramError};

const BUILTIN: [(&str, &str, &str); 3] = [
    (
        "solid",
        include_str!("gl_shaders/solid.vert"),
        include_str!("gl_shaders/solid.frag"),
    ),
    (
        "vertex_color",
        include_str!("gl_shaders/vertex_color.vert"),
        include_str!("gl_shaders/vertex_color.frag"),
    ),
    (
        "texture",
        include_str!("gl_shaders/texture.vert"),
        include_str!("gl_shaders/texture.frag"),
    ),
];

/// Vertex and fragment source of one shader program.
#[derive(Clone, Debug)]
pub struct ShaderSource {
    pub name: String,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn builtin(name: &str) -> Result<Self, ShaderSourceError> {
        let (_, vertex, fragment) = BUILTIN
            .iter()
            .find(|(n, _, _)| *n == name)
            .ok_or_else(|| ShaderSourceError::Unknown(name.to_owned()))?;

        Ok(Self {
            name: name.to_owned(),
            vertex: vertex.to_string(),
            fragment: fragment.to_string(),
        })
    }

    /// Reads `<dir>/<name>.vert` and `<dir>/<name>.frag`.
    pub fn from_dir<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self, ShaderSourceError> {
        let dir = dir.as_ref();

        Ok(Self {
            name: name.to_owned(),
            vertex: read_source(dir.join(format!("{name}.vert")))?,
            fragment: read_source(dir.join(format!("{name}.frag")))?,
        })
    }

    pub fn load(name: &str, dir: Option<&Path>) -> Result<Self, ShaderSourceError> {
        let source = match dir {
            Some(dir) => Self::from_dir(dir, name)?,
            None => Self::builtin(name)?,
        };

        log::debug!("vertex shader {name}:\n{}", source.vertex);
        log::debug!("fragment shader {name}:\n{}", source.fragment);

        Ok(source)
    }

    pub fn build(&self) -> Result<Program, ProgramError> {
        ProgramBuilder::new(&self.vertex, &self.fragment).build()
    }
}

fn read_source(path: PathBuf) -> Result<String, ShaderSourceError> {
    std::fs::read_to_string(&path).map_err(|source| ShaderSourceError::Read { path, source })
}

#[derive(Debug, Error)]
pub enum ShaderSourceError {
    #[error("unknown built-in shader {0:?}")]
    Unknown(String),
    #[error("could not read shader {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sources() {
        for name in ["solid", "vertex_color", "texture"] {
            let source = ShaderSource::builtin(name).unwrap();
            assert!(source.vertex.starts_with("#version 330 core"));
            assert!(source.fragment.starts_with("#version 330 core"));
        }

        assert!(ShaderSource::builtin("solid")
            .unwrap()
            .fragment
            .contains("uniform vec4 ourColor"));
        assert!(ShaderSource::builtin("vertex_color")
            .unwrap()
            .vertex
            .contains("uniform float rightShiftOffset"));
    }

    #[test]
    fn unknown_builtin() {
        let err = ShaderSource::builtin("phong").unwrap_err();
        assert!(matches!(err, ShaderSourceError::Unknown(n) if n == "phong"));
    }

    #[test]
    fn load_from_dir() {
        let dir = std::env::temp_dir().join(format!("experimentgl-shaders-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("custom.vert"), "vert body").unwrap();
        std::fs::write(dir.join("custom.frag"), "frag body").unwrap();

        let source = ShaderSource::load("custom", Some(dir.as_path())).unwrap();
        assert_eq!(source.vertex, "vert body");
        assert_eq!(source.fragment, "frag body");

        let err = ShaderSource::load("missing", Some(dir.as_path())).unwrap_err();
        match err {
            ShaderSourceError::Read { path, .. } => assert_eq!(path, dir.join("missing.vert")),
            other => panic!("unexpected error {other}"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
