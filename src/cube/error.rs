use std::fmt;

#[derive(Debug, Clone)]
pub enum CubeError {
    UnknownWall(String),
}

impl fmt::Display for CubeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeError::UnknownWall(name) => write!(f, "Unknown wall '{name}'"),
        }
    }
}

impl std::error::Error for CubeError {}
