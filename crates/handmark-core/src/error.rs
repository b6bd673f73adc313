pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid color {color:?}: {message}")]
    InvalidColor { color: String, message: String },

    #[error("invalid shape {id:?}: {message}")]
    InvalidShape { id: String, message: String },

    #[error("invalid route for connection {id:?}: expected at least 2 points, got {points}")]
    InvalidRoute { id: String, points: usize },

    #[error("connection {id:?} has a zero-length {end} segment")]
    DegenerateSegment { id: String, end: &'static str },

    #[error("invalid sketch config: {message}")]
    InvalidConfig { message: String },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
