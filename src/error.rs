/// Errors surfaced by the cycloids binary
#[derive(thiserror::Error, Debug)]
pub enum CycloidError {
    #[error("invalid value for --{name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CycloidError>;
