use std::fmt;

/// Errors raised synchronously by scene-graph operations.
///
/// Handler failures are not represented here: user handlers return
/// `anyhow::Result` and their errors pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Malformed argument, e.g. a move delta with no usable axis.
    InvalidArgument(String),
    /// A group was added to itself or to one of its own descendants.
    CyclicGroup,
    /// A kind-specific operation was called on a shape of another kind.
    UnsupportedKind { op: &'static str, kind: &'static str },
    /// The drawing surface cannot back a scene.
    InvalidSurface(String),
    /// The scene's drawing surface has already been released by `destroy`.
    SurfaceReleased,
}

impl SceneError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::CyclicGroup => write!(f, "a group cannot contain itself or one of its ancestors"),
            Self::UnsupportedKind { op, kind } => {
                write!(f, "`{op}` is not supported on {kind} shapes")
            }
            Self::InvalidSurface(msg) => write!(f, "cannot create scene: {msg}"),
            Self::SurfaceReleased => write!(f, "scene surface has been released"),
        }
    }
}

impl std::error::Error for SceneError {}
