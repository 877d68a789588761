use super::Vec2;

/// Position, uniform scale and rotation of a node relative to its parent.
///
/// `scale` is expected to be strictly positive; zero or negative values are
/// accepted and simply produce degenerate output. `rotation` is in radians and
/// is never normalized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

impl Transform {
    #[inline]
    pub const fn new(position: Vec2, scale: f32, rotation: f32) -> Self {
        Self { position, scale, rotation }
    }

    /// Origin, unit scale, no rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(Vec2::zero(), 1.0, 0.0)
    }

    /// Composes this (local) transform with `parent`.
    ///
    /// Positions add without being rotated or scaled by the parent; scales
    /// multiply; rotations add. This is not a full affine composition.
    #[inline]
    pub fn compose(&self, parent: &Transform) -> Transform {
        Transform {
            position: self.position + parent.position,
            scale: self.scale * parent.scale,
            rotation: self.rotation + parent.rotation,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
