//! Engine geometry, color, and time values in the serializer's catalog.
//!
//! These are plain-old-data renditions of the engine types the wire format
//! carries with fixed layouts. All fixed-width components are written
//! little-endian; see the tag catalog for the exact payload of each kind.

use serde::{Deserialize, Serialize};

/// A 2D vector of `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vector2 {
    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 3D vector of `f32` components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Creates a vector from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A rotation stored as quaternion components (x, y, z, w).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W (scalar) component.
    pub w: f32,
}

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Creates a quaternion from its components.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// A coordinate frame: a position plus a rotation quaternion.
///
/// A frame built from an arbitrary rotation matrix loses precision when
/// converted through the quaternion; reconstructed rotations agree with the
/// original to within 1e-5 per component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CFrame {
    /// Translation.
    pub position: Vector3,
    /// Rotation quaternion (x, y, z, w).
    pub rotation: Quaternion,
}

impl CFrame {
    /// The identity frame at the origin.
    pub const IDENTITY: Self =
        Self { position: Vector3::new(0.0, 0.0, 0.0), rotation: Quaternion::IDENTITY };

    /// Creates a frame from a position and a rotation.
    #[inline]
    #[must_use]
    pub const fn new(position: Vector3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Creates a frame rotated `angle` radians around `axis`, at `position`.
    ///
    /// A zero-length axis yields the identity rotation.
    #[must_use]
    pub fn from_axis_angle(position: Vector3, axis: Vector3, angle: f32) -> Self {
        let len = (axis.x * axis.x + axis.y * axis.y + axis.z * axis.z).sqrt();
        if len == 0.0 {
            return Self { position, rotation: Quaternion::IDENTITY };
        }
        let (sin, cos) = (angle * 0.5).sin_cos();
        let s = sin / len;
        let rotation = Quaternion::new(axis.x * s, axis.y * s, axis.z * s, cos);
        Self { position, rotation }
    }
}

/// An RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color3 {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Color3 {
    /// Creates a color from its components.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A UI dimension: a fraction of the parent plus a pixel offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UDim {
    /// Fraction of the parent extent.
    pub scale: f32,
    /// Pixel offset.
    pub offset: i32,
}

impl UDim {
    /// Creates a dimension from scale and offset.
    #[inline]
    #[must_use]
    pub const fn new(scale: f32, offset: i32) -> Self {
        Self { scale, offset }
    }
}

/// A 2D UI dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UDim2 {
    /// Horizontal dimension.
    pub x: UDim,
    /// Vertical dimension.
    pub y: UDim,
}

impl UDim2 {
    /// Creates a 2D dimension from per-axis scales and offsets.
    #[inline]
    #[must_use]
    pub const fn new(x_scale: f32, x_offset: i32, y_scale: f32, y_offset: i32) -> Self {
        Self { x: UDim::new(x_scale, x_offset), y: UDim::new(y_scale, y_offset) }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum corner.
    pub min: Vector2,
    /// Maximum corner.
    pub max: Vector2,
}

impl Rect {
    /// Creates a rectangle from its corners.
    #[inline]
    #[must_use]
    pub const fn new(min: Vector2, max: Vector2) -> Self {
        Self { min, max }
    }
}

/// A closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl NumberRange {
    /// Creates a range from its bounds.
    #[inline]
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// One control point of a [`NumberSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberSequenceKeypoint {
    /// Position along the sequence in `[0, 1]`.
    pub time: f32,
    /// Value at this point.
    pub value: f32,
    /// Random-spread envelope around the value.
    pub envelope: f32,
}

impl NumberSequenceKeypoint {
    /// Creates a keypoint.
    #[inline]
    #[must_use]
    pub const fn new(time: f32, value: f32, envelope: f32) -> Self {
        Self { time, value, envelope }
    }
}

/// A piecewise-linear numeric curve.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumberSequence {
    /// Control points in time order.
    pub keypoints: Vec<NumberSequenceKeypoint>,
}

impl NumberSequence {
    /// Creates a sequence from its keypoints.
    #[inline]
    #[must_use]
    pub const fn new(keypoints: Vec<NumberSequenceKeypoint>) -> Self {
        Self { keypoints }
    }
}

/// One control point of a [`ColorSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSequenceKeypoint {
    /// Position along the sequence in `[0, 1]`.
    pub time: f32,
    /// Color at this point.
    pub color: Color3,
    /// Interpolation mode between this point and the next.
    pub interpolation: u8,
}

impl ColorSequenceKeypoint {
    /// Creates a keypoint with linear interpolation.
    #[inline]
    #[must_use]
    pub const fn new(time: f32, color: Color3) -> Self {
        Self { time, color, interpolation: 0 }
    }
}

/// A piecewise color gradient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorSequence {
    /// Control points in time order.
    pub keypoints: Vec<ColorSequenceKeypoint>,
}

impl ColorSequence {
    /// Creates a sequence from its keypoints.
    #[inline]
    #[must_use]
    pub const fn new(keypoints: Vec<ColorSequenceKeypoint>) -> Self {
        Self { keypoints }
    }
}

/// A named member of a named enum class.
///
/// Both names are byte strings and participate in string interning on the
/// wire, so repeated enum items cost a few bytes each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumItem {
    /// Name of the enum class.
    pub class: Vec<u8>,
    /// Name of the member within the class.
    pub name: Vec<u8>,
}

impl EnumItem {
    /// Creates an enum item from class and member names.
    #[inline]
    pub fn new(class: impl Into<Vec<u8>>, name: impl Into<Vec<u8>>) -> Self {
        Self { class: class.into(), name: name.into() }
    }
}
