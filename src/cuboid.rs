use std::{str::FromStr, sync::LazyLock};

use derive_more::Display;
use thiserror::Error;

use crate::tensor::{Tensor, TensorError};

#[derive(Debug, Error)]
pub enum CuboidError {
    #[error("cuboid parse error: missing `:` between min and max corners")]
    MissingSeparator,
    #[error("cuboid parse error: expected {expected} corner components, got {actual}")]
    Components { expected: usize, actual: usize },
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// The empty box at the origin.
pub static AIR: LazyLock<Cuboid> =
    LazyLock::new(|| Cuboid::from_components(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));

/// The unit box spanning the origin to the all-ones point.
pub static FULL_CUBE: LazyLock<Cuboid> =
    LazyLock::new(|| Cuboid::from_components(0.0, 0.0, 0.0, 1.0, 1.0, 1.0));

/// Classifies a cuboid by its maximum corner: a unit box, an empty box, or
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeType {
    #[display("full")]
    Full,
    #[display("air")]
    Air,
    #[display("other")]
    Other,
}

/// An axis-aligned bounding box defined by two corner tensors.
///
/// A valid box keeps `min <= max` on every axis by convention; this is not
/// enforced, and [`Cuboid::contract`] or [`Cuboid::grow`] with large inputs
/// can legitimately produce a wrapped box. The corners are always clones of
/// the inputs, so a cuboid never observes later mutation of a caller's
/// tensor.
#[derive(Debug, Clone, PartialEq, Display)]
#[display("{min_point}:{max_point}")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cuboid {
    min_point: Tensor,
    max_point: Tensor,
}

impl Cuboid {
    /// Creates a cuboid with a minimum and maximum point. Both corners are
    /// cloned.
    #[inline]
    pub fn new(min: &Tensor, max: &Tensor) -> Self {
        Self {
            min_point: min.clone(),
            max_point: max.clone(),
        }
    }

    /// A degenerate box whose corners both sit at the given point.
    #[inline]
    pub fn from_point(point: &Tensor) -> Self {
        Self::new(point, point)
    }

    #[inline]
    pub fn from_components(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self {
            min_point: Tensor::new([x1, y1, z1]),
            max_point: Tensor::new([x2, y2, z2]),
        }
    }

    #[inline]
    pub fn min_point(&self) -> &Tensor {
        &self.min_point
    }

    #[inline]
    pub fn max_point(&self) -> &Tensor {
        &self.max_point
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_point.x()
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_point.y()
    }

    #[inline]
    pub fn min_z(&self) -> f64 {
        self.min_point.z()
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_point.x()
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_point.y()
    }

    #[inline]
    pub fn max_z(&self) -> f64 {
        self.max_point.z()
    }

    /// Contracts the box by the given amount per axis: positive deltas pull
    /// the max corner inward, negative deltas pull the min corner inward,
    /// zero leaves the axis untouched. Contracting past the opposite side
    /// wraps the box.
    pub fn contract(&self, x: f64, y: f64, z: f64) -> Self {
        let mut d0 = self.min_x();
        let mut d1 = self.min_y();
        let mut d2 = self.min_z();
        let mut d3 = self.max_x();
        let mut d4 = self.max_y();
        let mut d5 = self.max_z();
        if x < 0.0 {
            d0 -= x;
        } else if x > 0.0 {
            d3 -= x;
        }
        if y < 0.0 {
            d1 -= y;
        } else if y > 0.0 {
            d4 -= y;
        }
        if z < 0.0 {
            d2 -= z;
        } else if z > 0.0 {
            d5 -= z;
        }
        Self::from_components(d0, d1, d2, d3, d4, d5)
    }

    /// Expands the box by the given amount per axis: positive deltas push the
    /// max corner outward, negative deltas push the min corner outward.
    pub fn expand(&self, x: f64, y: f64, z: f64) -> Self {
        let mut d0 = self.min_x();
        let mut d1 = self.min_y();
        let mut d2 = self.min_z();
        let mut d3 = self.max_x();
        let mut d4 = self.max_y();
        let mut d5 = self.max_z();
        if x < 0.0 {
            d0 += x;
        } else if x > 0.0 {
            d3 += x;
        }
        if y < 0.0 {
            d1 += y;
        } else if y > 0.0 {
            d4 += y;
        }
        if z < 0.0 {
            d2 += z;
        } else if z > 0.0 {
            d5 += z;
        }
        Self::from_components(d0, d1, d2, d3, d4, d5)
    }

    /// Moves both corners outward by the given amount on every axis
    /// (`min -= delta`, `max += delta`). Negative input shrinks instead.
    pub fn grow(&self, x: f64, y: f64, z: f64) -> Self {
        Self::from_components(
            self.min_x() - x,
            self.min_y() - y,
            self.min_z() - z,
            self.max_x() + x,
            self.max_y() + y,
            self.max_z() + z,
        )
    }

    /// [`Cuboid::grow`] with the same value on all three axes.
    #[inline]
    pub fn grow_all(&self, value: f64) -> Self {
        self.grow(value, value, value)
    }

    /// The opposite of [`Cuboid::grow_all`].
    #[inline]
    pub fn shrink(&self, value: f64) -> Self {
        self.grow_all(-value)
    }

    /// The per-axis intersection box. When the inputs do not overlap the
    /// result has `min > max` on some axis; callers must check validity
    /// before trusting it.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::from_components(
            self.min_x().max(other.min_x()),
            self.min_y().max(other.min_y()),
            self.min_z().max(other.min_z()),
            self.max_x().min(other.max_x()),
            self.max_y().min(other.max_y()),
            self.max_z().min(other.max_z()),
        )
    }

    /// The smallest box containing both inputs.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_components(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.min_z().min(other.min_z()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
            self.max_z().max(other.max_z()),
        )
    }

    /// Translates both corners by the given deltas.
    pub fn offset(&self, x: f64, y: f64, z: f64) -> Self {
        Self::from_components(
            self.min_x() + x,
            self.min_y() + y,
            self.min_z() + z,
            self.max_x() + x,
            self.max_y() + y,
            self.max_z() + z,
        )
    }

    /// Translates both corners by the given vector.
    ///
    /// # Panics
    /// Panics if the vector is not 3 elements long.
    pub fn offset_by(&self, vec: &Tensor) -> Self {
        Self {
            min_point: self.min_point.add(vec),
            max_point: self.max_point.add(vec),
        }
    }

    /// If this box and `other` overlap in the Y and Z dimensions, clamps a
    /// proposed X displacement of `other` so it cannot penetrate this box:
    /// a positive offset is capped at the gap up to this box's min side, a
    /// negative one at the gap down to its max side. Without Y/Z overlap the
    /// proposed offset passes through unchanged.
    pub fn calculate_x_offset(&self, other: &Self, offset: f64) -> f64 {
        if other.max_y() > self.min_y()
            && other.min_y() < self.max_y()
            && other.max_z() > self.min_z()
            && other.min_z() < self.max_z()
        {
            if offset > 0.0 && other.max_x() <= self.min_x() {
                let gap = self.min_x() - other.max_x();
                if gap < offset {
                    return gap;
                }
            } else if offset < 0.0 && other.min_x() >= self.max_x() {
                let gap = self.max_x() - other.min_x();
                if gap > offset {
                    return gap;
                }
            }
        }
        offset
    }

    /// The Y-axis counterpart of [`Cuboid::calculate_x_offset`], gated on
    /// X/Z overlap.
    pub fn calculate_y_offset(&self, other: &Self, offset: f64) -> f64 {
        if other.max_x() > self.min_x()
            && other.min_x() < self.max_x()
            && other.max_z() > self.min_z()
            && other.min_z() < self.max_z()
        {
            if offset > 0.0 && other.max_y() <= self.min_y() {
                let gap = self.min_y() - other.max_y();
                if gap < offset {
                    return gap;
                }
            } else if offset < 0.0 && other.min_y() >= self.max_y() {
                let gap = self.max_y() - other.min_y();
                if gap > offset {
                    return gap;
                }
            }
        }
        offset
    }

    /// The Z-axis counterpart of [`Cuboid::calculate_x_offset`], gated on
    /// X/Y overlap.
    pub fn calculate_z_offset(&self, other: &Self, offset: f64) -> f64 {
        if other.max_x() > self.min_x()
            && other.min_x() < self.max_x()
            && other.max_y() > self.min_y()
            && other.min_y() < self.max_y()
        {
            if offset > 0.0 && other.max_z() <= self.min_z() {
                let gap = self.min_z() - other.max_z();
                if gap < offset {
                    return gap;
                }
            } else if offset < 0.0 && other.min_z() >= self.max_z() {
                let gap = self.max_z() - other.min_z();
                if gap > offset {
                    return gap;
                }
            }
        }
        offset
    }

    /// Returns `true` if the boxes overlap on every axis, boundary contact
    /// included.
    pub fn intersects(&self, other: &Self) -> bool {
        Tensor::intersects(&self.min_point, &other.max_point)
            && Tensor::intersects(&other.min_point, &self.max_point)
    }

    /// Returns `true` if the point lies within `[min, max]` on every axis.
    #[inline]
    pub fn contains(&self, point: &Tensor) -> bool {
        point.contains(&self.min_point, &self.max_point)
    }

    #[inline]
    pub fn contains_point(&self, x: f64, y: f64, z: f64) -> bool {
        self.contains(&Tensor::new([x, y, z]))
    }

    /// The average length of the box's edges.
    pub fn average_edge_length(&self) -> f64 {
        (self.x_size() + self.y_size() + self.z_size()) / 3.0
    }

    #[inline]
    pub fn x_size(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    #[inline]
    pub fn y_size(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    #[inline]
    pub fn z_size(&self) -> f64 {
        self.max_z() - self.min_z()
    }

    /// The midpoint of the box.
    pub fn center(&self) -> Tensor {
        Tensor::new([
            self.min_x() + self.x_size() * 0.5,
            self.min_y() + self.y_size() * 0.5,
            self.min_z() + self.z_size() * 0.5,
        ])
    }

    pub fn has_nan(&self) -> bool {
        self.min_point.iter().any(f64::is_nan) || self.max_point.iter().any(f64::is_nan)
    }

    /// Returns `true` if the maximum corner is all-zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max_point.is_empty()
    }

    /// Classifies the box: [`SizeType::Full`] when the max corner is the
    /// all-ones point, [`SizeType::Air`] when it is all-zero, else
    /// [`SizeType::Other`].
    pub fn size_type(&self) -> SizeType {
        if self.max_point == 1.0 {
            SizeType::Full
        } else if self.is_empty() {
            SizeType::Air
        } else {
            SizeType::Other
        }
    }

    /// The six corner components as a single flat tensor, reshaped into rows
    /// of `width` for display.
    pub fn to_array(&self, width: usize) -> Vec<Vec<f64>> {
        self.corner_tensor().to_array(width)
    }

    /// A human-readable rendering of [`Cuboid::to_array`]. Debugging only.
    pub fn to_array_string(&self, width: usize) -> String {
        self.corner_tensor().to_array_string(width)
    }

    fn corner_tensor(&self) -> Tensor {
        Tensor::new([
            self.min_x(),
            self.min_y(),
            self.min_z(),
            self.max_x(),
            self.max_y(),
            self.max_z(),
        ])
    }
}

/// Parses the canonical `"minX,minY,minZ:maxX,maxY,maxZ"` form. All six
/// components are required.
impl FromStr for Cuboid {
    type Err = CuboidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s.split_once(':').ok_or(CuboidError::MissingSeparator)?;
        let min: Tensor = min.parse()?;
        let max: Tensor = max.parse()?;
        if min.len() != 3 || max.len() != 3 {
            return Err(CuboidError::Components {
                expected: 6,
                actual: min.len() + max.len(),
            });
        }
        Ok(Self::new(&min, &max))
    }
}
