use std::{str::FromStr, sync::LazyLock};

use derive_more::Display;
use itertools::Itertools;
use thiserror::Error;

use crate::direction::{Axis, Direction};

#[derive(Debug, Error)]
pub enum TensorError {
    #[error("tensor size error: expected {expected} values, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("tensor parse error: {0}")]
    Parse(#[from] std::num::ParseFloatError),
}

/// An empty tensor with 1 dimension (aka scalar).
pub static ZERO: LazyLock<Tensor> = LazyLock::new(|| Tensor::zeroes([1]));

/// An empty tensor with 3 dimensions (aka vector).
pub static VECTOR_ZERO: LazyLock<Tensor> = LazyLock::new(|| Tensor::zeroes([3]));

/// An n-dimensional numeric buffer: a flat sequence of `f64` values plus a
/// shape descriptor whose product equals the buffer length.
///
/// Arithmetic always returns a new tensor; only [`Tensor::set`], [`Tensor::reset`]
/// and the positional setters mutate in place.
#[derive(Debug, Clone, Display)]
#[display("{}", data.iter().format(","))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tensor {
    data: Vec<f64>,
    dimensions: Vec<usize>,
}

impl Tensor {
    /// Creates a new 1-D tensor with the given values; shape is `[len]`.
    #[inline]
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let data = values.into();
        let dimensions = vec![data.len()];
        Self { data, dimensions }
    }

    /// Builds a tensor directly from a pre-existing buffer and shape.
    ///
    /// This is the primitive escape hatch used by cloning and zero
    /// construction: the caller must guarantee that the product of
    /// `dimensions` equals `data.len()`. No re-validation happens here.
    #[inline]
    pub fn from_parts(data: Vec<f64>, dimensions: Vec<usize>) -> Self {
        Self { data, dimensions }
    }

    /// Creates a tensor of the given shape filled with zeroes.
    #[inline]
    pub fn zeroes(dimensions: impl Into<Vec<usize>>) -> Self {
        let dimensions = dimensions.into();
        let data = vec![0.0; dimensions.iter().product()];
        Self { data, dimensions }
    }

    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn dimensions(&self) -> &[usize] {
        &self.dimensions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if every element is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }

    /// Replaces the buffer contents in place.
    ///
    /// Fails with [`TensorError::SizeMismatch`] when the new value count
    /// differs from the current buffer length; the shape never changes.
    pub fn set(&mut self, values: impl Into<Vec<f64>>) -> Result<&mut Self, TensorError> {
        let values = values.into();
        if values.len() != self.data.len() {
            return Err(TensorError::SizeMismatch {
                expected: self.data.len(),
                actual: values.len(),
            });
        }
        self.data = values;
        Ok(self)
    }

    /// Zeroes every element in place, keeping the shape.
    #[inline]
    pub fn reset(&mut self) -> &mut Self {
        self.data.fill(0.0);
        self
    }

    /// First element.
    ///
    /// # Panics
    /// Panics if the tensor is shorter than 1 element. Callers must ensure
    /// sufficient dimensionality before using the positional accessors.
    #[inline]
    pub fn x(&self) -> f64 {
        self.data[0]
    }

    /// Second element.
    ///
    /// # Panics
    /// Panics if the tensor is shorter than 2 elements.
    #[inline]
    pub fn y(&self) -> f64 {
        self.data[1]
    }

    /// Third element.
    ///
    /// # Panics
    /// Panics if the tensor is shorter than 3 elements.
    #[inline]
    pub fn z(&self) -> f64 {
        self.data[2]
    }

    /// Fourth element.
    ///
    /// # Panics
    /// Panics if the tensor is shorter than 4 elements.
    #[inline]
    pub fn w(&self) -> f64 {
        self.data[3]
    }

    #[inline]
    pub fn set_x(&mut self, value: f64) {
        self.data[0] = value;
    }

    #[inline]
    pub fn set_y(&mut self, value: f64) {
        self.data[1] = value;
    }

    #[inline]
    pub fn set_z(&mut self, value: f64) {
        self.data[2] = value;
    }

    #[inline]
    pub fn set_w(&mut self, value: f64) {
        self.data[3] = value;
    }

    /// Reads the coordinate selected by `axis` (X, Y or Z).
    #[inline]
    pub fn value_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x(),
            Axis::Y => self.y(),
            Axis::Z => self.z(),
        }
    }

    /// Writes the coordinate selected by `axis` (X, Y or Z).
    #[inline]
    pub fn set_value_on(&mut self, axis: Axis, value: f64) -> &mut Self {
        match axis {
            Axis::X => self.set_x(value),
            Axis::Y => self.set_y(value),
            Axis::Z => self.set_z(value),
        }
        self
    }

    /// Pairwise element addition with another tensor of the same length.
    ///
    /// # Panics
    /// Panics if the buffer lengths differ.
    pub fn add(&self, other: &Tensor) -> Tensor {
        let data = self
            .data
            .iter()
            .zip_eq(other.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Tensor::from_parts(data, self.dimensions.clone())
    }

    /// Pairwise element subtraction with another tensor of the same length.
    ///
    /// # Panics
    /// Panics if the buffer lengths differ.
    pub fn sub(&self, other: &Tensor) -> Tensor {
        let data = self
            .data
            .iter()
            .zip_eq(other.data.iter())
            .map(|(a, b)| a - b)
            .collect();
        Tensor::from_parts(data, self.dimensions.clone())
    }

    /// Adds a scalar to every element.
    #[inline]
    pub fn add_scalar(&self, factor: f64) -> Tensor {
        self.map(|v| v + factor)
    }

    /// Subtracts a scalar from every element.
    #[inline]
    pub fn sub_scalar(&self, factor: f64) -> Tensor {
        self.map(|v| v - factor)
    }

    /// Multiplies every element by a scalar.
    #[inline]
    pub fn scale(&self, factor: f64) -> Tensor {
        self.map(|v| v * factor)
    }

    /// Negates every element. Equivalent to `scale(-1.0)`.
    #[inline]
    pub fn reverse(&self) -> Tensor {
        self.scale(-1.0)
    }

    /// Returns the length of the tensor: the integer part of the square root
    /// of the product of all elements.
    ///
    /// Note this is a product-based length, not a Euclidean norm.
    #[inline]
    pub fn length(&self) -> i64 {
        self.data.iter().product::<f64>().sqrt() as i64
    }

    /// Normalizes the tensor by its [`Tensor::length`]. When the length is
    /// zero the tensor is returned unchanged.
    pub fn normalize(&self) -> Tensor {
        let amt = self.length();
        if amt == 0 {
            return self.clone();
        }
        self.map(|v| v / amt as f64)
    }

    /// Calculates the cross product of two 3-element tensors.
    ///
    /// # Panics
    /// Panics if either tensor has fewer than 3 elements.
    pub fn cross(&self, other: &Tensor) -> Tensor {
        Tensor::new([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }

    /// Euclidean distance between two tensors of the same length.
    ///
    /// # Panics
    /// Panics if the buffer lengths differ.
    pub fn distance_to(&self, other: &Tensor) -> f64 {
        self.data
            .iter()
            .zip_eq(other.data.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Returns `true` if every element lies within the corresponding closed
    /// interval `[min[i], max[i]]`.
    pub fn contains(&self, min: &Tensor, max: &Tensor) -> bool {
        self.data
            .iter()
            .enumerate()
            .all(|(i, &v)| min.data[i] <= v && v <= max.data[i])
    }

    /// Returns `true` if every paired element of `min` and `max` forms a
    /// non-empty closed interval, i.e. `min[i] <= max[i]` throughout.
    pub fn intersects(min: &Tensor, max: &Tensor) -> bool {
        min.data
            .iter()
            .zip(max.data.iter())
            .all(|(lo, hi)| lo <= hi)
    }

    /// Applies `f` to every element, returning a new tensor of the same shape.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Tensor {
        let data = self.data.iter().copied().map(f).collect();
        Tensor::from_parts(data, self.dimensions.clone())
    }

    /// Reverses the order of the shape descriptor. The data buffer is left
    /// untouched; this is a shape-only transpose.
    pub fn transpose(&self) -> Tensor {
        let mut dimensions = self.dimensions.clone();
        dimensions.reverse();
        Tensor::from_parts(self.data.clone(), dimensions)
    }

    /// Translates this tensor by `n` steps of the direction's unit vector.
    pub fn offset(&self, dir: Direction, n: i64) -> Tensor {
        if n == 0 {
            return self.clone();
        }
        self.add(&dir.direction_vec().scale(n as f64))
    }

    /// Reshapes the flat buffer into rows of `width` elements for display.
    /// The number of rows is `len / width`; any remainder is silently dropped.
    pub fn to_array(&self, width: usize) -> Vec<Vec<f64>> {
        self.data
            .chunks_exact(width)
            .map(|row| row.to_vec())
            .collect()
    }

    /// A human-readable rendering of [`Tensor::to_array`]. Debugging only;
    /// not round-trippable.
    pub fn to_array_string(&self, width: usize) -> String {
        let rows = self
            .to_array(width)
            .into_iter()
            .map(|row| format!("    [ {} ]", row.iter().format(" ")))
            .join("\n");
        format!("[\n{rows}\n]\n")
    }

    /// Iterates over the element values in buffer order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().copied()
    }
}

impl From<Vec<f64>> for Tensor {
    #[inline]
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for Tensor {
    #[inline]
    fn from(values: [f64; N]) -> Self {
        Self::new(values)
    }
}

/// Tensors compare by buffer contents only; the shape is ignored.
impl PartialEq for Tensor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// A tensor equals a scalar when every element equals that scalar.
impl PartialEq<f64> for Tensor {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.data.iter().all(|v| v == other)
    }
}

impl std::ops::Add for Tensor {
    type Output = Tensor;

    #[inline]
    fn add(self, rhs: Tensor) -> Tensor {
        Tensor::add(&self, &rhs)
    }
}

impl std::ops::Sub for Tensor {
    type Output = Tensor;

    #[inline]
    fn sub(self, rhs: Tensor) -> Tensor {
        Tensor::sub(&self, &rhs)
    }
}

impl std::ops::Mul<f64> for Tensor {
    type Output = Tensor;

    #[inline]
    fn mul(self, rhs: f64) -> Tensor {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Tensor {
    type Output = Tensor;

    #[inline]
    fn neg(self) -> Tensor {
        self.reverse()
    }
}

impl<'a> IntoIterator for &'a Tensor {
    type Item = f64;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, f64>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter().copied()
    }
}

/// Parses a comma-separated value list. The result is always 1-D: the
/// textual form encodes no shape information.
impl FromStr for Tensor {
    type Err = TensorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Tensor::new(data))
    }
}
