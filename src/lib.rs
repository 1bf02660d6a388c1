//! N-dimensional numeric primitives for geometry and graphics code.
//!
//! ## Key Components
//! 1. **Tensor**: a flat `f64` buffer plus a shape descriptor, with
//!    element-wise arithmetic, axis accessors, and containment tests. Mostly
//!    used as a fixed small vector of 3 or 4 elements.
//! 2. **Direction**: the closed set of 6 axis-aligned directions with their
//!    opposite/rotation/axis relationships, plus the `Axis`,
//!    `AxisDirection`, and `Plane` groupings.
//! 3. **Cuboid**: an axis-aligned bounding box built from two corner
//!    tensors, with spatial queries and swept-axis collision offsets.
//!
//! Everything here is pure, synchronous computation over in-memory buffers.
//! Instances are not safe for concurrent mutation; clone before sharing
//! across threads.

pub mod cuboid;
pub mod direction;
pub mod tensor;

pub use cuboid::{Cuboid, CuboidError, SizeType};
pub use direction::{Axis, AxisDirection, Direction, DirectionError, Plane};
pub use tensor::{Tensor, TensorError};
