use derive_more::Display;
use thiserror::Error;

use crate::tensor::Tensor;

#[derive(Debug, Error)]
pub enum DirectionError {
    #[error("unable to rotate vertical direction {0}")]
    NoRotation(Direction),
}

/// The 6 axis-aligned directions with their offset vectors.
///
/// The discriminant order is the canonical index used by
/// [`Direction::by_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[display("down")]
    Down,
    #[display("up")]
    Up,
    #[display("north")]
    North,
    #[display("south")]
    South,
    #[display("west")]
    West,
    #[display("east")]
    East,
}

/// All directions in index order.
pub const ALL: [Direction; 6] = [
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::South,
    Direction::West,
    Direction::East,
];

/// Horizontal directions in horizontal-index order.
const HORIZONTAL: [Direction; 4] = [
    Direction::South,
    Direction::West,
    Direction::North,
    Direction::East,
];

impl Direction {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The position of this direction in the horizontal rotation order, or
    /// `None` for the vertical directions.
    #[inline]
    pub const fn horizontal_index(self) -> Option<usize> {
        match self {
            Self::Down | Self::Up => None,
            Self::South => Some(0),
            Self::West => Some(1),
            Self::North => Some(2),
            Self::East => Some(3),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Down => Self::Up,
            Self::Up => Self::Down,
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Rotates 90 degrees clockwise around the Y axis. Only the horizontal
    /// directions rotate; UP and DOWN surface an error.
    pub fn rotate_clockwise(self) -> Result<Self, DirectionError> {
        match self {
            Self::North => Ok(Self::East),
            Self::East => Ok(Self::South),
            Self::South => Ok(Self::West),
            Self::West => Ok(Self::North),
            dir => Err(DirectionError::NoRotation(dir)),
        }
    }

    /// Rotates 90 degrees counter-clockwise around the Y axis. Only the
    /// horizontal directions rotate; UP and DOWN surface an error.
    pub fn rotate_counter_clockwise(self) -> Result<Self, DirectionError> {
        match self {
            Self::North => Ok(Self::West),
            Self::West => Ok(Self::South),
            Self::South => Ok(Self::East),
            Self::East => Ok(Self::North),
            dir => Err(DirectionError::NoRotation(dir)),
        }
    }

    #[inline]
    pub const fn axis_direction(self) -> AxisDirection {
        match self {
            Self::Up | Self::South | Self::East => AxisDirection::Positive,
            Self::Down | Self::North | Self::West => AxisDirection::Negative,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::West | Self::East => Axis::X,
            Self::Down | Self::Up => Axis::Y,
            Self::North | Self::South => Axis::Z,
        }
    }

    #[inline]
    pub const fn x_offset(self) -> i64 {
        match self {
            Self::West => -1,
            Self::East => 1,
            _ => 0,
        }
    }

    #[inline]
    pub const fn y_offset(self) -> i64 {
        match self {
            Self::Down => -1,
            Self::Up => 1,
            _ => 0,
        }
    }

    #[inline]
    pub const fn z_offset(self) -> i64 {
        match self {
            Self::North => -1,
            Self::South => 1,
            _ => 0,
        }
    }

    /// The unit offset vector of this direction as a 3-element tensor.
    #[inline]
    pub fn direction_vec(self) -> Tensor {
        Tensor::new([
            self.x_offset() as f64,
            self.y_offset() as f64,
            self.z_offset() as f64,
        ])
    }

    /// The compass angle of a horizontal direction in degrees: south is 0,
    /// west 90, north 180, east 270. Vertical directions yield 0.
    #[inline]
    pub fn horizontal_angle(self) -> f64 {
        let index = self.horizontal_index().unwrap_or(0);
        ((index & 3) * 90) as f64
    }

    /// Looks a direction up by its lowercase id, case-insensitively.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "down" => Some(Self::Down),
            "up" => Some(Self::Up),
            "north" => Some(Self::North),
            "south" => Some(Self::South),
            "west" => Some(Self::West),
            "east" => Some(Self::East),
            _ => None,
        }
    }

    /// Looks a direction up by index, wrapping modulo 6 so that any integer
    /// (negative included) maps onto a direction.
    #[inline]
    pub fn by_index(index: i64) -> Self {
        ALL[index.rem_euclid(ALL.len() as i64) as usize]
    }

    /// Looks a horizontal direction up by horizontal index, wrapping modulo 4.
    #[inline]
    pub fn by_horizontal_index(index: i64) -> Self {
        HORIZONTAL[index.rem_euclid(HORIZONTAL.len() as i64) as usize]
    }

    /// The horizontal direction facing the given compass angle in degrees.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::by_horizontal_index(((angle / 90.0 + 0.5).floor() as i64) & 3)
    }

    /// The direction pointing along `axis` with the given sign.
    pub const fn from_axis(sign: AxisDirection, axis: Axis) -> Self {
        match (axis, sign) {
            (Axis::X, AxisDirection::Positive) => Self::East,
            (Axis::X, AxisDirection::Negative) => Self::West,
            (Axis::Y, AxisDirection::Positive) => Self::Up,
            (Axis::Y, AxisDirection::Negative) => Self::Down,
            (Axis::Z, AxisDirection::Positive) => Self::South,
            (Axis::Z, AxisDirection::Negative) => Self::North,
        }
    }

    /// The direction whose unit vector maximizes the dot product with the
    /// given vector. The zero vector yields NORTH.
    pub fn nearest(x: f64, y: f64, z: f64) -> Self {
        let mut nearest = Self::North;
        let mut best = f64::MIN_POSITIVE;
        for dir in ALL {
            let dot = x * dir.x_offset() as f64
                + y * dir.y_offset() as f64
                + z * dir.z_offset() as f64;
            if dot > best {
                best = dot;
                nearest = dir;
            }
        }
        nearest
    }

    /// A uniformly random direction.
    #[inline]
    pub fn random() -> Self {
        ALL[fastrand::usize(..ALL.len())]
    }
}

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[display("x")]
    X,
    #[display("y")]
    Y,
    #[display("z")]
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Y)
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::X | Self::Z)
    }

    /// Extracts the matching coordinate from a triple.
    #[inline]
    pub const fn coordinate(self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Self::X => x,
            Self::Y => y,
            Self::Z => z,
        }
    }

    #[inline]
    pub const fn plane(self) -> Plane {
        match self {
            Self::X | Self::Z => Plane::Horizontal,
            Self::Y => Plane::Vertical,
        }
    }

    /// Returns `true` if the direction runs along this axis.
    #[inline]
    pub fn test(self, dir: Direction) -> bool {
        dir.axis() == self
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }

    #[inline]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(..Self::ALL.len())]
    }
}

/// The sign of a direction along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDirection {
    #[display("Towards positive")]
    Positive,
    #[display("Towards negative")]
    Negative,
}

impl AxisDirection {
    #[inline]
    pub const fn offset(self) -> i64 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

/// Groups the directions into the horizontal compass ring and the vertical
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Plane {
    #[display("horizontal")]
    Horizontal,
    #[display("vertical")]
    Vertical,
}

impl Plane {
    /// The member directions, horizontal ones in compass order N, E, S, W.
    #[inline]
    pub const fn directions(self) -> &'static [Direction] {
        match self {
            Self::Horizontal => &[
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West,
            ],
            Self::Vertical => &[Direction::Up, Direction::Down],
        }
    }

    #[inline]
    pub const fn axes(self) -> &'static [Axis] {
        match self {
            Self::Horizontal => &[Axis::X, Axis::Z],
            Self::Vertical => &[Axis::Y],
        }
    }

    /// Returns `true` if the direction lies in this plane.
    #[inline]
    pub fn test(self, dir: Direction) -> bool {
        dir.axis().plane() == self
    }

    /// A uniformly random direction from this plane.
    #[inline]
    pub fn random(self) -> Direction {
        let dirs = self.directions();
        dirs[fastrand::usize(..dirs.len())]
    }

    #[inline]
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        self.directions().iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }

    #[test]
    fn index_lookup_wraps_modulo_six() {
        for i in -12..12 {
            assert_eq!(Direction::by_index(i), Direction::by_index(i + 6));
        }
        assert_eq!(Direction::by_index(0), Direction::Down);
        assert_eq!(Direction::by_index(5), Direction::East);
        assert_eq!(Direction::by_index(-1), Direction::East);
    }

    #[test]
    fn horizontal_index_lookup_wraps_modulo_four() {
        assert_eq!(Direction::by_horizontal_index(0), Direction::South);
        assert_eq!(Direction::by_horizontal_index(4), Direction::South);
        assert_eq!(Direction::by_horizontal_index(-1), Direction::East);
    }

    #[test]
    fn clockwise_rotation_cycles_the_compass() {
        let mut dir = Direction::North;
        let expected = [
            Direction::East,
            Direction::South,
            Direction::West,
            Direction::North,
        ];
        for want in expected {
            dir = dir.rotate_clockwise().unwrap();
            assert_eq!(dir, want);
        }
    }

    #[test]
    fn counter_clockwise_undoes_clockwise() {
        for dir in Plane::Horizontal.iter() {
            let rotated = dir.rotate_clockwise().unwrap();
            assert_eq!(rotated.rotate_counter_clockwise().unwrap(), dir);
        }
    }

    #[test]
    fn vertical_directions_refuse_rotation() {
        assert!(matches!(
            Direction::Up.rotate_clockwise(),
            Err(DirectionError::NoRotation(Direction::Up))
        ));
        assert!(Direction::Down.rotate_counter_clockwise().is_err());
    }

    #[test]
    fn table_data_matches_the_canonical_layout() {
        assert_eq!(Direction::Down.index(), 0);
        assert_eq!(Direction::East.index(), 5);
        assert_eq!(Direction::North.axis(), Axis::Z);
        assert_eq!(Direction::North.axis_direction(), AxisDirection::Negative);
        assert_eq!(Direction::East.axis_direction(), AxisDirection::Positive);
        assert_eq!(Direction::Up.horizontal_index(), None);
        assert_eq!(Direction::South.horizontal_index(), Some(0));
        assert_eq!(Direction::North.direction_vec(), Tensor::new([0.0, 0.0, -1.0]));
        assert_eq!(Direction::East.direction_vec(), Tensor::new([1.0, 0.0, 0.0]));
    }

    #[test]
    fn horizontal_angles_step_by_ninety_degrees() {
        assert_eq!(Direction::South.horizontal_angle(), 0.0);
        assert_eq!(Direction::West.horizontal_angle(), 90.0);
        assert_eq!(Direction::North.horizontal_angle(), 180.0);
        assert_eq!(Direction::East.horizontal_angle(), 270.0);
    }

    #[test]
    fn from_angle_snaps_to_the_nearest_quadrant() {
        assert_eq!(Direction::from_angle(0.0), Direction::South);
        assert_eq!(Direction::from_angle(44.0), Direction::South);
        assert_eq!(Direction::from_angle(89.0), Direction::West);
        assert_eq!(Direction::from_angle(180.0), Direction::North);
        assert_eq!(Direction::from_angle(270.0), Direction::East);
        assert_eq!(Direction::from_angle(360.0), Direction::South);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(Direction::by_name("up"), Some(Direction::Up));
        assert_eq!(Direction::by_name("NORTH"), Some(Direction::North));
        assert_eq!(Direction::by_name("sideways"), None);
        assert_eq!(Direction::Up.to_string(), "up");
    }

    #[test]
    fn from_axis_covers_all_six_directions() {
        use AxisDirection::{Negative, Positive};
        assert_eq!(Direction::from_axis(Positive, Axis::X), Direction::East);
        assert_eq!(Direction::from_axis(Negative, Axis::X), Direction::West);
        assert_eq!(Direction::from_axis(Positive, Axis::Y), Direction::Up);
        assert_eq!(Direction::from_axis(Negative, Axis::Y), Direction::Down);
        assert_eq!(Direction::from_axis(Positive, Axis::Z), Direction::South);
        assert_eq!(Direction::from_axis(Negative, Axis::Z), Direction::North);
    }

    #[test]
    fn nearest_maximizes_the_dot_product() {
        assert_eq!(Direction::nearest(0.3, 0.9, 0.0), Direction::Up);
        assert_eq!(Direction::nearest(-2.0, 1.0, 0.0), Direction::West);
        assert_eq!(Direction::nearest(0.0, 0.0, 0.7), Direction::South);
        // The zero vector has no winner; the seed direction stands.
        assert_eq!(Direction::nearest(0.0, 0.0, 0.0), Direction::North);
    }

    #[test]
    fn axes_know_their_orientation_and_plane() {
        assert!(Axis::Y.is_vertical());
        assert!(!Axis::Y.is_horizontal());
        assert!(Axis::X.is_horizontal());
        assert_eq!(Axis::X.plane(), Plane::Horizontal);
        assert_eq!(Axis::Y.plane(), Plane::Vertical);
        assert_eq!(Axis::Z.coordinate(1.0, 2.0, 3.0), 3.0);
        assert!(Axis::Y.test(Direction::Up));
        assert!(!Axis::Y.test(Direction::East));
        assert_eq!(Axis::by_name("Z"), Some(Axis::Z));
    }

    #[test]
    fn planes_partition_the_directions() {
        for dir in ALL {
            let plane = dir.axis().plane();
            assert!(plane.test(dir));
            assert!(plane.directions().contains(&dir));
        }
        assert_eq!(Plane::Horizontal.directions().len(), 4);
        assert_eq!(Plane::Vertical.directions().len(), 2);
        assert_eq!(Plane::Horizontal.axes(), &[Axis::X, Axis::Z]);
    }

    #[test]
    fn random_selection_stays_in_domain() {
        fastrand::seed(42);
        for _ in 0..32 {
            assert!(Plane::Horizontal.test(Plane::Horizontal.random()));
            assert!(Plane::Vertical.test(Plane::Vertical.random()));
            let _ = Direction::random();
            let _ = Axis::random();
        }
    }

    #[test]
    fn axis_direction_signs() {
        assert_eq!(AxisDirection::Positive.offset(), 1);
        assert_eq!(AxisDirection::Negative.offset(), -1);
        assert_eq!(AxisDirection::Positive.to_string(), "Towards positive");
    }
}
