use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// Attempted to divide a [`Pos2`] by zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("division of a vector by zero")]
pub struct DivisionByZero;

/// Simple (x, y) coordinate / vector
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Pos2 {
    /// Position on the x-axis.
    pub x: f32,
    /// Position on the y-axis.
    pub y: f32,
}

impl Pos2 {
    /// Create a new position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Return the null vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Return the position's length squared.
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Return the position's length.
    pub fn length(self) -> f32 {
        f64::from(self.x * self.x + self.y * self.y).sqrt() as f32
    }

    /// Return the dot product.
    pub fn dot(self, other: Self) -> f32 {
        (self.x * other.x) + (self.y * other.y)
    }

    /// Return the distance to another position.
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Divide both coordinates by `rhs`.
    ///
    /// Dividing by zero is an error rather than producing non-finite coordinates.
    pub fn try_div(self, rhs: f32) -> Result<Self, DivisionByZero> {
        if rhs == 0.0 {
            return Err(DivisionByZero);
        }

        Ok(Self::new(self.x / rhs, self.y / rhs))
    }

    /// Normalize the coordinates with respect to the vector's length.
    pub fn normalize(self) -> Result<Self, DivisionByZero> {
        self.try_div(self.length())
    }

    /// Linear interpolation between `self` and `other`.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Add for Pos2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Pos2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Pos2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Pos2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Pos2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Pos2 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl Display for Pos2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

impl Debug for Pos2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(Pos2::new(1.0, 2.0).try_div(0.0), Err(DivisionByZero));
        assert_eq!(Pos2::zero().normalize(), Err(DivisionByZero));
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = Pos2::new(3.0, 4.0).normalize().unwrap();

        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }
}
