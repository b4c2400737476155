use core::fmt;

/// Returned when a slice of the wrong length is converted into a vector or
/// quaternion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected {} components, found {}", self.expected, self.found)
    }
}

impl std::error::Error for LengthMismatch {}
