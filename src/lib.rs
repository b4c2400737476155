//! 2D/3D/4D vectors and quaternions for geometry code.
//!
//! Everything lives in the `math` crate; this crate re-exports it under one
//! name.
//!
//! ```
//! use linmath::{Quat, Vec3};
//!
//! let q = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
//! let v = q * Vec3::new(1.0, 0.0, 0.0);
//! assert!(v.approx_eq(Vec3::new(0.0, 1.0, 0.0)));
//! ```

pub use math::{common, error, mat, quat, vec};

pub use math::common::{RandomSource, EPSILON};
pub use math::error::LengthMismatch;
pub use math::mat::{Mat3, Mat4};
pub use math::quat::{EulerOrder, Quat};
pub use math::vec::{Vec2, Vec3, Vec4};
