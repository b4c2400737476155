use core::ops;
use core::fmt;
use core::f64::consts::PI;

use bytemuck::{Pod, Zeroable};

use crate::common::{RandomSource, EPSILON};
use crate::error::LengthMismatch;
use crate::vec::{Vec3, Vec4};
use crate::mat::{Mat3, Mat4};

/// Order in which the per-axis rotations of an euler triple are composed.
/// `XYZ` is `qx * qy * qz`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum EulerOrder {
    #[default]
    XYZ,
    XZY,
    YXZ,
    YZX,
    ZXY,
    ZYX,
}

/// Quaternion stored as a `Vec4`: `x, y, z` imaginary, `w` real.
///
/// Rotation operations assume unit length and do not check it.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Quat(pub Vec4);

impl Quat {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self(Vec4 { x, y, z, w })
    }

    #[inline]
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self(v)
    }

    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        self.0
    }

    #[inline]
    pub fn from_array(a: [f64; 4]) -> Self {
        Self(Vec4::from_array(a))
    }

    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        self.0.to_array()
    }

    #[inline] pub fn x(&self) -> f64 { self.0.x }
    #[inline] pub fn y(&self) -> f64 { self.0.y }
    #[inline] pub fn z(&self) -> f64 { self.0.z }
    #[inline] pub fn w(&self) -> f64 { self.0.w }

    #[inline]
    pub fn re(&self) -> f64 {
        self.0.w
    }

    #[inline]
    pub fn im(&self) -> Vec3 {
        self.0.xyz()
    }

    /// Rotation of `angle` radians around the unit vector `axis`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Axis and angle (radians) of a unit quaternion.
    ///
    /// The result is an equivalent rotation, not necessarily the pair the
    /// quaternion was built from. Without rotation the axis is undefined and
    /// `(1, 0, 0)` is returned.
    pub fn axis_angle(self) -> (Vec3, f64) {
        let angle = self.w().acos() * 2.0;
        let s = (angle * 0.5).sin();

        if s == 0.0 {
            log::trace!("axis of identity rotation {} is undefined", self);
            (Vec3::new(1.0, 0.0, 0.0), angle)
        } else {
            (self.im() / s, angle)
        }
    }

    /// Angular distance between two unit quaternions, in radians.
    pub fn angle_to(self, b: Quat) -> f64 {
        let d = self.dot(b);
        (2.0 * d * d - 1.0).min(1.0).acos()
    }

    /// Hamilton product, the rotation `b` followed by `self`.
    #[inline]
    pub fn multiply(self, b: Quat) -> Quat {
        self * b
    }

    /// `self * (rotation of angle around x)`.
    pub fn rotate_x(self, angle: f64) -> Quat {
        let (bx, bw) = (angle * 0.5).sin_cos();
        let Vec4 { x, y, z, w } = self.0;

        Quat::new(
            x * bw + w * bx,
            y * bw + z * bx,
            z * bw - y * bx,
            w * bw - x * bx,
        )
    }

    /// `self * (rotation of angle around y)`.
    pub fn rotate_y(self, angle: f64) -> Quat {
        let (by, bw) = (angle * 0.5).sin_cos();
        let Vec4 { x, y, z, w } = self.0;

        Quat::new(
            x * bw - z * by,
            y * bw + w * by,
            z * bw + x * by,
            w * bw - y * by,
        )
    }

    /// `self * (rotation of angle around z)`.
    pub fn rotate_z(self, angle: f64) -> Quat {
        let (bz, bw) = (angle * 0.5).sin_cos();
        let Vec4 { x, y, z, w } = self.0;

        Quat::new(
            x * bw + y * bz,
            y * bw - x * bz,
            z * bw + w * bz,
            w * bw - z * bz,
        )
    }

    /// Recompute `w` from `x, y, z` assuming unit length. The existing `w`
    /// is ignored.
    #[inline]
    pub fn calculate_w(self) -> Quat {
        let Vec4 { x, y, z, .. } = self.0;
        Quat::new(x, y, z, (1.0 - x * x - y * y - z * z).abs().sqrt())
    }

    /// Spherical linear interpolation along the shortest arc.
    pub fn slerp(self, b: Quat, t: f64) -> Quat {
        let mut cosom = self.dot(b);
        let mut b = b;

        if cosom < 0.0 {
            cosom = -cosom;
            b = -b;
        }

        let (scale0, scale1) = if 1.0 - cosom > EPSILON {
            let omega = cosom.acos();
            let sinom = omega.sin();
            (((1.0 - t) * omega).sin() / sinom, (t * omega).sin() / sinom)
        } else {
            // sin(omega) is too close to zero, fall back to lerp
            (1.0 - t, t)
        };

        Quat(self.0 * scale0 + b.0 * scale1)
    }

    /// Spherical quadrangle interpolation through the control points `b`, `c`.
    pub fn sqlerp(self, b: Quat, c: Quat, d: Quat, t: f64) -> Quat {
        let t1 = self.slerp(d, t);
        let t2 = b.slerp(c, t);

        t1.slerp(t2, 2.0 * t * (1.0 - t))
    }

    /// `conjugate / |q|^2`; the zero quaternion inverts to itself.
    pub fn invert(self) -> Quat {
        let dot = self.length_squared();
        if dot == 0.0 {
            log::trace!("inverting zero quaternion");
            return Quat(Vec4::zero());
        }

        Quat(self.conjugate().0 * (1.0 / dot))
    }

    /// Inverse of a unit quaternion.
    #[inline]
    pub fn conjugate(self) -> Quat {
        Quat::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// Shoemake's conversion of a rotation matrix. The result is not
    /// normalized.
    pub fn from_mat3(m: &Mat3) -> Quat {
        let e = &m.e;
        let trace = m.trace();
        let mut out = [0.0; 4];

        if trace > 0.0 {
            let mut root = (trace + 1.0).sqrt(); // 2w
            out[3] = 0.5 * root;
            root = 0.5 / root; // 1/(4w)
            out[0] = (e[1][2] - e[2][1]) * root;
            out[1] = (e[2][0] - e[0][2]) * root;
            out[2] = (e[0][1] - e[1][0]) * root;
        } else {
            let mut i = 0;
            if e[1][1] > e[0][0] {
                i = 1;
            }
            if e[2][2] > e[i][i] {
                i = 2;
            }
            let j = (i + 1) % 3;
            let k = (i + 2) % 3;

            let mut root = (e[i][i] - e[j][j] - e[k][k] + 1.0).sqrt();
            out[i] = 0.5 * root;
            root = 0.5 / root;
            out[3] = (e[j][k] - e[k][j]) * root;
            out[j] = (e[j][i] + e[i][j]) * root;
            out[k] = (e[k][i] + e[i][k]) * root;
        }

        Quat::from_array(out)
    }

    /// Euler angles in degrees, composed in `XYZ` order.
    #[inline]
    pub fn from_euler(x: f64, y: f64, z: f64) -> Quat {
        Quat::from_euler_ordered(x, y, z, EulerOrder::XYZ)
    }

    /// Euler angles in degrees, composed in the given order.
    pub fn from_euler_ordered(x: f64, y: f64, z: f64, order: EulerOrder) -> Quat {
        let half_to_rad = PI / 360.0;

        let (sx, cx) = (x * half_to_rad).sin_cos();
        let (sy, cy) = (y * half_to_rad).sin_cos();
        let (sz, cz) = (z * half_to_rad).sin_cos();

        match order {
            EulerOrder::XYZ => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::XZY => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::YXZ => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::YZX => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::ZXY => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::ZYX => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
        }
    }

    /// Shortest rotation taking the unit vector `from` onto the unit vector `to`.
    pub fn rotation_to(from: Vec3, to: Vec3) -> Quat {
        let dot = from.dot(to);

        if dot < -0.999999 {
            // Opposite vectors, any perpendicular axis works.
            let mut axis = Vec3::new(1.0, 0.0, 0.0).cross(from);
            if axis.length() < 0.000001 {
                axis = Vec3::new(0.0, 1.0, 0.0).cross(from);
            }
            log::trace!("rotation_to between opposite vectors, using axis {}", axis);
            Quat::from_axis_angle(axis.normalized(), PI)
        } else if dot > 0.999999 {
            Quat::identity()
        } else {
            let c = from.cross(to);
            Quat::new(c.x, c.y, c.z, 1.0 + dot).normalized()
        }
    }

    /// Rotation taking the default frame onto the orthonormal basis
    /// `right`, `up`, `-view`.
    pub fn from_axes(view: Vec3, right: Vec3, up: Vec3) -> Quat {
        let m = Mat3::from_columns(&[right, up, -view]);
        Quat::from_mat3(&m).normalized()
    }

    /// Uniformly distributed unit quaternion.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Quat {
        let u1 = rng.next_f64();
        let u2 = rng.next_f64();
        let u3 = rng.next_f64();

        let a = (1.0 - u1).sqrt();
        let b = u1.sqrt();
        let (s2, c2) = (2.0 * PI * u2).sin_cos();
        let (s3, c3) = (2.0 * PI * u3).sin_cos();

        Quat::new(a * s2, a * c2, b * s3, b * c3)
    }

    pub fn exp(self) -> Quat {
        let v = self.im();
        let r = v.length();
        let et = self.w().exp();
        let s = if r > 0.0 { et * r.sin() / r } else { 0.0 };

        Quat::new(v.x * s, v.y * s, v.z * s, et * r.cos())
    }

    pub fn ln(self) -> Quat {
        let v = self.im();
        let r = v.length();
        let t = if r > 0.0 { r.atan2(self.w()) / r } else { 0.0 };

        Quat::new(v.x * t, v.y * t, v.z * t, 0.5 * self.length_squared().ln())
    }

    pub fn pow(self, s: f64) -> Quat {
        self.ln().scale(s).exp()
    }

    #[inline]
    pub fn to_mat3(self) -> Mat3 {
        let Vec4 { x, y, z, w } = self.0;

        let xy = x * y;
        let xz = x * z;
        let xw = x * w;
        let yz = y * z;
        let yw = y * w;
        let zw = z * w;
        let x_squared = x * x;
        let y_squared = y * y;
        let z_squared = z * z;

        let mut m = Mat3::new();
        m.e[0][0] = 1. - 2. * (y_squared + z_squared);
        m.e[1][0] = 2. * (xy - zw);
        m.e[2][0] = 2. * (xz + yw);

        m.e[0][1] = 2. * (xy + zw);
        m.e[1][1] = 1. - 2. * (x_squared + z_squared);
        m.e[2][1] = 2. * (yz - xw);

        m.e[0][2] = 2. * (xz - yw);
        m.e[1][2] = 2. * (yz + xw);
        m.e[2][2] = 1. - 2. * (x_squared + y_squared);

        m
    }

    #[inline]
    pub fn to_mat4(self) -> Mat4 {
        let r = self.to_mat3();

        let mut m = Mat4::identity();
        for (c, column) in r.e.iter().enumerate() {
            m.e[c][0..3].copy_from_slice(column);
        }

        m
    }

    // Vec4 arithmetic

    #[inline]
    pub fn dot(self, b: Quat) -> f64 {
        self.0.dot(b.0)
    }

    #[inline]
    pub fn scale(self, s: f64) -> Quat {
        Quat(self.0.scale(s))
    }

    #[inline]
    pub fn lerp(self, b: Quat, t: f64) -> Quat {
        Quat(self.0.lerp(b.0, t))
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.0.length()
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn normalized(self) -> Quat {
        Quat(self.0.normalized())
    }

    #[inline]
    pub fn exact_eq(self, b: Quat) -> bool {
        self.0.exact_eq(b.0)
    }

    #[inline]
    pub fn approx_eq(self, b: Quat) -> bool {
        self.0.approx_eq(b.0)
    }

    #[inline]
    pub fn approx_eq_eps(self, b: Quat, eps: f64) -> bool {
        self.0.approx_eq_eps(b.0, eps)
    }
}

impl Default for Quat {
    #[inline]
    fn default() -> Self {
        Quat::identity()
    }
}

impl TryFrom<&[f64]> for Quat {
    type Error = LengthMismatch;

    fn try_from(s: &[f64]) -> Result<Self, Self::Error> {
        Vec4::try_from(s).map(Quat)
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Quat(x: {:.prec$}, y: {:.prec$}, z: {:.prec$}, w: {:.prec$})",
               self.x(), self.y(), self.z(), self.w(),
               prec = f.precision().unwrap_or(3))
    }
}

impl ops::Add<Quat> for Quat {
    type Output = Quat;

    #[inline]
    fn add(self, rhs: Quat) -> Quat {
        Quat(self.0 + rhs.0)
    }
}

impl ops::Neg for Quat {
    type Output = Quat;

    #[inline]
    fn neg(self) -> Quat {
        Quat(-self.0)
    }
}

impl ops::Mul<f64> for Quat {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: f64) -> Quat {
        self.scale(rhs)
    }
}

impl ops::Mul<Quat> for f64 {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: Quat) -> Quat {
        rhs.scale(self)
    }
}

impl ops::Mul<Quat> for Quat {
    type Output = Quat;

    #[inline]
    fn mul(self, rhs: Quat) -> Quat {
        let a = self.im();
        let b = rhs.im();

        let w = self.re() * rhs.re() - a.dot(b);
        let v = self.re() * b + rhs.re() * a + a.cross(b);
        Quat::new(v.x, v.y, v.z, w)
    }
}

impl ops::Mul<Vec3> for Quat {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.transform_quat(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};
    use rand::{rngs::StdRng, SeedableRng};

    fn axis(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3::new(x, y, z).normalized()
    }

    /// Same rotation, allowing for the `q` / `-q` double cover.
    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.approx_eq(b) || a.approx_eq(-b)
    }

    #[test]
    fn identity_is_the_default() {
        assert_eq!(Quat::default(), Quat::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(Quat::identity().to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Quat::identity() * Quat::new(1.0, 2.0, 3.0, 4.0), Quat::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn axis_angle_of_half_turn() {
        let q = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), PI);
        let (a, angle) = q.axis_angle();

        assert_relative_eq!(angle, PI, epsilon = EPSILON);
        assert!(a.approx_eq(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn axis_angle_round_trips_to_an_equivalent_rotation() {
        let n = axis(1.0, -2.0, 0.5);
        for i in 1..16 {
            let theta = PI * i as f64 / 16.0;
            let q = Quat::from_axis_angle(n, theta);
            let (a, angle) = q.axis_angle();
            assert!(same_rotation(Quat::from_axis_angle(a, angle), q));
            assert_relative_eq!(a.length(), 1.0, epsilon = EPSILON);
        }

        // -90 degrees comes back as 90 degrees around the flipped axis.
        let q = Quat::from_axis_angle(n, -FRAC_PI_2);
        let (a, angle) = q.axis_angle();
        assert_relative_eq!(angle, FRAC_PI_2, epsilon = EPSILON);
        assert!(a.approx_eq(-n));
    }

    #[test]
    fn axis_angle_without_rotation_defaults_to_x() {
        let (a, angle) = Quat::identity().axis_angle();
        assert_eq!(a, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let a = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let b = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), FRAC_PI_2);
        let v = Vec3::new(0.0, 1.0, 0.0);

        // b takes y to z, a leaves z alone.
        assert!(((a * b) * v).approx_eq(Vec3::new(0.0, 0.0, 1.0)));
        assert!(((a * b) * v).approx_eq(a * (b * v)));
        // a takes y to -x, b leaves x alone.
        assert!(((b * a) * v).approx_eq(Vec3::new(-1.0, 0.0, 0.0)));

        assert_eq!(a.multiply(b), a * b);

        // Hamilton basis: i * j = k
        let i = Quat::new(1.0, 0.0, 0.0, 0.0);
        let j = Quat::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(i * j, Quat::new(0.0, 0.0, 1.0, 0.0));
        assert_eq!(j * i, Quat::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn rotate_axes_match_multiply() {
        let q = Quat::from_axis_angle(axis(0.3, 1.0, -0.2), 1.1);
        let angle = 0.7;

        let x = q * Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), angle);
        let y = q * Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), angle);
        let z = q * Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), angle);

        assert!(q.rotate_x(angle).approx_eq(x));
        assert!(q.rotate_y(angle).approx_eq(y));
        assert!(q.rotate_z(angle).approx_eq(z));
    }

    #[test]
    fn calculate_w_ignores_existing_w() {
        let q = Quat::from_axis_angle(axis(1.0, 1.0, 0.0), 1.0);
        let broken = Quat::new(q.x(), q.y(), q.z(), 42.0);
        assert!(broken.calculate_w().approx_eq(q));

        // x^2 + y^2 + z^2 slightly above one.
        let w = Quat::new(0.6, 0.8, 0.0001, 0.0).calculate_w().w();
        assert!(w.is_finite());
        assert_relative_eq!(w, 0.0001, epsilon = 1e-9);
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let a = Quat::identity();
        let b = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);

        assert!(a.slerp(b, 0.0).approx_eq(a));
        assert!(a.slerp(b, 1.0).approx_eq(b));

        let half = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_4);
        assert!(a.slerp(b, 0.5).approx_eq(half));
    }

    #[test]
    fn slerp_takes_the_short_way() {
        let a = Quat::identity();
        let b = -Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);

        // b is stored in the far hemisphere but the midpoint is still 45 degrees.
        let mid = a.slerp(b, 0.5);
        assert!(mid.approx_eq(Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_4)));
        assert!(a.slerp(b, 1.0).approx_eq(-b));
    }

    #[test]
    fn slerp_of_nearly_equal_quaternions_is_linear() {
        let a = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.5);
        let b = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.5 + 1e-5);

        let s = a.slerp(b, 0.3);
        assert!(s.to_array().iter().all(|c| c.is_finite()));
        assert!(s.approx_eq(a.lerp(b, 0.3)));
        assert!(a.slerp(a, 0.5).approx_eq(a));
    }

    #[test]
    fn sqlerp_interpolates_between_endpoints() {
        let z = Vec3::new(0.0, 0.0, 1.0);
        let a = Quat::identity();
        let b = Quat::from_axis_angle(z, 0.2);
        let c = Quat::from_axis_angle(z, 0.6);
        let d = Quat::from_axis_angle(z, 0.8);

        assert!(a.sqlerp(b, c, d, 0.0).approx_eq(a));
        assert!(a.sqlerp(b, c, d, 1.0).approx_eq(d));

        let mid = a.sqlerp(b, c, d, 0.5);
        let expected = a.slerp(d, 0.5).slerp(b.slerp(c, 0.5), 0.5);
        assert!(mid.approx_eq(expected));
        assert!(mid.approx_eq(Quat::from_axis_angle(z, 0.4)));
    }

    #[test]
    fn invert_and_conjugate() {
        let q = Quat::from_axis_angle(axis(1.0, 2.0, 3.0), 0.9);
        assert!((q.invert() * q).approx_eq(Quat::identity()));
        assert!((q * q.invert()).approx_eq(Quat::identity()));
        assert!(q.conjugate().approx_eq(q.invert()));

        // Non-unit quaternions still invert, the conjugate does not.
        let p = Quat::new(1.0, 2.0, 3.0, 4.0);
        assert!((p.invert() * p).approx_eq(Quat::identity()));
        assert!(!(p.conjugate() * p).approx_eq(Quat::identity()));

        assert_eq!(Quat::new(0.0, 0.0, 0.0, 0.0).invert().length_squared(), 0.0);
    }

    #[test]
    fn from_euler_matches_sequential_rotations() {
        let (x, y, z) = (30.0f64, -45.0f64, 110.0f64);
        let qx = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), x.to_radians());
        let qy = Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), y.to_radians());
        let qz = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), z.to_radians());

        assert!(Quat::from_euler(x, y, z).approx_eq(qx * qy * qz));
        assert!(Quat::from_euler_ordered(x, y, z, EulerOrder::XZY).approx_eq(qx * qz * qy));
        assert!(Quat::from_euler_ordered(x, y, z, EulerOrder::YXZ).approx_eq(qy * qx * qz));
        assert!(Quat::from_euler_ordered(x, y, z, EulerOrder::YZX).approx_eq(qy * qz * qx));
        assert!(Quat::from_euler_ordered(x, y, z, EulerOrder::ZXY).approx_eq(qz * qx * qy));
        assert!(Quat::from_euler_ordered(x, y, z, EulerOrder::ZYX).approx_eq(qz * qy * qx));

        let q = Quat::from_euler(90.0, 0.0, 0.0);
        let h = FRAC_PI_4.sin();
        assert!(q.approx_eq(Quat::new(h, 0.0, 0.0, h)));
    }

    #[test]
    fn rotation_to_parallel_and_opposite() {
        let v = axis(0.2, -0.4, 0.9);
        assert!(Quat::rotation_to(v, v).approx_eq(Quat::identity()));

        for v in [v, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)] {
            let q = Quat::rotation_to(v, -v);
            assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
            assert_relative_eq!(q.w(), 0.0, epsilon = EPSILON);
            assert!((q * v).approx_eq(-v));
        }
    }

    #[test]
    fn rotation_to_general_case() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = axis(0.0, 1.0, 1.0);
        let q = Quat::rotation_to(a, b);

        assert!((q * a).approx_eq(b));
        assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
        // Shortest arc: the axis is perpendicular to both.
        assert_relative_eq!(q.im().dot(a), 0.0, epsilon = EPSILON);
        assert_relative_eq!(q.im().dot(b), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn from_mat3_covers_every_branch() {
        let v = Vec3::new(0.3, -1.2, 2.0);
        let cases = [
            (axis(1.0, 2.0, 3.0), 0.5),   // trace > 0
            (axis(1.0, 0.2, 0.1), 3.0),   // x dominant
            (axis(0.1, 1.0, -0.2), 3.0),  // y dominant
            (axis(-0.2, 0.1, 1.0), 3.0),  // z dominant
            (Vec3::new(0.0, 1.0, 0.0), PI),
        ];

        for (n, angle) in cases {
            let m = Mat3::rotation(n, angle);
            let q = Quat::from_mat3(&m);

            assert_relative_eq!(q.length(), 1.0, epsilon = EPSILON);
            assert!(v.transform_quat(q).approx_eq(m * v));
            assert!(same_rotation(q, Quat::from_axis_angle(n, angle)));
            assert!(q.to_mat3().approx_eq(&m));
        }
    }

    #[test]
    fn from_axes_builds_camera_orientation() {
        let view = Vec3::new(0.0, 0.0, -1.0);
        let right = Vec3::new(1.0, 0.0, 0.0);
        let up = Vec3::new(0.0, 1.0, 0.0);
        assert!(Quat::from_axes(view, right, up).approx_eq(Quat::identity()));

        // Looking down +x.
        let view = Vec3::new(1.0, 0.0, 0.0);
        let right = view.cross(up);
        let q = Quat::from_axes(view, right, up);
        assert!((q * Vec3::new(0.0, 0.0, -1.0)).approx_eq(view));
        assert!((q * Vec3::new(1.0, 0.0, 0.0)).approx_eq(right));
        assert!((q * Vec3::new(0.0, 1.0, 0.0)).approx_eq(up));
        assert!(same_rotation(q, Quat::from_axis_angle(up, -FRAC_PI_2)));
    }

    #[test]
    fn exp_ln_pow() {
        let q = Quat::from_axis_angle(axis(0.0, 1.0, 1.0), 0.8);

        assert!(q.ln().exp().approx_eq(q));
        assert!(q.pow(2.0).approx_eq(q * q));
        assert!(q.pow(0.5).pow(2.0).approx_eq(q));
        assert!(q.pow(0.0).approx_eq(Quat::identity()));

        assert!(Quat::identity().ln().approx_eq(Quat::new(0.0, 0.0, 0.0, 0.0)));
        assert!(Quat::new(0.0, 0.0, 0.0, 0.0).exp().approx_eq(Quat::identity()));
    }

    #[test]
    fn angle_between_rotations() {
        let z = Vec3::new(0.0, 0.0, 1.0);
        let a = Quat::from_axis_angle(z, 0.2);
        let b = Quat::from_axis_angle(z, 1.4);

        assert_relative_eq!(a.angle_to(b), 1.2, epsilon = EPSILON);
        assert_relative_eq!(a.angle_to(-b), 1.2, epsilon = EPSILON);
        assert_relative_eq!(a.angle_to(a), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn random_rotations_are_unit() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let q = Quat::random(&mut rng);
            assert_relative_eq!(q.length(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn to_mat4_embeds_rotation() {
        let q = Quat::from_axis_angle(axis(1.0, -1.0, 2.0), 0.6);
        let m = q.to_mat4();
        let p = Vec3::new(1.0, 2.0, 3.0);

        assert_eq!(m.e[3], [0.0, 0.0, 0.0, 1.0]);
        assert!(p.transform_mat4(&m).approx_eq(q * p));
        assert!((q * q).to_mat3().approx_eq(&(q.to_mat3() * q.to_mat3())));
    }

    #[test]
    fn delegates_to_vec4() {
        let a = Quat::new(1.0, 2.0, 3.0, 4.0);
        let b = Quat::new(0.5, 0.0, -1.0, 2.0);

        assert_eq!(a + b, Quat::new(1.5, 2.0, 2.0, 6.0));
        assert_eq!(a * 2.0, Quat::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(2.0 * a, a.scale(2.0));
        assert_eq!(a.dot(b), 5.5);
        assert_eq!(a.length_squared(), 30.0);
        assert_eq!(a.lerp(b, 0.5), Quat::new(0.75, 1.0, 1.0, 3.0));
        assert_relative_eq!(a.normalized().length(), 1.0, epsilon = EPSILON);
        assert!(a.exact_eq(Quat::from_vec4(Vec4::new(1.0, 2.0, 3.0, 4.0))));
        assert!(a.approx_eq(Quat::new(1.0, 2.0, 3.0, 4.000001)));
        assert_eq!(a.to_vec4(), a.0);

        let s = [0.0, 0.0, 0.0, 1.0];
        assert_eq!(Quat::try_from(&s[..]), Ok(Quat::identity()));
        assert!(Quat::try_from(&s[1..]).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Quat::identity()), "Quat(x: 0.000, y: 0.000, z: 0.000, w: 1.000)");
    }
}
