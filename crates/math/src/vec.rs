use core::ops::{self, Add, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign, Neg};
use core::fmt;
use core::f64::consts::PI;

use bytemuck::{Pod, Zeroable};

use crate::common::{self, RandomSource, EPSILON};
use crate::error::LengthMismatch;
use crate::mat::{Mat3, Mat4};
use crate::quat::Quat;

macro_rules! vec_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$e.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! vec_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $($e: ident),*) => {
        impl ops::$trait<$v> for $v {
            #[inline]
            fn $func(&mut self, rhs: $v) {
                $( self.$e.$func(rhs.$e); )*
            }
        }
    }
}

macro_rules! scalar_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident, $($e: ident),*) => {

        impl ops::$trait<$t> for $v {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $t) -> $v {
                $v { $( $e: self.$e.$func(rhs), )* }
            }
        }

        impl ops::$trait<$v> for $t {
            type Output = $v;

            #[inline]
            fn $func(self, rhs: $v) -> $v {
                $v { $( $e: self.$func(rhs.$e), )* }
            }
        }
    }
}

macro_rules! scalar_assign_op_impl {
    ($trait: ident, $func: ident, $v: ident, $t: ident, $($e: ident),*) => {

        impl ops::$trait<$t> for $v {
            #[inline]
            fn $func(&mut self, rhs: $t) {
                $( self.$e.$func(rhs); )*
            }
        }
    }
}

macro_rules! vec_float_utils_impl {
    ($v: ident, $t: ident, $($e: ident),*) => {
        impl $v {
            #[inline]
            pub fn dot(self, b: $v) -> $t {
                // Adding negative zero (-0.0) is a nop in IEEE 754 floating
                // point, while adding positive zero can change the sign of
                // negative zero, thus llvm only optimizes out (-0.0):
                //
                // (-0.0 + -0.0) = -0.0
                // (-0.0 +  0.0) =  0.0
                // ( 0.0 + -0.0) =  0.0
                // ( 0.0 +  0.0) =  0.0
                $( self.$e * b.$e + )* (-0.0)
            }

            #[inline]
            pub fn length_squared(self) -> $t {
                $v::dot(self, self)
            }

            #[inline]
            pub fn length(self) -> $t {
                $v::length_squared(self).sqrt()
            }

            #[inline]
            pub fn distance_squared(self, b: $v) -> $t {
                (b - self).length_squared()
            }

            #[inline]
            pub fn distance(self, b: $v) -> $t {
                (b - self).length()
            }

            /// Unit vector in the direction of `self`.
            ///
            /// A vector whose squared length is zero has no direction and is
            /// returned as is.
            #[inline]
            pub fn normalized(self) -> $v {
                let len2 = $v::length_squared(self);
                if len2 > 0.0 {
                    self * (1.0 / len2.sqrt())
                } else {
                    log::trace!("normalizing zero length {}, left unchanged", stringify!($v));
                    self
                }
            }

            #[inline]
            pub fn scale(self, s: $t) -> $v {
                self * s
            }

            /// `self + b * s`
            #[inline]
            pub fn scale_and_add(self, b: $v, s: $t) -> $v {
                $v { $( $e: self.$e + b.$e * s, )* }
            }

            /// Linear interpolation from `self` (t = 0) to `b` (t = 1).
            /// `t` is not clamped.
            #[inline]
            pub fn lerp(self, b: $v, t: $t) -> $v {
                $v { $( $e: self.$e + t * (b.$e - self.$e), )* }
            }

            #[inline]
            pub fn negate(self) -> $v {
                -self
            }

            /// Componentwise reciprocal, 1/0 gives infinity.
            #[inline]
            pub fn inverse(self) -> $v {
                $v { $( $e: 1.0 / self.$e, )* }
            }

            #[inline]
            pub fn ceil(self) -> $v {
                $v { $( $e: self.$e.ceil(), )* }
            }

            #[inline]
            pub fn floor(self) -> $v {
                $v { $( $e: self.$e.floor(), )* }
            }

            #[inline]
            pub fn round(self) -> $v {
                $v { $( $e: self.$e.round(), )* }
            }

            #[inline]
            pub fn exact_eq(self, b: $v) -> bool {
                $( self.$e == b.$e )&&*
            }

            #[inline]
            pub fn approx_eq(self, b: $v) -> bool {
                $v::approx_eq_eps(self, b, EPSILON)
            }

            #[inline]
            pub fn approx_eq_eps(self, b: $v, eps: $t) -> bool {
                $( common::approx_eq(self.$e, b.$e, eps) )&&*
            }
        }

        impl Neg for $v {
            type Output = $v;

            fn neg(self) -> $v {
                $v { $( $e: -self.$e, )* }
            }
        }
    }
}

macro_rules! vec_impl {
    ($v: ident, $t: ident, $n: expr, $($e: ident),*) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $v {
            $( pub $e : $t, )*
        }

        impl $v {
            #[inline]
            pub fn new($( $e: $t, )*) -> $v {
                $v { $( $e : $e, )* }
            }

            #[inline]
            pub fn zero() -> $v {
                $v::zeroed()
            }

            #[inline]
            pub fn from_scalar(a: $t) -> $v {
                $v { $( $e : a, )* }
            }

            #[inline]
            pub fn from_array(a: [$t; $n]) -> $v {
                bytemuck::cast(a)
            }

            #[inline]
            pub fn clamp(a: $v, min: $v, max: $v) -> $v {
                $v { $( $e: a.$e.clamp(min.$e, max.$e),)* }
            }

            #[inline]
            pub fn min(a: $v, b: $v) -> $v {
                $v { $( $e: a.$e.min(b.$e),)* }
            }

            #[inline]
            pub fn max(a: $v, b: $v) -> $v {
                $v { $( $e: a.$e.max(b.$e),)* }
            }

            #[inline]
            pub fn to_array(self) -> [$t; $n] {
                bytemuck::cast(self)
            }

        }

        impl ops::Index<usize> for $v {
            type Output = $t;

            #[inline]
            fn index(&self, i: usize) -> &$t {
                &bytemuck::cast_ref::<$v, [$t; $n]>(self)[i]
            }
        }

        impl ops::IndexMut<usize> for $v {
            #[inline]
            fn index_mut(&mut self, i: usize) -> &mut $t {
                &mut bytemuck::cast_mut::<$v, [$t; $n]>(self)[i]
            }
        }

        impl From<[$t; $n]> for $v {
            #[inline]
            fn from(a: [$t; $n]) -> $v {
                $v::from_array(a)
            }
        }

        impl From<$v> for [$t; $n] {
            #[inline]
            fn from(v: $v) -> [$t; $n] {
                v.to_array()
            }
        }

        impl TryFrom<&[$t]> for $v {
            type Error = LengthMismatch;

            fn try_from(s: &[$t]) -> Result<Self, Self::Error> {
                let a: [$t; $n] = s.try_into()
                    .map_err(|_| LengthMismatch { expected: $n, found: s.len() })?;
                Ok($v::from_array(a))
            }
        }

        impl fmt::Display for $v {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}({})", stringify!($v),
                        vec![$(
                           format!("{:.prec$}", self.$e, prec = f.precision().unwrap_or(3)),
                        )*].join(", "))
            }
        }


        vec_op_impl!(Add, add, $v, $($e),*);
        vec_op_impl!(Sub, sub, $v, $($e),*);
        vec_op_impl!(Mul, mul, $v, $($e),*);
        vec_op_impl!(Div, div, $v, $($e),*);

        vec_assign_op_impl!(AddAssign, add_assign, $v, $($e),*);
        vec_assign_op_impl!(SubAssign, sub_assign, $v, $($e),*);
        vec_assign_op_impl!(MulAssign, mul_assign, $v, $($e),*);
        vec_assign_op_impl!(DivAssign, div_assign, $v, $($e),*);

        scalar_op_impl!(Add, add, $v, $t, $($e),*);
        scalar_op_impl!(Sub, sub, $v, $t, $($e),*);
        scalar_op_impl!(Mul, mul, $v, $t, $($e),*);
        scalar_op_impl!(Div, div, $v, $t, $($e),*);

        scalar_assign_op_impl!(AddAssign, add_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(SubAssign, sub_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(MulAssign, mul_assign, $v, $t, $($e),*);
        scalar_assign_op_impl!(DivAssign, div_assign, $v, $t, $($e),*);
    }
}


vec_impl!(Vec2, f64, 2, x, y);
vec_impl!(Vec3, f64, 3, x, y, z);
vec_impl!(Vec4, f64, 4, x, y, z, w);

vec_float_utils_impl!(Vec2, f64, x, y);
vec_float_utils_impl!(Vec3, f64, x, y, z);
vec_float_utils_impl!(Vec4, f64, x, y, z, w);

impl Vec2 {
    /// 2D cross product, returned as the z component of a `Vec3`.
    #[inline]
    pub fn cross(self, b: Vec2) -> Vec3 {
        Vec3 { x: 0.0, y: 0.0, z: self.x * b.y - self.y * b.x }
    }

    /// Rotate the point around `origin` by `angle` radians.
    pub fn rotate(self, origin: Vec2, angle: f64) -> Vec2 {
        let p = self - origin;
        let (s, c) = angle.sin_cos();
        Vec2 {
            x: p.x * c - p.y * s + origin.x,
            y: p.x * s + p.y * c + origin.y,
        }
    }

    /// Unsigned angle between two vectors, in radians.
    pub fn angle(self, b: Vec2) -> f64 {
        let mag = (self.length_squared() * b.length_squared()).sqrt();
        let cosine = if mag != 0.0 { self.dot(b) / mag } else { 0.0 };
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// Transform as the point `(x, y, 1)`.
    #[inline]
    pub fn transform_mat3(self, m: &Mat3) -> Vec2 {
        Vec2 {
            x: m.e[0][0] * self.x + m.e[1][0] * self.y + m.e[2][0],
            y: m.e[0][1] * self.x + m.e[1][1] * self.y + m.e[2][1],
        }
    }

    /// Transform as the point `(x, y, 0, 1)`.
    #[inline]
    pub fn transform_mat4(self, m: &Mat4) -> Vec2 {
        Vec2 {
            x: m.e[0][0] * self.x + m.e[1][0] * self.y + m.e[3][0],
            y: m.e[0][1] * self.x + m.e[1][1] * self.y + m.e[3][1],
        }
    }

    /// Point on the circle of radius `scale`.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, scale: f64) -> Vec2 {
        let r = rng.next_f64() * 2.0 * PI;
        Vec2 { x: r.cos() * scale, y: r.sin() * scale }
    }
}

impl Vec3 {
    #[inline]
    pub fn cross(self, b: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * b.z - self.z * b.y,
            y: self.z * b.x - self.x * b.z,
            z: self.x * b.y - self.y * b.x,
        }
    }

    /// Cubic Hermite spline through `self` (t = 0) and `d` (t = 1), with
    /// tangents `b` and `c`.
    pub fn hermite(self, b: Vec3, c: Vec3, d: Vec3, t: f64) -> Vec3 {
        let t2 = t * t;
        let f1 = t2 * (2.0 * t - 3.0) + 1.0;
        let f2 = t2 * (t - 2.0) + t;
        let f3 = t2 * (t - 1.0);
        let f4 = t2 * (3.0 - 2.0 * t);

        self * f1 + b * f2 + c * f3 + d * f4
    }

    /// Cubic Bezier curve from `self` to `d` with control points `b` and `c`.
    pub fn bezier(self, b: Vec3, c: Vec3, d: Vec3, t: f64) -> Vec3 {
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        let f1 = inv2 * inv;
        let f2 = 3.0 * t * inv2;
        let f3 = 3.0 * t2 * inv;
        let f4 = t2 * t;

        self * f1 + b * f2 + c * f3 + d * f4
    }

    /// Rotate the point around the x axis through `origin`.
    pub fn rotate_x(self, origin: Vec3, angle: f64) -> Vec3 {
        let p = self - origin;
        let (s, c) = angle.sin_cos();
        let r = Vec3 {
            x: p.x,
            y: p.y * c - p.z * s,
            z: p.y * s + p.z * c,
        };
        r + origin
    }

    /// Rotate the point around the y axis through `origin`.
    pub fn rotate_y(self, origin: Vec3, angle: f64) -> Vec3 {
        let p = self - origin;
        let (s, c) = angle.sin_cos();
        let r = Vec3 {
            x: p.z * s + p.x * c,
            y: p.y,
            z: p.z * c - p.x * s,
        };
        r + origin
    }

    /// Rotate the point around the z axis through `origin`.
    pub fn rotate_z(self, origin: Vec3, angle: f64) -> Vec3 {
        let p = self - origin;
        let (s, c) = angle.sin_cos();
        let r = Vec3 {
            x: p.x * c - p.y * s,
            y: p.x * s + p.y * c,
            z: p.z,
        };
        r + origin
    }

    /// Unsigned angle between two vectors, in radians.
    pub fn angle(self, b: Vec3) -> f64 {
        let cosine = self.normalized().dot(b.normalized());

        // Rounding can push the cosine of (anti)parallel vectors past 1.
        if cosine > 1.0 {
            0.0
        } else if cosine < -1.0 {
            PI
        } else {
            cosine.acos()
        }
    }

    /// Transform as the point `(x, y, z, 1)`, with perspective divide.
    /// A zero `w` is treated as 1.
    pub fn transform_mat4(self, m: &Mat4) -> Vec3 {
        let v = *m * self.extend(1.0);
        let w = if v.w != 0.0 { v.w } else { 1.0 };
        Vec3 { x: v.x / w, y: v.y / w, z: v.z / w }
    }

    #[inline]
    pub fn transform_mat3(self, m: &Mat3) -> Vec3 {
        *m * self
    }

    /// Rotate by `q`, computing `q * v * q^-1` as
    /// `v + 2w (q x v) + 2 q x (q x v)`.
    #[inline]
    pub fn transform_quat(self, q: Quat) -> Vec3 {
        let qv = q.im();
        let uv = qv.cross(self);
        let uuv = qv.cross(uv);

        self + uv * (2.0 * q.re()) + uuv * 2.0
    }

    #[inline]
    pub fn extend(self, w: f64) -> Vec4 {
        Vec4 { x: self.x, y: self.y, z: self.z, w }
    }

    /// Uniformly distributed point on the sphere of radius `scale`.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, scale: f64) -> Vec3 {
        let r = rng.next_f64() * 2.0 * PI;
        let z = rng.next_f64() * 2.0 - 1.0;
        let z_scale = (1.0 - z * z).sqrt() * scale;

        Vec3 { x: r.cos() * z_scale, y: r.sin() * z_scale, z: z * scale }
    }
}

impl Vec4 {
    /// Vector orthogonal to `self`, `v` and `w`.
    pub fn cross(self, v: Vec4, w: Vec4) -> Vec4 {
        let a = v.x * w.y - v.y * w.x;
        let b = v.x * w.z - v.z * w.x;
        let c = v.x * w.w - v.w * w.x;
        let d = v.y * w.z - v.z * w.y;
        let e = v.y * w.w - v.w * w.y;
        let f = v.z * w.w - v.w * w.z;

        Vec4 {
            x: self.y * f - self.z * e + self.w * d,
            y: -(self.x * f) + self.z * c - self.w * b,
            z: self.x * e - self.y * c + self.w * a,
            w: -(self.x * d) + self.y * b - self.z * a,
        }
    }

    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3 { x: self.x, y: self.y, z: self.z }
    }

    #[inline]
    pub fn transform_mat4(self, m: &Mat4) -> Vec4 {
        *m * self
    }

    /// Rotate the xyz part by `q`, `w` is kept.
    #[inline]
    pub fn transform_quat(self, q: Quat) -> Vec4 {
        self.xyz().transform_quat(q).extend(self.w)
    }

    /// Four independent uniforms, normalized and scaled to length `scale`.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R, scale: f64) -> Vec4 {
        let v = Vec4 {
            x: rng.next_f64(),
            y: rng.next_f64(),
            z: rng.next_f64(),
            w: rng.next_f64(),
        };
        v.normalized() * scale
    }
}
