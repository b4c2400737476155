//! Column-major matrices, `e[column][row]`.
//!
//! Only what quaternion conversion and the vector transforms need.

use bytemuck::{Pod, Zeroable};

use crate::vec::*;

macro_rules! mat_impl {
    ($m: ident, $t: ident, $v: ident, $n: literal) => {

        #[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
        #[repr(C)]
        pub struct $m {
            pub e: [[$t; $n]; $n],
        }

        impl $m {
            #[inline]
            pub fn new() -> $m {
                $m::default()
            }

            #[inline]
            pub fn from_columns(v: &[$v; $n]) -> $m {
                let mut m = $m::new();
                for i in 0..$n {
                    m.e[i] = v[i].to_array();
                }
                m
            }

            #[inline]
            pub fn identity() -> $m {
                $m::scale_uniform(1.0)
            }

            #[inline]
            pub fn scale_uniform(d: $t) -> $m {
                let mut m = $m::new();
                for i in 0..$n {
                    m.e[i][i] = d;
                }
                m
            }

            #[inline]
            pub fn transpose(&self) -> $m {
                let mut m = $m::new();

                for j in 0..$n {
                    for i in 0..$n {
                        m.e[j][i] = self.e[i][j];
                    }
                }
                m
            }

            #[inline]
            pub fn trace(&self) -> $t {
                (0..$n).map(|i| self.e[i][i]).sum()
            }

            #[inline]
            pub fn to_columns(&self) -> [$v; $n] {
                bytemuck::cast(*self)
            }

            #[inline]
            pub fn to_rows(&self) -> [$v; $n] {
                self.transpose().to_columns()
            }

            pub fn approx_eq(&self, b: &$m) -> bool {
                self.to_columns().iter()
                    .zip(b.to_columns().iter())
                    .all(|(x, y)| x.approx_eq(*y))
            }

        }

        impl std::ops::Mul<$m> for $m {
            type Output = $m;

            #[inline]
            fn mul(self, rhs: $m) -> $m {
                let mut m = $m::new();

                let a = self.to_rows();
                let b = rhs.to_columns();

                for j in 0..$n {
                    for i in 0..$n {
                        m.e[j][i] = $v::dot(a[i], b[j]);
                    }
                }
                m
            }
        }

        impl std::ops::Mul<$v> for $m {
            type Output = $v;

            #[inline]
            fn mul(self, rhs: $v) -> $v {
                let mut v = [0.0; $n];

                let a = self.to_rows();

                for i in 0..$n {
                    v[i] = a[i].dot(rhs);
                }
                $v::from_array(v)
            }
        }


    }
}

mat_impl!(Mat4, f64, Vec4, 4);
mat_impl!(Mat3, f64, Vec3, 3);

/// Rodrigues rotation about a unit `axis`, written into the upper 3x3 of `e`.
fn write_rotation<const N: usize>(e: &mut [[f64; N]; N], axis: Vec3, angle: f64) {
    let a = axis.x;
    let b = axis.y;
    let c = axis.z;

    let (sin_alpha, cos_alpha) = angle.sin_cos();

    let k = 1. - cos_alpha;

    e[0][0] = a * a * k + cos_alpha;
    e[1][1] = b * b * k + cos_alpha;
    e[2][2] = c * c * k + cos_alpha;

    e[0][1] = a * b * k + c * sin_alpha;
    e[0][2] = a * c * k - b * sin_alpha;
    e[1][2] = b * c * k + a * sin_alpha;

    e[1][0] = a * b * k - c * sin_alpha;
    e[2][0] = a * c * k + b * sin_alpha;
    e[2][1] = b * c * k - a * sin_alpha;
}

impl Mat3 {
    pub fn rotation(axis: Vec3, angle: f64) -> Self {
        let mut m = Mat3::new();
        write_rotation(&mut m.e, axis, angle);
        m
    }
}

impl Mat4 {
    pub fn rotation(axis: Vec3, angle: f64) -> Self {
        let mut m = Mat4::identity();
        write_rotation(&mut m.e, axis, angle);
        m
    }

    pub fn translation(v: Vec3) -> Self {
        let mut m = Mat4::identity();
        m.e[3][0..3].copy_from_slice(&v.to_array());

        m
    }
}
