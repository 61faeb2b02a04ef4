//! Interpolation helpers:
//! - lerp_f32 / lerp_vec2 / lerp_vec3 / lerp_vec4
//! - linear_value (component-wise; step for text, bools and mismatched kinds)

use tweezing_api_core::{Key, Value};

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec2(a: [f32; 2], b: [f32; 2], t: f32) -> [f32; 2] {
    [lerp_f32(a[0], b[0], t), lerp_f32(a[1], b[1], t)]
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
    ]
}

#[inline]
pub fn lerp_vec4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp_f32(a[0], b[0], t),
        lerp_f32(a[1], b[1], t),
        lerp_f32(a[2], b[2], t),
        lerp_f32(a[3], b[3], t),
    ]
}

/// Step interpolation: left until progress completes, then right.
#[inline]
pub fn step_value(a: &Value, b: &Value, t: f32) -> Value {
    if t >= 1.0 {
        b.clone()
    } else {
        a.clone()
    }
}

/// Linear interpolation across Value kinds.
///
/// Structured values interpolate per child of `b`; a child missing from `a`
/// starts from its zero value.
pub fn linear_value(a: &Value, b: &Value, t: f32) -> Value {
    match (a, b) {
        (Value::Float(va), Value::Float(vb)) => Value::Float(lerp_f32(*va, *vb, t)),
        (Value::Vec2(va), Value::Vec2(vb)) => Value::Vec2(lerp_vec2(*va, *vb, t)),
        (Value::Vec3(va), Value::Vec3(vb)) => Value::Vec3(lerp_vec3(*va, *vb, t)),
        (Value::Vec4(va), Value::Vec4(vb)) => Value::Vec4(lerp_vec4(*va, *vb, t)),
        (Value::ColorRgba(ca), Value::ColorRgba(cb)) => Value::ColorRgba(lerp_vec4(*ca, *cb, t)),
        (_, Value::Array(_)) | (_, Value::Record(_)) => {
            let Some(structure) = b.structure() else {
                return step_value(a, b, t);
            };
            structure.assemble(b.keys().into_iter().filter_map(|key: Key| {
                let vb = b.get(&key)?;
                let v = match a.get(&key) {
                    Some(va) => linear_value(va, vb, t),
                    None => linear_value(&vb.zero_like(), vb, t),
                };
                Some((key, v))
            }))
        }
        // Text, bools and mismatched kinds cannot blend.
        _ => step_value(a, b, t),
    }
}
