//! Interpolation collaborator types and the linear default.
//!
//! An interpolator is resolved once per tween from its two endpoints and then
//! sampled with eased progress on every tick.

pub mod functions;

use std::rc::Rc;

use tweezing_api_core::Value;

/// Eased progress -> intermediate value.
pub type Interpolation = Box<dyn Fn(f32) -> Value>;

/// (from, to) -> interpolation.
pub type InterpolateFn = Rc<dyn Fn(&Value, &Value) -> Interpolation>;

/// Component-wise linear interpolation via [`functions::linear_value`].
pub fn default_interpolate() -> InterpolateFn {
    Rc::new(|a: &Value, b: &Value| -> Interpolation {
        let (a, b) = (a.clone(), b.clone());
        Box::new(move |t| functions::linear_value(&a, &b, t))
    })
}
