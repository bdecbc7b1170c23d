pub use self::{
    chart::Chart,
    hit_object::{HitObject, HitObjectKind},
};

/// Chart related types.
pub mod chart;

/// Hitobject related types.
pub mod hit_object;

pub(crate) mod note;
