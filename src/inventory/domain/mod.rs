pub mod component;
pub mod location;

pub use component::{ComponentKind, UNKNOWN};
pub use location::{build_forest, render_forest, LocationNode};
