pub mod reconciler;

pub use reconciler::{combine_ram_units, reconcile, ReconcileOptions};
