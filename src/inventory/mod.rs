/// Domain layer: component vocabulary, reconciliation rules and the
/// location hierarchy. Pure logic, no I/O.
pub mod domain;
pub mod services;
