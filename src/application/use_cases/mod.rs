pub mod aggregate_assets;
pub(crate) mod enrichment;
pub mod list_departments;
pub mod list_locations;
pub mod search_assets;

pub use aggregate_assets::AggregateAssetsUseCase;
pub use list_departments::ListDepartmentsUseCase;
pub use list_locations::ListLocationsUseCase;
pub use search_assets::SearchAssetsUseCase;
