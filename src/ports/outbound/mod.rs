/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the application core uses to reach
/// external systems (the remote service-desk API and the console).
pub mod progress_reporter;
pub mod remote_client;

pub use progress_reporter::ProgressReporter;
pub use remote_client::{paginated_field_name, RemoteClient};
