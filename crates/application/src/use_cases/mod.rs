mod browse_services;
mod query;
mod register_service;
mod resolve_service;

pub use browse_services::{BrowseServicesUseCase, DiscoveredService};
pub use register_service::{RegisterServiceUseCase, Registration};
pub use resolve_service::{ResolveServiceUseCase, ResolvedService};
