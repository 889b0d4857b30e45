//! Semcache mDNS Application Layer
//!
//! The record store, the query responder, the probe/announce/browse state
//! machines, and the engine object tying them to a transport port.
pub mod engine;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use engine::DiscoveryEngine;
pub use ports::{Datagram, InterfaceProvider, PacketTransport};
pub use services::{PacketBus, PacketSubscription, RecordStore, Responder};
pub use use_cases::{
    BrowseServicesUseCase, DiscoveredService, RegisterServiceUseCase, Registration,
    ResolveServiceUseCase, ResolvedService,
};
