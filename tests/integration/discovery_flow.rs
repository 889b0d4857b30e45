//! End-to-end register/browse/resolve over the in-memory multicast group.
//!
//! Time is paused; probe delays and browse windows elapse virtually, so the
//! full three-stage pipeline runs in milliseconds of real time.
#[path = "../helpers/mock_transport.rs"]
mod mock_transport;

use mock_transport::{FixedInterfaces, MockNetwork, MockTransport};
use semcache_mdns_application::{
    BrowseServicesUseCase, DiscoveredService, DiscoveryEngine, RegisterServiceUseCase,
    ResolveServiceUseCase,
};
use semcache_mdns_domain::Config;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

fn group_addr() -> SocketAddr {
    let config = Config::default();
    SocketAddr::from((config.server.multicast_group, config.server.port))
}

fn spawn_engine(transport: MockTransport) -> Arc<DiscoveryEngine> {
    let engine = DiscoveryEngine::new(Arc::new(transport), &Config::default());
    let runner = engine.clone();
    let _ = tokio::spawn(async move { runner.run().await });
    engine
}

#[tokio::test(start_paused = true)]
async fn register_then_browse_then_resolve() {
    let network = MockNetwork::new(group_addr());

    // node1 claims Cache1 and starts answering queries.
    let node1 = spawn_engine(network.join("10.0.0.5:53531".parse().unwrap()));
    let register = RegisterServiceUseCase::new(
        node1.clone(),
        Arc::new(FixedInterfaces(vec![Ipv4Addr::new(10, 0, 0, 5)])),
    );
    let registration = register
        .execute("node1.local", "Cache1", "_semcache._tcp", 8888)
        .await
        .unwrap();
    assert_eq!(registration.service_name, "Cache1._semcache._tcp.local");
    assert_eq!(registration.domain, "node1.local");
    // A + SRV + PTR
    assert_eq!(node1.store().len(), 3);

    // node2 browses the network.
    let node2 = spawn_engine(network.join("10.0.0.9:53531".parse().unwrap()));
    let browse = BrowseServicesUseCase::new(node2.clone());
    let found = browse.execute("_semcache._tcp").await.unwrap();
    assert_eq!(
        found,
        vec![DiscoveredService {
            service_type: "_semcache._tcp".to_string(),
            instance_name: "Cache1".to_string(),
            domain: "node1.local".to_string(),
            ip: Ipv4Addr::new(10, 0, 0, 5),
            port: 8888,
        }]
    );

    // Direct resolution of the full instance name.
    let resolve = ResolveServiceUseCase::new(node2.clone());
    let resolved = resolve
        .execute("Cache1._semcache._tcp.local")
        .await
        .unwrap();
    assert_eq!(resolved.domain, "node1.local");
    assert_eq!(resolved.ip, Ipv4Addr::new(10, 0, 0, 5));
    assert_eq!(resolved.port, 8888);

    // Every operation deregistered its listener on the way out.
    assert_eq!(node1.listener_count(), 0);
    assert_eq!(node2.listener_count(), 0);

    node1.shutdown();
    node2.shutdown();
    assert!(node1.store().is_empty());
}

#[tokio::test(start_paused = true)]
async fn multi_homed_host_gets_one_a_record_per_interface() {
    let network = MockNetwork::new(group_addr());
    let node = spawn_engine(network.join("10.0.0.5:53531".parse().unwrap()));

    let register = RegisterServiceUseCase::new(
        node.clone(),
        Arc::new(FixedInterfaces(vec![
            Ipv4Addr::new(10, 0, 0, 5),
            Ipv4Addr::new(192, 168, 1, 5),
        ])),
    );
    register
        .execute("node1.local", "Cache1", "_semcache._tcp", 8888)
        .await
        .unwrap();

    // Two A records plus SRV plus PTR.
    assert_eq!(node.store().len(), 4);
    node.shutdown();
}

#[tokio::test(start_paused = true)]
async fn browse_with_no_registrants_returns_empty() {
    let network = MockNetwork::new(group_addr());
    let node = spawn_engine(network.join("10.0.0.7:53531".parse().unwrap()));

    let browse = BrowseServicesUseCase::new(node.clone());
    let found = browse.execute("_semcache._tcp").await.unwrap();
    assert!(found.is_empty());
    assert_eq!(node.listener_count(), 0);
    node.shutdown();
}

#[tokio::test(start_paused = true)]
async fn resolving_an_unknown_instance_is_not_found() {
    let network = MockNetwork::new(group_addr());
    let node = spawn_engine(network.join("10.0.0.7:53531".parse().unwrap()));

    let resolve = ResolveServiceUseCase::new(node.clone());
    let result = resolve.execute("Ghost._semcache._tcp.local").await;
    assert!(matches!(
        result,
        Err(semcache_mdns_domain::DiscoveryError::NotFound(_))
    ));
    node.shutdown();
}
