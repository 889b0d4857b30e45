//! Name-conflict behavior: a defended name must abort registration on the
//! first answered probe, with no retry under an alternate name.
#[path = "../helpers/mock_transport.rs"]
mod mock_transport;

use mock_transport::{FixedInterfaces, MockNetwork, MockTransport};
use semcache_mdns_application::{DiscoveryEngine, PacketTransport, RegisterServiceUseCase};
use semcache_mdns_domain::{Config, DiscoveryError, Packet, RecordClass, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
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

/// Counts ANY-probes for `name` crossing the mock network.
fn spawn_probe_counter(transport: MockTransport, name: &str) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    let name = name.to_string();
    let _ = tokio::spawn(async move {
        while let Ok(datagram) = transport.recv().await {
            let Ok(packet) = Packet::decode(&datagram.data) else {
                continue;
            };
            if packet.is_query
                && packet.questions.iter().any(|q| {
                    q.qtype == RecordType::ANY && q.name.to_string() == name
                })
            {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        }
    });
    count
}

#[tokio::test(start_paused = true)]
async fn defended_host_name_conflicts_after_one_probe() {
    let network = MockNetwork::new(group_addr());

    // An established holder of taken.local.
    let holder = spawn_engine(network.join("10.0.0.5:53531".parse().unwrap()));
    holder.store().add_record(ResourceRecord::A {
        name: "taken.local".into(),
        class: RecordClass::IN,
        ttl: 120,
        addr: Ipv4Addr::new(10, 0, 0, 5),
    });

    let probes = spawn_probe_counter(
        network.join("10.0.0.99:53531".parse().unwrap()),
        "taken.local",
    );

    // A newcomer trying to claim the same host name.
    let newcomer = spawn_engine(network.join("10.0.0.9:53531".parse().unwrap()));
    let register = RegisterServiceUseCase::new(
        newcomer.clone(),
        Arc::new(FixedInterfaces(vec![Ipv4Addr::new(10, 0, 0, 9)])),
    );
    let result = register
        .execute("taken.local", "Cache2", "_semcache._tcp", 8888)
        .await;

    match result {
        Err(DiscoveryError::NameConflict(name)) => assert_eq!(name, "taken.local"),
        other => panic!("expected NameConflict, got {other:?}"),
    }

    // The conflict aborted probing: exactly one round went out, and no
    // records were created.
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(probes.load(Ordering::SeqCst), 1);
    assert!(newcomer.store().is_empty());
    assert_eq!(newcomer.listener_count(), 0);

    holder.shutdown();
    newcomer.shutdown();
}

#[tokio::test(start_paused = true)]
async fn defended_instance_name_conflicts_too() {
    let network = MockNetwork::new(group_addr());

    let holder = spawn_engine(network.join("10.0.0.5:53531".parse().unwrap()));
    let register_first = RegisterServiceUseCase::new(
        holder.clone(),
        Arc::new(FixedInterfaces(vec![Ipv4Addr::new(10, 0, 0, 5)])),
    );
    register_first
        .execute("node1.local", "Cache1", "_semcache._tcp", 8888)
        .await
        .unwrap();

    // Different host, same friendly name: the instance probe must collide.
    let newcomer = spawn_engine(network.join("10.0.0.9:53531".parse().unwrap()));
    let register_second = RegisterServiceUseCase::new(
        newcomer.clone(),
        Arc::new(FixedInterfaces(vec![Ipv4Addr::new(10, 0, 0, 9)])),
    );
    let result = register_second
        .execute("node2.local", "Cache1", "_semcache._tcp", 8899)
        .await;

    match result {
        Err(DiscoveryError::NameConflict(name)) => {
            assert_eq!(name, "Cache1._semcache._tcp.local");
        }
        other => panic!("expected NameConflict, got {other:?}"),
    }
    assert!(newcomer.store().is_empty());

    holder.shutdown();
    newcomer.shutdown();
}
