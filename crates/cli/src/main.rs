use clap::{Parser, Subcommand};
use semcache_mdns_application::{
    BrowseServicesUseCase, DiscoveryEngine, RegisterServiceUseCase, ResolveServiceUseCase,
};
use semcache_mdns_domain::CliOverrides;
use semcache_mdns_infrastructure::{MulticastTransport, SystemInterfaces};
use std::sync::Arc;
use tracing::info;

mod bootstrap;

const DEFAULT_SERVICE_TYPE: &str = "_semcache._tcp";

#[derive(Parser)]
#[command(name = "semcache-mdns")]
#[command(version)]
#[command(about = "Multicast discovery for LAN content caches")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP port for the discovery socket
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Claim a name on the network and advertise this host's cache
    Register {
        /// Friendly instance name to claim
        #[arg(long)]
        name: String,

        /// Port the cache service listens on
        #[arg(long)]
        port: u16,

        #[arg(long, default_value = DEFAULT_SERVICE_TYPE)]
        service_type: String,

        /// Host name to claim; defaults to <hostname>.local
        #[arg(long)]
        host: Option<String>,
    },

    /// Discover cache instances on the network
    Browse {
        #[arg(long, default_value = DEFAULT_SERVICE_TYPE)]
        service_type: String,
    },

    /// Resolve one full instance name to an address and port
    Resolve {
        /// e.g. Cache1._semcache._tcp.local
        instance: String,
    },
}

// The whole engine runs on one cooperative scheduler; in-flight probes and
// queries interleave without parallelism.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting semcache-mdns v{}", env!("CARGO_PKG_VERSION"));

    let transport = Arc::new(MulticastTransport::bind(&config.server)?);
    let engine = DiscoveryEngine::new(transport, &config);

    let run_engine = engine.clone();
    let engine_task = tokio::spawn(async move { run_engine.run().await });

    match cli.command {
        Command::Register {
            name,
            port,
            service_type,
            host,
        } => {
            let host = host.unwrap_or_else(bootstrap::default_host_name);
            let register =
                RegisterServiceUseCase::new(engine.clone(), Arc::new(SystemInterfaces::new()));
            let registration = register.execute(&host, &name, &service_type, port).await?;
            println!(
                "registered {} at {}:{}",
                registration.service_name, registration.domain, registration.port
            );
            println!("answering queries, Ctrl-C to stop");
            tokio::signal::ctrl_c().await?;
        }
        Command::Browse { service_type } => {
            let browse = BrowseServicesUseCase::new(engine.clone());
            let services = browse.execute(&service_type).await?;
            if services.is_empty() {
                println!("no instances found");
            }
            for service in services {
                println!(
                    "{}  {}  {}:{}",
                    service.instance_name, service.domain, service.ip, service.port
                );
            }
        }
        Command::Resolve { instance } => {
            let resolve = ResolveServiceUseCase::new(engine.clone());
            let resolved = resolve.execute(&instance).await?;
            println!("{}  {}:{}", resolved.domain, resolved.ip, resolved.port);
        }
    }

    engine.shutdown();
    engine_task.await??;
    Ok(())
}
