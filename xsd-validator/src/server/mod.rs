mod app;
pub mod handler;

pub use app::{build_router, AppState};

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Debug, Args, Clone)]
pub struct ServerArgs {
    /// HTTP server listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "XSD_VALIDATOR_LISTEN_ADDR")]
    pub listen_addr: String,

    /// Path the validation endpoint is served on
    #[arg(long, default_value = "/", env = "XSD_VALIDATOR_ROUTE")]
    pub route: String,

    /// Largest accepted request body in bytes
    #[arg(long, default_value_t = 10 * 1024 * 1024, env = "XSD_VALIDATOR_MAX_BODY_BYTES")]
    pub max_body_bytes: usize,

    /// Directory that `data` / `schema` file references resolve into.
    /// References are refused when unset.
    #[arg(long, env = "XSD_VALIDATOR_REFERENCE_ROOT")]
    pub reference_root: Option<PathBuf>,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            route: "/".to_string(),
            max_body_bytes: 10 * 1024 * 1024,
            reference_root: None,
        }
    }
}

impl ServerArgs {
    pub fn check(&self) -> Result<()> {
        ensure!(
            self.route.starts_with('/'),
            "route must start with '/', got {:?}",
            self.route
        );
        ensure!(
            !self.route.contains(['{', '}', '*']) && !self.route.contains("//"),
            "route must be a literal path, got {:?}",
            self.route
        );
        ensure!(self.route != "/health", "route /health is reserved");
        if let Some(root) = &self.reference_root {
            ensure!(
                root.is_dir(),
                "reference root {} is not a directory",
                root.display()
            );
        }
        Ok(())
    }
}

pub async fn run(args: ServerArgs) -> Result<()> {
    info!("Initializing xsd-validator server");
    args.check()?;

    match &args.reference_root {
        Some(root) => info!("File references enabled under {}", root.display()),
        None => info!("File references disabled"),
    }

    let router = build_router(&args);

    let addr: SocketAddr = args.listen_addr.parse()?;
    info!("Starting HTTP server on {}, validation route {}", addr, args.route);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service()).await?;

    Ok(())
}
