//! Folio Books API
//!
//! A small CRUD service over an in-memory book collection with a bearer-token
//! protected listing and generated OpenAPI documentation.

pub mod modules;

use folio_kernel::{settings::Settings, InitCtx, ModuleRegistry};

pub use modules::register_all;

/// Build a registry holding every application module.
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, settings);
    registry
}

/// Run the module lifecycle around the HTTP server until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = folio_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
