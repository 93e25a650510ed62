//! Assembles the service-wide OpenAPI document from module fragments.

use anyhow::Context;
use serde_json::{json, Value};

use folio_kernel::{settings::Settings, ModuleRegistry};

/// Name of the bearer security scheme protected operations refer to.
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Build the merged OpenAPI document as JSON.
///
/// Each module's paths are prefixed with its mount path and its component
/// schemas are merged into a single `components.schemas` map.
pub fn document(registry: &ModuleRegistry, settings: &Settings) -> anyhow::Result<Value> {
    let mut spec = json!({
        "openapi": "3.1.0",
        "info": {
            "title": "Books API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "A simple CRUD API with authentication for teaching API test automation"
        },
        "servers": [
            { "url": settings.server.public_url() }
        ],
        "paths": {},
        "components": {
            "schemas": {},
            "securitySchemes": {}
        }
    });

    spec["components"]["securitySchemes"][BEARER_SCHEME] = json!({
        "type": "http",
        "scheme": "bearer",
        "bearerFormat": "JWT"
    });

    spec["paths"]["/healthz"] = json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": {
                                "type": "string"
                            }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(fragment) = module.openapi() else {
            continue;
        };
        let fragment = serde_json::to_value(&fragment)
            .with_context(|| format!("failed to serialize OpenAPI for '{}'", module.name()))?;
        let prefix = module.mount_path();

        if let Some(paths) = fragment.get("paths").and_then(Value::as_object) {
            for (path, path_item) in paths {
                spec["paths"][join_path(&prefix, path)] = path_item.clone();
            }
        }

        if let Some(schemas) = fragment
            .pointer("/components/schemas")
            .and_then(Value::as_object)
        {
            for (schema_name, schema_def) in schemas {
                spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    Ok(spec)
}

/// Convert a document built by [`document`] into a typed utoipa object.
pub fn typed(spec: Value) -> anyhow::Result<utoipa::openapi::OpenApi> {
    serde_json::from_value(spec).context("merged OpenAPI document is not valid")
}

fn join_path(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match path {
        "" | "/" => prefix.to_string(),
        path if path.starts_with('/') => format!("{}{}", prefix, path),
        path => format!("{}/{}", prefix, path),
    }
}
