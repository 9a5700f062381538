//! OpenAPI document and Swagger UI page

use axum::response::{Html, Json};
use serde_json::{json, Value};

const SWAGGER_UI_VERSION: &str = "5.17.14";

fn error_schema() -> Value {
    json!({
        "type": "object",
        "required": ["error"],
        "properties": { "error": { "type": "string" } }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn path_param(name: &str, description: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "description": description,
        "schema": { "type": "string" }
    })
}

pub fn openapi_document() -> Value {
    let descriptor = json!({ "$ref": "#/components/schemas/Descriptor" });
    let store = json!({ "$ref": "#/components/schemas/StoreResponse" });
    let error = json!({ "$ref": "#/components/schemas/Error" });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "MCP Catalog API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Read-only catalog of MCP server descriptors"
        },
        "paths": {
            "/api/mcps.json": {
                "get": {
                    "summary": "Full catalog",
                    "parameters": [{
                        "name": "source",
                        "in": "query",
                        "required": false,
                        "schema": { "type": "string", "enum": ["official", "community"] }
                    }],
                    "responses": {
                        "200": json_response("Catalog envelope", store.clone()),
                        "400": json_response("Invalid source", error.clone())
                    }
                }
            },
            "/api/mcps": {
                "get": {
                    "summary": "Redirect to /api/mcps.json",
                    "responses": { "303": { "description": "Redirect" } }
                }
            },
            "/api/mcps/services": {
                "get": {
                    "summary": "Service metadata",
                    "responses": {
                        "200": json_response("Services", json!({
                            "type": "object",
                            "properties": {
                                "services": {
                                    "type": "array",
                                    "items": { "$ref": "#/components/schemas/ServiceMeta" }
                                }
                            }
                        }))
                    }
                }
            },
            "/api/mcps/stats": {
                "get": {
                    "summary": "Catalog statistics",
                    "responses": {
                        "200": json_response("Counts", json!({
                            "type": "object",
                            "properties": {
                                "total": { "type": "integer" },
                                "official": { "type": "integer" },
                                "community": { "type": "integer" },
                                "services": { "type": "integer" },
                                "serviceList": { "type": "array", "items": { "type": "string" } }
                            }
                        }))
                    }
                }
            },
            "/api/mcps/service/{service}": {
                "get": {
                    "summary": "Descriptors of one service",
                    "parameters": [path_param("service", "Service directory name")],
                    "responses": {
                        "200": json_response("Service envelope", store.clone()),
                        "404": json_response("Service not found", error.clone())
                    }
                }
            },
            "/api/mcps/{id}": {
                "get": {
                    "summary": "Single descriptor",
                    "parameters": [path_param("id", "Descriptor id")],
                    "responses": {
                        "200": json_response("Descriptor", descriptor.clone()),
                        "404": json_response("MCP server not found", error.clone())
                    }
                }
            },
            "/api/mcps/providers": {
                "get": {
                    "summary": "Enabled providers",
                    "responses": {
                        "200": json_response("Providers", json!({
                            "type": "object",
                            "properties": { "providers": { "type": "array", "items": { "type": "object" } } }
                        }))
                    }
                }
            },
            "/api/mcps/provider/{providerId}": {
                "get": {
                    "summary": "Descriptors synced from one provider",
                    "parameters": [path_param("providerId", "Provider id")],
                    "responses": {
                        "200": json_response("Provider envelope", store.clone()),
                        "404": json_response("Provider not found", error.clone()),
                        "500": json_response("Provider sync failed", error.clone())
                    }
                }
            },
            "/api/announcements": {
                "get": {
                    "summary": "Latest announcement per category",
                    "parameters": [
                        {
                            "name": "category",
                            "in": "query",
                            "required": true,
                            "description": "Comma-separated list of announcement, privacy, landing, app",
                            "schema": { "type": "string" }
                        },
                        {
                            "name": "language",
                            "in": "query",
                            "required": true,
                            "schema": { "type": "string", "enum": ["es", "en"] }
                        }
                    ],
                    "responses": {
                        "200": json_response("Announcement(s)", json!({
                            "oneOf": [
                                {
                                    "type": "object",
                                    "properties": {
                                        "announcement": {
                                            "nullable": true,
                                            "allOf": [{ "$ref": "#/components/schemas/Announcement" }]
                                        }
                                    }
                                },
                                {
                                    "type": "object",
                                    "properties": {
                                        "announcements": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Announcement" }
                                        },
                                        "total": { "type": "integer" }
                                    }
                                }
                            ]
                        })),
                        "400": json_response("Invalid query", error.clone()),
                        "500": json_response("Datastore failure", error.clone())
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Liveness",
                    "responses": {
                        "200": json_response("Healthy", json!({
                            "type": "object",
                            "properties": {
                                "status": { "type": "string" },
                                "version": { "type": "string" }
                            }
                        }))
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Error": error_schema(),
                "Descriptor": {
                    "type": "object",
                    "required": ["id", "name", "description", "category", "icon", "source", "version", "transport", "configuration"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "displayName": { "type": "string" },
                        "description": { "type": "string" },
                        "category": { "type": "string" },
                        "icon": { "type": "string" },
                        "logoUrl": { "type": "string" },
                        "source": { "type": "string", "enum": ["official", "community"] },
                        "status": { "type": "string", "enum": ["active", "deprecated", "experimental"] },
                        "version": { "type": "string" },
                        "transport": { "type": "string", "enum": ["stdio", "sse", "streamable-http"] },
                        "inputs": { "type": "object" },
                        "configuration": { "type": "object" },
                        "metadata": { "type": "object" }
                    }
                },
                "StoreResponse": {
                    "type": "object",
                    "properties": {
                        "version": { "type": "string" },
                        "provider": {
                            "type": "object",
                            "properties": {
                                "id": { "type": "string" },
                                "name": { "type": "string" },
                                "homepage": { "type": "string" }
                            }
                        },
                        "servers": { "type": "array", "items": descriptor }
                    }
                },
                "ServiceMeta": {
                    "type": "object",
                    "properties": {
                        "service": { "type": "string" },
                        "displayName": { "type": "string" },
                        "description": { "type": "string" },
                        "website": { "type": "string" },
                        "icon": { "type": "string" },
                        "category": { "type": "string" }
                    }
                },
                "Announcement": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "title": { "type": "string" },
                        "full_text": { "type": "string" },
                        "category": { "type": "string", "enum": ["announcement", "privacy", "landing", "app"] },
                        "created_at": { "type": "string", "format": "date-time" }
                    }
                }
            }
        }
    })
}

/// GET /openapi.json
pub async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

/// GET /
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>MCP Catalog API</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{v}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@{v}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{
        url: '/openapi.json',
        dom_id: '#swagger-ui',
        requestInterceptor: (req) => {{
          req.headers['Cache-Control'] = 'no-cache';
          req.headers['Pragma'] = 'no-cache';
          return req;
        }}
      }});
    }};
  </script>
</body>
</html>
"#,
        v = SWAGGER_UI_VERSION
    ))
}
