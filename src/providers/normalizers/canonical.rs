//! Pass-through for providers that already serve canonical descriptors
//!
//! Accepts either a store envelope (`{"servers": [...]}`) or a bare array.
use super::SourceNormalizer;
use crate::catalog::CanonicalDescriptor;
use crate::utils::errors::{CatalogError, CatalogResult};
use serde_json::Value;
use tracing::warn;

pub struct CanonicalNormalizer;

impl CanonicalNormalizer {
    /// Stamp each descriptor with its provider.
    pub fn tag<I>(descriptors: I, provider_id: &str) -> Vec<CanonicalDescriptor>
    where
        I: IntoIterator<Item = CanonicalDescriptor>,
    {
        descriptors
            .into_iter()
            .map(|mut d| {
                d.provider = Some(provider_id.to_string());
                d
            })
            .collect()
    }
}

impl SourceNormalizer for CanonicalNormalizer {
    fn name(&self) -> &str {
        "canonical"
    }

    fn normalize(
        &self,
        payload: &Value,
        provider_id: &str,
    ) -> CatalogResult<Vec<CanonicalDescriptor>> {
        let items = match payload {
            Value::Array(items) => items,
            other => other
                .get("servers")
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    CatalogError::InvalidPayload(format!(
                        "payload from {} has no 'servers' array",
                        provider_id
                    ))
                })?,
        };

        let mut descriptors = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let descriptor: CanonicalDescriptor = match serde_json::from_value(item.clone()) {
                Ok(descriptor) => descriptor,
                Err(e) => {
                    warn!("Skipping item {} from {}: {}", position, provider_id, e);
                    continue;
                }
            };
            if let Err(message) = descriptor.check_template() {
                warn!("Skipping {} from {}: {}", descriptor.id, provider_id, message);
                continue;
            }
            descriptors.push(descriptor);
        }

        Ok(Self::tag(descriptors, provider_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server(id: &str) -> Value {
        json!({
            "id": id,
            "name": id,
            "description": "d",
            "category": "c",
            "icon": "i",
            "source": "official",
            "version": "1",
            "transport": "sse",
            "configuration": {"template": {"type": "sse", "url": "https://example.com/sse"}}
        })
    }

    #[test]
    fn test_envelope_and_array_payloads() {
        let envelope = json!({"version": "1.0.0", "servers": [server("a"), server("b")]});
        let out = CanonicalNormalizer.normalize(&envelope, "levante").unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|d| d.provider.as_deref() == Some("levante")));

        let array = json!([server("c")]);
        assert_eq!(CanonicalNormalizer.normalize(&array, "mirror").unwrap().len(), 1);
    }

    #[test]
    fn test_bad_items_are_skipped() {
        let mut mismatched = server("mismatch");
        mismatched["transport"] = json!("stdio");
        let payload = json!({"servers": [server("ok"), {"id": 1}, mismatched]});
        let out = CanonicalNormalizer.normalize(&payload, "p").unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "ok");
    }

    #[test]
    fn test_wrong_shape_is_error() {
        assert!(CanonicalNormalizer.normalize(&json!({"mcps": []}), "p").is_err());
    }
}
