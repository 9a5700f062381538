//! Announcements datastore access
use crate::announcements::types::{Announcement, AnnouncementRaw, Category, Language};
use crate::config::{AnnouncementsConfig, HttpClientConfig};
use crate::utils::errors::{CatalogError, CatalogResult};
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Most recent announcement in `category`, if any
    async fn latest_by_category(
        &self,
        category: Category,
        language: Language,
    ) -> CatalogResult<Option<Announcement>>;

    /// Looks categories up concurrently; categories with no row are omitted.
    async fn latest_by_categories(
        &self,
        categories: &[Category],
        language: Language,
    ) -> CatalogResult<Vec<Announcement>> {
        let found = try_join_all(
            categories
                .iter()
                .map(|category| self.latest_by_category(*category, language)),
        )
        .await?;
        Ok(found.into_iter().flatten().collect())
    }
}

/// Supabase PostgREST table reader
pub struct SupabaseStore {
    client: Client,
    base: Url,
    table: String,
}

impl SupabaseStore {
    pub fn new(config: &AnnouncementsConfig, http: &HttpClientConfig) -> CatalogResult<Self> {
        let (url, key) = match (&config.url, &config.service_role_key) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => (url, key),
            _ => {
                return Err(CatalogError::Announcements(
                    "Missing Supabase environment variables: SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required"
                        .to_string(),
                ))
            }
        };

        let base = Url::parse(url)
            .map_err(|e| CatalogError::ConfigError(format!("Invalid Supabase URL {}: {}", url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let invalid = |_| CatalogError::ConfigError("Invalid Supabase service role key".to_string());
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?,
        );

        let mut builder = Client::builder()
            .user_agent(http.user_agent.clone())
            .default_headers(headers);
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base,
            table: config.table.clone(),
        })
    }

    fn table_url(&self) -> CatalogResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::ConfigError(format!("Supabase URL cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(["rest", "v1", self.table.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl AnnouncementStore for SupabaseStore {
    async fn latest_by_category(
        &self,
        category: Category,
        language: Language,
    ) -> CatalogResult<Option<Announcement>> {
        let url = self.table_url()?;
        debug!("Fetching latest {} announcement", category);

        let response = self
            .client
            .get(url)
            .query(&[
                ("select", "*".to_string()),
                ("category", format!("eq.{}", category)),
                ("order", "created_at.desc".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Announcements(format!(
                "Failed to fetch announcement: {} {}",
                status.as_u16(),
                body
            )));
        }

        let rows: Vec<AnnouncementRaw> = response.json().await?;
        Ok(rows.into_iter().next().map(|row| row.localize(language)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials() {
        let config = AnnouncementsConfig::default();
        let err = SupabaseStore::new(&config, &HttpClientConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_table_url() {
        let config = AnnouncementsConfig {
            url: Some("https://project.supabase.co/".to_string()),
            service_role_key: Some("secret".to_string()),
            table: "announcements".to_string(),
        };
        let store = SupabaseStore::new(&config, &HttpClientConfig::default()).unwrap();
        assert_eq!(
            store.table_url().unwrap().as_str(),
            "https://project.supabase.co/rest/v1/announcements"
        );
    }
}
