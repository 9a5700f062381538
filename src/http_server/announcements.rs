//! Announcements route

use crate::announcements::{Category, Language};
use crate::http_server::server::AppState;
use crate::utils::errors::{CatalogError, CatalogResult};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

const ANNOUNCEMENTS_CACHE: &str = "public, max-age=300";

#[derive(Debug, Deserialize)]
pub struct AnnouncementsQuery {
    pub category: Option<String>,
    pub language: Option<String>,
}

fn bad_request(body: Value) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Validated query, or the 400 response to send instead
fn parse_query(query: &AnnouncementsQuery) -> Result<(Vec<Category>, Language), Response> {
    let raw_categories = match query.category.as_deref() {
        Some(c) if !c.is_empty() => c,
        _ => return Err(bad_request(json!({ "error": "Category parameter is required" }))),
    };
    let raw_language = match query.language.as_deref() {
        Some(l) if !l.is_empty() => l,
        _ => return Err(bad_request(json!({ "error": "Language parameter is required" }))),
    };

    let valid_languages: Vec<&str> = Language::ALL.iter().map(Language::as_str).collect();
    let language = raw_language.parse::<Language>().map_err(|invalid| {
        bad_request(json!({
            "error": "Invalid language",
            "invalidLanguage": invalid,
            "validLanguages": valid_languages,
        }))
    })?;

    let requested: Vec<&str> = raw_categories
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect();
    if requested.is_empty() {
        return Err(bad_request(json!({ "error": "At least one category is required" })));
    }

    let (categories, invalid): (Vec<_>, Vec<_>) = requested
        .into_iter()
        .map(str::parse::<Category>)
        .partition(Result::is_ok);
    if !invalid.is_empty() {
        let invalid: Vec<String> = invalid.into_iter().filter_map(Result::err).collect();
        let valid: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        return Err(bad_request(json!({
            "error": "Invalid categories",
            "invalidCategories": invalid,
            "validCategories": valid,
        })));
    }

    Ok((categories.into_iter().filter_map(Result::ok).collect(), language))
}

/// GET /api/announcements
pub async fn announcements(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnnouncementsQuery>,
) -> CatalogResult<Response> {
    let (categories, language) = match parse_query(&query) {
        Ok(parsed) => parsed,
        Err(response) => return Ok(response),
    };

    let store = state.announcements.as_ref().ok_or_else(|| {
        CatalogError::Announcements(
            "Missing Supabase environment variables: SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY are required"
                .to_string(),
        )
    })?;

    let body = if let [category] = categories.as_slice() {
        let found = store.latest_by_category(*category, language).await?;
        json!({ "announcement": found })
    } else {
        let found = store.latest_by_categories(&categories, language).await?;
        json!({ "total": found.len(), "announcements": found })
    };

    Ok(([(header::CACHE_CONTROL, ANNOUNCEMENTS_CACHE)], Json(body)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, language: Option<&str>) -> AnnouncementsQuery {
        AnnouncementsQuery {
            category: category.map(str::to_string),
            language: language.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_valid_query() {
        let (categories, language) = parse_query(&query(Some("app, privacy"), Some("es"))).unwrap();
        assert_eq!(categories, vec![Category::App, Category::Privacy]);
        assert_eq!(language, Language::Es);
    }

    #[test]
    fn test_parse_rejects() {
        for q in [
            query(None, Some("es")),
            query(Some("app"), None),
            query(Some("app"), Some("fr")),
            query(Some(" , "), Some("en")),
            query(Some("app,news"), Some("en")),
        ] {
            let response = parse_query(&q).unwrap_err();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }
}
