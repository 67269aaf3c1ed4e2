use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use store::{Link, LinkCategory};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LinkQuery {
    pub category: Option<String>,
}

/// All links in insertion order, optionally narrowed to one category.
pub async fn list_links(
    State(state): State<AppState>,
    Query(query): Query<LinkQuery>,
) -> Result<Json<Vec<Link>>, ApiError> {
    let category = query
        .category
        .as_deref()
        .map(str::parse::<LinkCategory>)
        .transpose()?;

    let mut links = state.store.list::<Link>().await?;
    if let Some(category) = category {
        links.retain(|link| link.category == category);
    }
    Ok(Json(links))
}
