use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{Page, PageBundle, SeoCatalog};
use crate::error::AppError;

/// Router builder serving page head bundles.
pub fn seo_router(catalog: Arc<SeoCatalog>) -> Router {
    Router::new()
        .route("/api/v1/seo/:page", get(page_handler))
        .with_state(catalog)
}

pub(crate) async fn page_handler(
    State(catalog): State<Arc<SeoCatalog>>,
    Path(slug): Path<String>,
) -> Result<Json<PageBundle>, AppError> {
    let page = Page::from_slug(&slug).ok_or(AppError::UnknownPage(slug))?;
    Ok(Json(catalog.bundle(page)))
}
