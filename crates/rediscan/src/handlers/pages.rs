use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rediscan_core::{
    discovery::ListSummary,
    navigator::NavigationResult,
    paging::{step, PageTarget},
};
use crate::state::AppState;

use super::{
    html::{script_json, HtmlTemplate},
    AppError,
};

/// A discovered list as shown on the index page.
struct ListLink {
    name: String,
    size: i64,
    href: String,
}

impl From<ListSummary> for ListLink {
    fn from(summary: ListSummary) -> Self {
        let href = format!("/lindex?key={}", urlencoding::encode(&summary.name));
        Self {
            name: summary.name,
            size: summary.size,
            href,
        }
    }
}

/// Index page template listing discovered lists and the lookup form.
#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    lists: Vec<ListLink>,
}

/// Result page carrying the whole list for in-page paging.
#[derive(Template)]
#[template(path = "lindex_preloaded.html")]
struct PreloadedTemplate<'a> {
    key: &'a str,
    index: i64,
    llen: i64,
    max_index: i64,
    value: &'a str,
    key_json: String,
    values_json: String,
}

/// Result page for a single element; paging links go back to the server.
#[derive(Template)]
#[template(path = "lindex_single.html")]
struct SingleTemplate<'a> {
    key: &'a str,
    index: i64,
    llen: i64,
    max_index: i64,
    value: &'a str,
    older_href: String,
    newer_href: String,
}

/// Query parameters of `/lindex`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LindexQuery {
    pub key: Option<String>,
    pub index: Option<String>,
}

impl LindexQuery {
    /// Picks `key` and `index` out of the raw pairs; a repeated parameter
    /// keeps its first value.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "key" => &mut query.key,
                "index" => &mut query.index,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Handler for the index page (GET /).
///
/// Discovery never fails the page; store errors show up as fewer lists.
#[axum::debug_handler]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let lists = state
        .scanner
        .discover(state.max_lists)
        .await
        .into_iter()
        .map(ListLink::from)
        .collect();

    HtmlTemplate(IndexTemplate { lists })
}

/// Handler for a list element (GET /lindex?key=...&index=...).
#[axum::debug_handler]
pub async fn lindex(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let query = LindexQuery::from_pairs(pairs);
    let result = state
        .navigator
        .navigate(query.key.as_deref(), query.index.as_deref())
        .await?;

    let response = match &result {
        NavigationResult::Preloaded { key, values, .. } => HtmlTemplate(PreloadedTemplate {
            key,
            index: result.index(),
            llen: result.llen(),
            max_index: result.max_index(),
            value: result.current_value(),
            key_json: script_json(key)?,
            values_json: script_json(values)?,
        })
        .into_response(),
        NavigationResult::Single { key, .. } => {
            let href = |delta| page_href(key, result.index(), delta, result.max_index());
            HtmlTemplate(SingleTemplate {
                key,
                index: result.index(),
                llen: result.llen(),
                max_index: result.max_index(),
                value: result.current_value(),
                older_href: href(-1),
                newer_href: href(1),
            })
            .into_response()
        }
    };

    Ok(response)
}

/// Link for stepping `delta` positions when the list is not preloaded.
fn page_href(key: &str, index: i64, delta: i64, max_index: i64) -> String {
    let target: PageTarget = step(index, delta, max_index, false);
    format!("/lindex?{}", target.query(&urlencoding::encode(key)))
}
