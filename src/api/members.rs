//! Member API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, ShapeError};
use crate::models::MemberPublic;
use crate::AppState;

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for the member listing. `limit` arrives as a raw string
/// so an unparseable value maps to a 422 rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct ListMembersParams {
    #[serde(default)]
    limit: Option<String>,
    #[serde(default)]
    cursor: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberPublic>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub total: u64,
}

fn parse_limit(raw: Option<&str>) -> Result<u32, AppError> {
    let limit = match raw {
        None => DEFAULT_PAGE_SIZE,
        Some(s) => s.parse::<u32>().map_err(|_| {
            AppError::Validation(ShapeError::int_parsing(vec![
                "query".to_string(),
                "limit".to_string(),
            ]))
        })?,
    };
    if limit > MAX_PAGE_SIZE {
        return Err(AppError::Validation(ShapeError::less_than_equal(
            vec!["query".to_string(), "limit".to_string()],
            MAX_PAGE_SIZE,
        )));
    }
    Ok(limit)
}

/// GET /api/v1/members - List one page of approved members.
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<ListMembersParams>,
) -> Result<Json<MemberListResponse>, AppError> {
    let limit = parse_limit(params.limit.as_deref())?;
    // an empty cursor value means "no cursor", not a cursor to resolve
    let cursor = params.cursor.as_deref().filter(|c| !c.is_empty());
    let page = state.directory.list_members(limit, cursor).await?;
    Ok(Json(MemberListResponse {
        members: page.members,
        next_cursor: page.next_cursor,
        has_more: page.has_more,
        total: page.total,
    }))
}

/// GET /api/v1/members/:id - Get a single member, approved or not.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MemberPublic>, AppError> {
    let member = state.directory.get_member(&id).await?;
    Ok(Json(member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_limit_defaults() {
        assert_eq!(parse_limit(None).unwrap(), 10);
        assert_eq!(parse_limit(Some("100")).unwrap(), 100);
        assert_eq!(parse_limit(Some("0")).unwrap(), 0);
    }

    #[test]
    fn test_parse_limit_rejects_over_max() {
        let err = parse_limit(Some("101")).unwrap_err();
        match err {
            AppError::Validation(e) => {
                assert_eq!(e.loc, vec!["query", "limit"]);
                assert_eq!(e.kind, "less_than_or_equal");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_limit_rejects_garbage() {
        let err = parse_limit(Some("ten")).unwrap_err();
        match err {
            AppError::Validation(e) => assert_eq!(e.kind, "int_parsing"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
