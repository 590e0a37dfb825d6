//! Directory services: member listing (the pagination core), member detail,
//! and filter listings. Each operation is a sequence of independent store
//! round-trips followed by pure in-memory shaping; there is no shared
//! mutable state and no local retry or recovery.

use std::sync::Arc;

use crate::errors::{AppError, ShapeError};
use crate::models::{MemberPublic, Status};
use crate::store::{collections, Document, DocumentStore};

/// One page of the member listing.
#[derive(Debug)]
pub struct MemberPage {
    pub members: Vec<MemberPublic>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub total: u64,
}

/// Read-side service layer over the document store.
#[derive(Clone)]
pub struct Directory {
    store: Arc<dyn DocumentStore>,
}

impl Directory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// List one page of approved members in document-id order.
    ///
    /// The cursor is a member document id; paging resumes strictly after it.
    /// A cursor naming a nonexistent document (deleted included) is an
    /// immediate error, never a silent skip. One extra document is fetched
    /// to detect a following page without a second listing round-trip.
    ///
    /// `total` always counts the full approved set, independent of cursor
    /// position. Page and count are two separate round-trips with no
    /// snapshot isolation, so they can disagree under concurrent writes.
    pub async fn list_members(
        &self,
        limit: u32,
        cursor: Option<&str>,
    ) -> Result<MemberPage, AppError> {
        if let Some(cursor) = cursor {
            if !self.store.exists(collections::MEMBERS, cursor).await? {
                return Err(AppError::InvalidCursor);
            }
        }

        let docs = self
            .store
            .list(
                collections::MEMBERS,
                Status::Approved.as_str(),
                cursor,
                Some(limit + 1),
            )
            .await?;

        let has_more = docs.len() as u32 > limit;
        let mut members = Vec::with_capacity(docs.len().min(limit as usize));
        for doc in docs.iter().take(limit as usize) {
            members.push(MemberPublic::from_document(doc)?);
        }
        let next_cursor = if has_more {
            members.last().map(|m| m.id.clone())
        } else {
            None
        };

        let total = self
            .store
            .count(collections::MEMBERS, Status::Approved.as_str())
            .await?;

        Ok(MemberPage {
            members,
            next_cursor,
            has_more,
            total,
        })
    }

    /// Fetch a single member by id. No status filter: a pending or declined
    /// member is still returned, unlike the listing.
    pub async fn get_member(&self, id: &str) -> Result<MemberPublic, AppError> {
        match self.store.get(collections::MEMBERS, id).await? {
            Some(doc) => Ok(MemberPublic::from_document(&doc)?),
            None => Err(AppError::NotFound("member not found".to_string())),
        }
    }

    /// List every document in `collection` with the given status, shaped via
    /// `shape`. The whole matching set materializes in memory (filter
    /// collections are small) and the first shaping failure aborts the
    /// listing.
    pub async fn list_filters<T>(
        &self,
        collection: &str,
        status: Status,
        shape: fn(&Document) -> Result<T, ShapeError>,
    ) -> Result<Vec<T>, AppError> {
        let docs = self
            .store
            .list(collection, status.as_str(), None, None)
            .await?;
        docs.iter()
            .map(|doc| shape(doc).map_err(AppError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Focus;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    fn member_fields(name: &str, status: &str) -> serde_json::Value {
        json!({
            "name": name,
            "masked_email": "m***@example.com",
            "link": "https://example.com",
            "location": "Hilo, HI",
            "title": "Engineer",
            "status": status,
            "focuses": [],
            "industries": [],
            "regions": []
        })
    }

    fn seeded(approved: usize, pending: usize) -> Directory {
        let mut store = MemoryStore::new();
        for i in 0..approved {
            let id = format!("member-{:02}", i);
            store.insert(
                "members",
                &id,
                member_fields(&format!("Member {}", i), "approved"),
            );
        }
        for i in 0..pending {
            let id = format!("pending-{:02}", i);
            store.insert(
                "members",
                &id,
                member_fields(&format!("Pending {}", i), "pending"),
            );
        }
        Directory::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_page_size_and_has_more() {
        let directory = seeded(25, 0);
        let page = directory.list_members(10, None).await.unwrap();
        assert_eq!(page.members.len(), 10);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("member-09"));
        assert_eq!(page.total, 25);
    }

    #[tokio::test]
    async fn test_cursor_walk_visits_each_member_once() {
        let directory = seeded(25, 0);
        let mut seen = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;
        loop {
            let page = directory.list_members(10, cursor.as_deref()).await.unwrap();
            assert_eq!(page.total, 25);
            seen.extend(page.members.iter().map(|m| m.id.clone()));
            pages += 1;
            match page.next_cursor {
                Some(next) => {
                    assert!(page.has_more);
                    cursor = Some(next);
                }
                None => {
                    assert!(!page.has_more);
                    break;
                }
            }
        }
        assert_eq!(pages, 3);
        assert_eq!(seen.len(), 25);
        let mut deduped = seen.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), 25);
    }

    #[tokio::test]
    async fn test_exact_multiple_ends_without_more() {
        let directory = seeded(20, 0);
        let first = directory.list_members(10, None).await.unwrap();
        assert!(first.has_more);
        let second = directory
            .list_members(10, first.next_cursor.as_deref())
            .await
            .unwrap();
        assert_eq!(second.members.len(), 10);
        assert!(!second.has_more);
        assert!(second.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_total_ignores_cursor_and_limit() {
        let directory = seeded(15, 0);
        let a = directory.list_members(3, None).await.unwrap();
        let b = directory
            .list_members(100, a.next_cursor.as_deref())
            .await
            .unwrap();
        assert_eq!(a.total, 15);
        assert_eq!(b.total, 15);
        assert_eq!(b.members.len(), 12);
        assert!(!b.has_more);
    }

    #[tokio::test]
    async fn test_pending_members_excluded_from_listing_and_total() {
        let directory = seeded(5, 3);
        let page = directory.list_members(10, None).await.unwrap();
        assert_eq!(page.members.len(), 5);
        assert_eq!(page.total, 5);
        assert!(page.members.iter().all(|m| m.id.starts_with("member-")));
    }

    #[tokio::test]
    async fn test_unknown_cursor_is_rejected() {
        let directory = seeded(5, 0);
        let err = directory.list_members(10, Some("member-99")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCursor));
    }

    #[tokio::test]
    async fn test_pending_cursor_is_accepted() {
        // cursor validity only requires existence, not approval
        let directory = seeded(5, 3);
        let page = directory.list_members(10, Some("pending-00")).await.unwrap();
        // "pending-*" ids sort after "member-*", so nothing remains
        assert!(page.members.is_empty());
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_zero_limit_reports_more_without_cursor() {
        let directory = seeded(5, 0);
        let page = directory.list_members(0, None).await.unwrap();
        assert!(page.members.is_empty());
        assert!(page.has_more);
        assert!(page.next_cursor.is_none());
        assert_eq!(page.total, 5);
    }

    #[tokio::test]
    async fn test_get_member_ignores_status() {
        let directory = seeded(1, 1);
        let member = directory.get_member("pending-00").await.unwrap();
        assert_eq!(member.status, Some(Status::Pending));
    }

    #[tokio::test]
    async fn test_get_member_not_found() {
        let directory = seeded(1, 0);
        let err = directory.get_member("missing").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_shaping_failure_aborts_listing() {
        let mut store = MemoryStore::new();
        store.insert("members", "m1", member_fields("Good", "approved"));
        let mut bad = member_fields("Bad", "approved");
        bad["company_size"] = json!("huge");
        store.insert("members", "m2", bad);
        let directory = Directory::new(Arc::new(store));

        let err = directory.list_members(10, None).await.unwrap_err();
        assert!(matches!(err, AppError::Shaping(_)));
    }

    #[tokio::test]
    async fn test_list_filters_only_matching_status() {
        let mut store = MemoryStore::new();
        store.insert(
            "focuses",
            "f1",
            json!({"name": "Engineering", "status": "approved", "members": ["m1"]}),
        );
        store.insert(
            "focuses",
            "f2",
            json!({"name": "Design", "status": "pending", "members": []}),
        );
        let directory = Directory::new(Arc::new(store));

        let focuses = directory
            .list_filters(collections::FOCUSES, Status::Approved, Focus::from_document)
            .await
            .unwrap();
        assert_eq!(focuses.len(), 1);
        assert_eq!(focuses[0].filter.name, "Engineering");
    }
}
