//! Pagination utilities for service layer
//!
//! List operations return everything unless the caller asks for a page.

use sea_orm::QuerySelect;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }

    /// Build from optional query parameters; `None` when no page was requested.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Option<Self> {
        page.map(|page| Self { page, per_page: per_page.unwrap_or(Self::default().per_page) })
    }

    /// Apply offset/limit to any selectable query.
    pub fn apply<Q: QuerySelect>(self, query: Q) -> Q {
        let (idx, per) = self.normalize();
        query.offset(idx * per).limit(per)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// Apply an optional page to a query.
pub fn paginate<Q: QuerySelect>(query: Q, page: Option<Pagination>) -> Q {
    match page {
        Some(p) => p.apply(query),
        None => query,
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn from_query_requires_page() {
        assert_eq!(Pagination::from_query(None, Some(5)), None);
        assert_eq!(Pagination::from_query(Some(2), None), Some(Pagination { page: 2, per_page: 20 }));
    }

    #[test]
    fn apply_emits_limit_offset() {
        let q = Pagination { page: 3, per_page: 10 }.apply(models::business::Entity::find());
        let sql = q.build(DbBackend::Postgres).to_string();
        assert!(sql.contains("LIMIT 10"), "{sql}");
        assert!(sql.contains("OFFSET 20"), "{sql}");
    }
}
