use serde::Serialize;
use utoipa::ToSchema;

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod courses;
pub mod health;
pub mod leave;
pub mod notifications;
pub mod parents;
pub mod sessions;
pub mod users;

/// Pagination block shared by every list endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// Envelope for create endpoints that only echo the new row id.
#[derive(Debug, Serialize, ToSchema)]
pub struct IdResponse {
    pub success: bool,
    pub id: i32,
}

impl IdResponse {
    pub fn new(id: i32) -> Self {
        Self { success: true, id }
    }
}

/// Zero means "not supplied"; fall back to the defaults page=1, limit=10.
pub(crate) fn normalize_paging(page: u64, limit: u64) -> (u64, u64) {
    let page = if page == 0 { 1 } else { page };
    let limit = if limit == 0 { 10 } else { limit };
    (page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceil_of_total_over_limit() {
        assert_eq!(Pagination::new(0, 1, 10).total_pages, 0);
        assert_eq!(Pagination::new(10, 1, 10).total_pages, 1);
        assert_eq!(Pagination::new(11, 1, 10).total_pages, 2);
        assert_eq!(Pagination::new(25, 2, 10).total_pages, 3);
        assert_eq!(Pagination::new(1, 1, 1).total_pages, 1);
    }

    #[test]
    fn zero_paging_inputs_fall_back_to_defaults() {
        assert_eq!(normalize_paging(0, 0), (1, 10));
        assert_eq!(normalize_paging(3, 25), (3, 25));
    }
}
