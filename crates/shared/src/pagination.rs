use serde::{Deserialize, Serialize};

/// Page-number query parameters shared by every paginated endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn limit_or(&self, default: i64) -> i64 {
        self.limit.filter(|l| *l >= 1).unwrap_or(default)
    }

    pub fn offset(&self, default_limit: i64) -> i64 {
        (self.page() - 1) * self.limit_or(default_limit)
    }
}

/// Paginated response envelope with absolute neighbour links.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: i64, results: Vec<T>) -> Self {
        Self {
            count,
            next: None,
            previous: None,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit_or(6), 6);
        assert_eq!(query.offset(6), 0);
    }

    #[test]
    fn offset_follows_page_and_limit() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(query.offset(6), 20);
    }

    #[test]
    fn rejects_non_positive_values() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(-5),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit_or(6), 6);
    }
}
