use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Page size applied when the requested one is out of range.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 100;

/// A task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Assigned by the store, never reused
    pub id: i64,
    pub title: String,
    pub is_done: bool,
}

/// Request body for creating a todo
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
}

/// Request body for replacing a todo's fields
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateTodo {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(alias = "isDone")]
    pub is_done: bool,
}

/// Query parameters for listing todos
///
/// Values that are not integers read as 0 and are then normalized like any
/// other out-of-range value, so listing never fails on its query.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number; values below 1 are treated as 1
    #[serde(default = "default_page", deserialize_with = "lenient_int")]
    pub page: i64,
    /// Values outside 1..=100 fall back to 20
    #[serde(default = "default_page_size", deserialize_with = "lenient_int")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE as i64
}

fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or(0))
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// A normalized page request.
///
/// `page` is always at least 1 and `page_size` is always within
/// `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: usize,
}

impl PageRequest {
    pub fn normalize(page: i64, page_size: i64) -> Self {
        let page = u64::try_from(page).ok().filter(|p| *p >= 1).unwrap_or(1);
        let page_size = usize::try_from(page_size)
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self { page, page_size }
    }

    /// Number of records preceding this page, saturating on overflow.
    pub fn offset(&self) -> usize {
        usize::try_from(self.page - 1)
            .map_or(usize::MAX, |skipped| skipped.saturating_mul(self.page_size))
    }

    pub fn limit(&self) -> usize {
        self.page_size
    }

    /// Pages needed to hold `total` records; 0 for an empty store.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }
}

/// One page of todos plus the counts needed to page through the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoPage {
    pub items: Vec<Todo>,
    pub total: usize,
    pub page: u64,
    pub page_size: usize,
    #[serde(rename = "total_page")]
    pub total_pages: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_clamps_low_values() {
        assert_eq!(PageRequest::normalize(0, 0), PageRequest::normalize(1, 20));
        assert_eq!(
            PageRequest::normalize(-5, -1),
            PageRequest {
                page: 1,
                page_size: DEFAULT_PAGE_SIZE
            }
        );
    }

    #[test]
    fn test_normalize_rejects_oversized_page_size() {
        assert_eq!(PageRequest::normalize(1, 1000), PageRequest::normalize(1, 20));
        assert_eq!(PageRequest::normalize(1, 100).page_size, 100);
        assert_eq!(PageRequest::normalize(1, 101).page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        let request = PageRequest::normalize(i64::MAX, 100);
        assert_eq!(request.offset(), usize::MAX);
        assert_eq!(PageRequest::normalize(3, 10).offset(), 20);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let request = PageRequest::normalize(1, 10);
        assert_eq!(request.total_pages(0), 0);
        assert_eq!(request.total_pages(10), 1);
        assert_eq!(request.total_pages(11), 2);
    }

    #[test]
    fn test_list_params_read_garbage_as_zero() {
        let params: ListParams =
            serde_json::from_value(serde_json::json!({ "page": "abc", "page_size": "" })).unwrap();
        assert_eq!((params.page, params.page_size), (0, 0));

        let params: ListParams = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!((params.page, params.page_size), (1, 20));
    }

    #[test]
    fn test_update_accepts_camel_case_flag() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"title":"walk dog","isDone":true}"#).unwrap();
        assert!(input.is_done);
    }

    #[test]
    fn test_page_serializes_total_page() {
        let page = TodoPage {
            items: vec![],
            total: 0,
            page: 1,
            page_size: 20,
            total_pages: 0,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["total_page"], 0);
        assert!(value.get("total_pages").is_none());
    }
}
