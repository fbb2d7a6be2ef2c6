use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use util::dates::parse_day;
use validator::Validate;

pub const DEFAULT_PER_PAGE: u64 = 20;

/// `?page=&per_page=` shared by every list endpoint.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct Pagination {
    #[validate(range(min = 1))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u64>,
}

impl Pagination {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }
}

#[derive(Debug, Serialize)]
pub struct Paged<T: Serialize> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T: Serialize> Paged<T> {
    pub fn new(items: Vec<T>, pagination: &Pagination, total: u64) -> Self {
        Self {
            items,
            page: pagination.page(),
            per_page: pagination.per_page(),
            total,
        }
    }
}

/// Deserializes an optional `YYYY-MM-DD` query/body value.
pub fn optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_day(s).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid date '{s}', expected YYYY-MM-DD"))
        }),
    }
}
