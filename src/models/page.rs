use crate::models::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Columns a page may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    UserId,
    Username,
    Action,
    CreatedAt,
}

impl SortField {
    /// Column name in the Logs table
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::UserId => "User_ID",
            SortField::Username => "Username",
            SortField::Action => "Action",
            SortField::CreatedAt => "Created_At",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "userId" | "user_id" => Ok(SortField::UserId),
            "username" => Ok(SortField::Username),
            "action" => Ok(SortField::Action),
            "createdAt" | "created_at" => Ok(SortField::CreatedAt),
            other => Err(DomainError::InvalidPageRequest(format!(
                "unknown sort field '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(DomainError::InvalidPageRequest(format!(
                "unknown sort direction '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

/// Parses `field` or `field,direction`, e.g. `createdAt,desc`
impl FromStr for Sort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(2, ',');
        let field = parts.next().unwrap_or_default().parse::<SortField>()?;
        let direction = match parts.next() {
            Some(direction) => direction.parse::<Direction>()?,
            None => Direction::default(),
        };
        Ok(Sort { field, direction })
    }
}

/// Which page of records to fetch. `page` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    size: usize,
    sort: Option<Sort>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(DomainError::InvalidPageRequest(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page,
            size,
            sort: None,
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Number of records before this page
    pub fn offset(&self) -> u64 {
        (self.page as u64).saturating_mul(self.size as u64)
    }
}

/// One page of results plus the total number of matching elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

fn total_pages(total_elements: u64, size: usize) -> u64 {
    if size == 0 {
        return 0;
    }
    total_elements.div_ceil(size as u64)
}

impl<T> PageResult<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page(),
            size: request.size(),
            total_elements,
            total_pages: total_pages(total_elements, request.size()),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    /// Convert the content while keeping the page metadata
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}
