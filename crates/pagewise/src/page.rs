//! Page requests and in-memory page slicing.
//!
//! [`PageRequest`] and [`PageFilter`] are the request-side shapes a list
//! endpoint deserializes; [`page`] cuts an already-materialized list down to
//! the requested page.

use serde::{Deserialize, Serialize};

use crate::ordering::{Direction, Order, Sort};

/// A sort criterion as received from a client.
///
/// Either field may be missing; only complete entries are turned into
/// [`Order`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Requested sort direction.
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Requested property name.
    #[serde(default)]
    pub name: Option<String>,
}

impl OrderRequest {
    /// Creates a complete request.
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        OrderRequest {
            direction: Some(direction),
            name: Some(name.into()),
        }
    }

    /// Returns `true` if both a direction and a non-empty name are present.
    pub fn is_valid(&self) -> bool {
        self.direction.is_some() && self.name.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Converts to an [`Order`], or `None` if incomplete.
    pub fn as_order(&self) -> Option<Order> {
        match (&self.name, self.direction) {
            (Some(name), Some(direction)) if !name.is_empty() => {
                Some(Order::new(name.clone(), direction))
            }
            _ => None,
        }
    }
}

/// A page request: zero-based page number, page size and sort criteria.
///
/// # Example
///
/// ```
/// use pagewise::PageRequest;
///
/// let request: PageRequest = serde_json::from_str(
///     r#"{"pageNumber": 2, "pageSize": 10, "orders": [{"name": "id", "direction": "DESC"}]}"#,
/// ).unwrap();
/// assert_eq!(request.offset(), 20);
/// assert_eq!(request.sort().first().unwrap().property, "id");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page_number: usize,
    /// Number of items per page. `0` means unpaged.
    #[serde(default)]
    pub page_size: usize,
    /// Requested sort criteria, most significant first.
    #[serde(default)]
    pub orders: Vec<OrderRequest>,
}

impl PageRequest {
    /// Creates a request for one page without sorting.
    pub fn new(page_number: usize, page_size: usize) -> Self {
        PageRequest {
            page_number,
            page_size,
            orders: Vec::new(),
        }
    }

    /// Adds a sort criterion.
    pub fn order(mut self, name: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(OrderRequest::new(name, direction));
        self
    }

    /// Index of the first item on the requested page.
    pub fn offset(&self) -> usize {
        self.page_number.saturating_mul(self.page_size)
    }

    /// The sort built from the valid criteria. Incomplete entries are
    /// dropped; no valid entry means unsorted.
    pub fn sort(&self) -> Sort {
        Sort::by(self.orders.iter().filter_map(OrderRequest::as_order))
    }

    /// Returns `true` if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.offset() > 0
    }

    /// Returns `true` if a page size is set.
    pub fn is_paged(&self) -> bool {
        self.page_size > 0
    }
}

/// A list request combining a typed filter, paging and free-text search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFilter<F> {
    /// Structural filter object.
    #[serde(default)]
    pub filter: Option<F>,
    /// Paging and sort criteria.
    #[serde(default)]
    pub pageable: Option<PageRequest>,
    /// Free-text search term.
    #[serde(default)]
    pub search: Option<String>,
}

impl<F> Default for PageFilter<F> {
    fn default() -> Self {
        PageFilter {
            filter: None,
            pageable: None,
            search: None,
        }
    }
}

impl<F> PageFilter<F> {
    /// Returns `true` if a filter object is present.
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Returns `true` if a non-empty search term is present.
    pub fn has_search(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// One page of a list, with the total size of the list it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: usize,
    /// Requested page size.
    pub size: usize,
    /// Number of items in the whole list.
    pub total: usize,
}

impl<T> Page<T> {
    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Maps the page content, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total: self.total,
        }
    }
}

/// Cuts `items` down to the page described by `request`.
///
/// Keeps `[offset, min(len, offset + page_size))`. An offset past the end of
/// the list yields an empty page; `total` is always the full list length.
/// An unpaged request keeps every item.
///
/// # Example
///
/// ```
/// use pagewise::{page, PageRequest};
///
/// let items: Vec<u32> = (0..25).collect();
/// let last = page(items, &PageRequest::new(2, 10));
/// assert_eq!(last.content, (20..25).collect::<Vec<_>>());
/// assert_eq!(last.total, 25);
/// ```
pub fn page<T>(mut items: Vec<T>, request: &PageRequest) -> Page<T> {
    let total = items.len();
    if !request.is_paged() {
        return Page {
            content: items,
            number: 0,
            size: total,
            total,
        };
    }

    let begin = request.offset().min(total);
    let end = begin.saturating_add(request.page_size).min(total);
    items.truncate(end);
    let content = items.split_off(begin);

    Page {
        content,
        number: request.page_number,
        size: request.page_size,
        total,
    }
}
