//! Pagination request and result metadata.

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }

    fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

/// One sort key: an entity property and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub property: String,
    pub direction: Direction,
}

impl Order {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }

    /// Parse one `sort` parameter value: `prop[,prop...][,asc|desc]`.
    ///
    /// A trailing direction applies to every property listed before it.
    pub fn parse_all(value: &str) -> Vec<Order> {
        let mut tokens: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        let direction = match tokens.last().and_then(|last| Direction::parse(last)) {
            Some(direction) => {
                tokens.pop();
                direction
            }
            None => Direction::Asc,
        };

        tokens
            .into_iter()
            .map(|property| Order {
                property: property.to_string(),
                direction,
            })
            .collect()
    }
}

/// Pagination parameters: zero-based page index, page size and sort keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<Order>,
}

impl Default for Pageable {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
        }
    }
}

impl Pageable {
    /// Build a request, clamping `size` into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u64, size: u64, sort: Vec<Order>) -> Self {
        let size = if size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            size.min(MAX_PAGE_SIZE)
        };
        Self { page, size, sort }
    }

    pub fn of_size(page: u64, size: u64) -> Self {
        Self::new(page, size, Vec::new())
    }

    pub fn with_sort(mut self, order: Order) -> Self {
        self.sort.push(order);
        self
    }

    /// Rows to skip, capped at the largest offset SQLite can bind.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(i64::MAX as u64)
    }

    /// Number of pages needed for `total` elements.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_property_with_direction() {
        assert_eq!(Order::parse_all("id,desc"), vec![Order::desc("id")]);
    }

    #[test]
    fn direction_defaults_to_ascending() {
        assert_eq!(Order::parse_all("title"), vec![Order::asc("title")]);
    }

    #[test]
    fn trailing_direction_applies_to_all_properties() {
        assert_eq!(
            Order::parse_all("title,author,DESC"),
            vec![Order::desc("title"), Order::desc("author")]
        );
    }

    #[test]
    fn empty_sort_value_yields_nothing() {
        assert!(Order::parse_all(" , ").is_empty());
    }

    #[test]
    fn offset_is_capped_at_signed_range() {
        let far = Pageable::of_size(10_000_000_000_000_000, MAX_PAGE_SIZE);
        assert_eq!(far.offset(), i64::MAX as u64);
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(Pageable::of_size(0, 0).size, DEFAULT_PAGE_SIZE);
        assert_eq!(Pageable::of_size(0, 50_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_and_total_pages() {
        let pageable = Pageable::of_size(3, 10);
        assert_eq!(pageable.offset(), 30);
        assert_eq!(pageable.total_pages(0), 0);
        assert_eq!(pageable.total_pages(30), 3);
        assert_eq!(pageable.total_pages(31), 4);
    }
}
