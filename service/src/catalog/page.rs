use mc_model::{PaginatedResponse, PaginationMeta};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 20;

/// A requested window over a collection. Both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Zero values fall back to the defaults.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 {
                DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Slice `items` to this window. `total` is the length of `items`.
    #[must_use]
    pub fn paginate<T: Clone>(&self, items: &[T]) -> PaginatedResponse<T> {
        let start = u64::from(self.page - 1) * u64::from(self.per_page);
        let end = start + u64::from(self.per_page);
        let len = items.len() as u64;

        let data = if start >= len {
            Vec::new()
        } else {
            // Both bounds fit in usize once clamped to len.
            let (start, end) = (start as usize, end.min(len) as usize);
            items[start..end].to_vec()
        };

        PaginatedResponse {
            data,
            pagination: PaginationMeta {
                page: self.page,
                per_page: self.per_page,
                total: len,
            },
        }
    }
}

/// Page over an owned, already-filtered iterator.
pub fn paginate_iter<T, I>(items: I, page: PageRequest) -> PaginatedResponse<T>
where
    T: Clone,
    I: IntoIterator<Item = T>,
{
    let items: Vec<T> = items.into_iter().collect();
    page.paginate(&items)
}
