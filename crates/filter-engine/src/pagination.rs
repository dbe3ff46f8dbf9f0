use crate::{compiler::CompiledQuery, target::QueryExecutor};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_PER_PAGE: u64 = 20;

/// One-based page request. Zero values are clamped to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page.max(1).saturating_sub(1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> u64 {
        self.per_page.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

/// A page of results wrapped with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    #[serde(rename = "_pagination")]
    pub pagination: PageInfo,
    pub items: Vec<R>,
}

impl<R> Page<R> {
    pub fn total_pages(&self) -> u64 {
        self.pagination.total.div_ceil(self.pagination.per_page.max(1))
    }
}

/// Applies `query` to `target`, counts the matches, then fetches the
/// requested slice.
pub fn paginate<E: QueryExecutor>(
    query: CompiledQuery,
    target: &mut E,
    request: PageRequest,
) -> Result<Page<E::Record>, E::Error> {
    query.apply_to(target);

    let total = target.count()?;
    target.set_offset(request.offset());
    target.set_limit(request.limit());
    let items = target.execute()?;

    debug!(
        total,
        page = request.page,
        per_page = request.limit(),
        returned = items.len(),
        "fetched page"
    );

    Ok(Page {
        pagination: PageInfo {
            total,
            page: request.page.max(1),
            per_page: request.limit(),
        },
        items,
    })
}
