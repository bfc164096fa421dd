//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::Page;

/// Offset/limit query parameters for list endpoints.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Records to skip from the start. Defaults to 0.
    pub skip: Option<u32>,
    /// Maximum records to return (max 100). Defaults to 100.
    pub limit: Option<u32>,
}

impl PaginationParams {
    /// Converts to a clamped [`Page`].
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(self.skip, self.limit)
    }
}
