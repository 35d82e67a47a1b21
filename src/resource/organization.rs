//! Organizations

use super::handle::Entity;
use serde::{Deserialize, Serialize};

/// Billing/access boundary owning spaces (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: String,
}

impl Entity for Organization {
    const KIND: &'static str = "Organization";
    const COLLECTION: &'static str = "organizations";
    const SPACE_SCOPED: bool = false;
    const VERSIONED: bool = false;
}
