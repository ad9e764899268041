//! Sort directives.

use serde::Serialize;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Sort mode for multi-valued fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Engine default; omitted from the serialized directive
    Default,
    Min,
    Max,
    Avg,
    Sum,
}

/// Body of one `{field: {"order": ..., "mode": ...}}` sort directive.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SortSpec {
    pub order: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SortMode>,
}
