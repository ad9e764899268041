//! Storage path resolution
//!
//! A storage path is the namespace segment documents of one type live
//! under. A type may describe its own path; otherwise the path derives
//! from the type identity: fully qualified name, lower-cased, `::` folded
//! to `_`, terminated with the separator.

use super::errors::{DocumentError, DocumentResult};
use super::Document;

/// Separator terminating every storage path.
pub(crate) const PATH_SEPARATOR: char = '/';

/// Resolves the storage path for an object.
///
/// A self-described path from [`Document::storage_path`] wins, after
/// validation. The result is a pure function of the object's type and its
/// optional override.
pub fn resolve_path<T: Document>(object: &T) -> DocumentResult<String> {
    if let Some(path) = object.storage_path() {
        if path.len() < 2 || !path.ends_with(PATH_SEPARATOR) {
            return Err(DocumentError::InvalidSelfPath {
                type_name: std::any::type_name::<T>(),
                path,
            });
        }
        return Ok(path);
    }
    derived_path::<T>()
}

/// Derives a path from the type's fully qualified identity.
///
/// Unnameable types (closures) cannot implement [`Document`], so the
/// failure arm is a local guard on the invariant rather than a reachable
/// caller path.
fn derived_path<T>() -> DocumentResult<String> {
    let identity = std::any::type_name::<T>();
    if identity.is_empty() || identity.contains("{{closure}}") {
        return Err(DocumentError::UnnamedType {
            type_name: identity,
        });
    }
    let mut path = identity.to_ascii_lowercase().replace("::", "_");
    path.push(PATH_SEPARATOR);
    if path.len() < 2 {
        return Err(DocumentError::UnnamedType {
            type_name: identity,
        });
    }
    Ok(path)
}
