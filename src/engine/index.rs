//! Index lifecycle and mapping administration.
//!
//! Simple idempotent calls against the handle's base index. The caller is
//! responsible for closing and reopening the index around mapping changes
//! when the engine requires it.

use crate::document::{resolve_path, Document};
use crate::mapping::MappingBuilder;

use super::errors::{EngineError, EngineResult};
use super::transport::Method;
use super::{Engine, ACTION_CLOSE, ACTION_MAPPING, ACTION_OPEN, ACTION_STATS};

impl Engine {
    /// Creates the index.
    pub fn create_index(&self) -> EngineResult<()> {
        self.send(Method::Put, &self.index_url(), None)?;
        Ok(())
    }

    /// Probes for the index and creates it when missing. Returns whether
    /// the index was created.
    pub fn create_index_if_needed(&self) -> EngineResult<bool> {
        if self.index_exists()? {
            return Ok(false);
        }
        self.create_index()?;
        Ok(true)
    }

    /// Whether the index answers a stats probe.
    pub fn index_exists(&self) -> EngineResult<bool> {
        match self.send(Method::Get, &self.url_for(ACTION_STATS), None) {
            Ok(_) => Ok(true),
            Err(EngineError::Http { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Opens a closed index.
    pub fn open_index(&self) -> EngineResult<()> {
        self.send(Method::Post, &self.url_for(ACTION_OPEN), None)?;
        Ok(())
    }

    /// Closes the index.
    pub fn close_index(&self) -> EngineResult<()> {
        self.send(Method::Post, &self.url_for(ACTION_CLOSE), None)?;
        Ok(())
    }

    /// Deletes the index and everything stored under it.
    pub fn delete_index(&self) -> EngineResult<()> {
        self.send(Method::Delete, &self.index_url(), None)?;
        Ok(())
    }

    /// Installs the mapping declaration for the object's storage path.
    pub fn set_mapping<T: Document>(
        &self,
        object: &T,
        mapping: &MappingBuilder,
    ) -> EngineResult<()> {
        self.set_mapping_raw_json(object, &mapping.to_json()?)
    }

    /// Installs a prebuilt mapping document for the object's storage path.
    pub fn set_mapping_raw_json<T: Document>(&self, object: &T, mapping: &str) -> EngineResult<()> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, ACTION_MAPPING));
        self.send(Method::Put, &url, Some(mapping.to_owned()))?;
        Ok(())
    }

    /// Fetches the current mapping of the object's storage path.
    pub fn get_mapping<T: Document>(&self, object: &T) -> EngineResult<String> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, ACTION_MAPPING));
        let response = self.send(Method::Get, &url, None)?;
        Ok(response.body)
    }

    /// Removes the mapping of the object's storage path along with its
    /// documents.
    pub fn delete_mapping<T: Document>(&self, object: &T) -> EngineResult<String> {
        let path = resolve_path(object)?;
        let url = self.url_for(&format!("{}{}", path, ACTION_MAPPING));
        let response = self.send(Method::Delete, &url, None)?;
        Ok(response.body)
    }
}
