//! The tool descriptor store.
//!
//! Holds the ordered, immutable collection of tool descriptors the server
//! exposes. The catalog is built once at startup, then shared read-only
//! behind an `Arc`; no locking is needed because it is never mutated after
//! initialisation.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::catalog::descriptor::ToolDescriptor;
use crate::error::{CatalogError, DispatchError};

/// An ordered collection of tool descriptors.
///
/// Enumeration order is registration order, so `tools/list` responses are
/// stable and deterministic across runs.
#[derive(Debug, Default)]
pub struct ToolCatalog {
    tools: IndexMap<String, Arc<ToolDescriptor>>,
}

impl ToolCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a sequence of descriptors.
    ///
    /// # Errors
    ///
    /// Returns the first registration failure; the partially built
    /// catalog is dropped.
    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        let mut catalog = Self::new();
        for descriptor in descriptors {
            catalog.register(descriptor)?;
        }
        Ok(catalog)
    }

    /// Registers a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateTool`] if the name is already
    /// present, or [`CatalogError::Schema`] if the path template references
    /// a field absent from the input schema. A failed call leaves the
    /// catalog unchanged.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), CatalogError> {
        if self.tools.contains_key(&descriptor.name) {
            return Err(CatalogError::DuplicateTool {
                name: descriptor.name,
            });
        }

        let declared = descriptor.declared_fields();
        for placeholder in descriptor.path_placeholders() {
            if placeholder.is_empty() {
                return Err(CatalogError::Schema {
                    tool: descriptor.name.clone(),
                    message: format!(
                        "path template '{}' contains an empty placeholder",
                        descriptor.path_template
                    ),
                });
            }
            if !declared.contains(&placeholder) {
                return Err(CatalogError::Schema {
                    tool: descriptor.name.clone(),
                    message: format!(
                        "path placeholder '{{{placeholder}}}' is not declared in inputSchema"
                    ),
                });
            }
        }

        self.tools
            .insert(descriptor.name.clone(), Arc::new(descriptor));
        Ok(())
    }

    /// Looks up a descriptor by name.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTool`] if no descriptor with that
    /// name is registered.
    pub fn lookup(&self, name: &str) -> Result<Arc<ToolDescriptor>, DispatchError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| DispatchError::UnknownTool {
                name: name.to_string(),
            })
    }

    /// Enumerates the descriptors in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values().map(Arc::as_ref)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
