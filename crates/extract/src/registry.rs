// ABOUTME: Component registry mapping stable identifiers to schema-validated constructors.
// ABOUTME: Validates raw options against each component's schema before any construction runs.

//! The component registry.
//!
//! Document-processing strategies (loaders, splitters) register once under
//! a stable dotted identifier together with an options schema and a
//! constructor. Callers then build fully initialized components from
//! externally supplied JSON options; configuration errors are caught
//! before construction and attributed to a specific identifier and field.
//!
//! Registration happens during single-threaded process startup; after
//! that the registry is read-only and safe to share across threads.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ExtractError;
use crate::loader::{HtmlLoader, Loader, TextLoader};
use crate::schema::{format_violations, Schema};
use crate::splitter::{ParagraphSplitter, Splitter};

/// A constructed component: a shared handle to one capability.
#[derive(Clone)]
pub enum Component {
    Loader(Arc<dyn Loader>),
    Splitter(Arc<dyn Splitter>),
}

impl Component {
    /// The capability kind, for display and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Loader(_) => "loader",
            Component::Splitter(_) => "splitter",
        }
    }

    /// Borrows the loader capability, if this component is a loader.
    pub fn as_loader(&self) -> Option<&Arc<dyn Loader>> {
        match self {
            Component::Loader(loader) => Some(loader),
            _ => None,
        }
    }

    /// Borrows the splitter capability, if this component is a splitter.
    pub fn as_splitter(&self) -> Option<&Arc<dyn Splitter>> {
        match self {
            Component::Splitter(splitter) => Some(splitter),
            _ => None,
        }
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.kind()).finish()
    }
}

type BuildFn = Box<dyn Fn(&Value) -> Result<Component, ExtractError> + Send + Sync>;

/// A registered component: identity, options schema, and constructor.
pub struct ComponentDefinition {
    identifier: String,
    display_name: String,
    options_schema: Schema,
    build: BuildFn,
}

impl ComponentDefinition {
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        options_schema: Schema,
        build: impl Fn(&Value) -> Result<Component, ExtractError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            options_schema,
            build: Box::new(build),
        }
    }

    /// Globally unique, stable identifier, e.g. `rag.loader.html`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The schema raw options are validated against before construction.
    /// Serializable, so configuration UIs can introspect it.
    pub fn options_schema(&self) -> &Schema {
        &self.options_schema
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("identifier", &self.identifier)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

/// Process-wide catalog of component definitions.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the definition keyed by its identifier.
    /// Re-registering an identifier overwrites the prior entry.
    pub fn register(&mut self, definition: ComponentDefinition) {
        debug!(identifier = definition.identifier(), "registering component");
        self.components
            .insert(definition.identifier().to_string(), definition);
    }

    /// Looks up a definition by identifier.
    pub fn definition(&self, identifier: &str) -> Option<&ComponentDefinition> {
        self.components.get(identifier)
    }

    /// All registered identifiers, sorted for deterministic enumeration.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.components.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }

    /// Validates options and constructs a component.
    ///
    /// Fails with `UnknownComponent` when the identifier is not
    /// registered, `InvalidConfiguration` when options fail schema
    /// validation, and whatever the component's own constructor raises
    /// (typically `Construction` or `InvalidPattern`) after that.
    pub fn create(&self, identifier: &str, options: &Value) -> Result<Component, ExtractError> {
        let definition = self
            .components
            .get(identifier)
            .ok_or_else(|| ExtractError::unknown_component(identifier))?;

        if let Err(violations) = definition.options_schema.validate(options) {
            return Err(ExtractError::invalid_configuration(
                identifier,
                format_violations(&violations),
            ));
        }

        (definition.build)(options)
    }

    /// Constructs one instance of every registered component from empty
    /// options, in sorted identifier order.
    ///
    /// Intended for enumeration and introspection (listing available
    /// strategies), not for production use where explicit options matter.
    /// A definition whose default construction fails reports its
    /// identifier alongside the error instead of aborting the batch.
    pub fn create_all(&self) -> Vec<(String, Result<Component, ExtractError>)> {
        let empty = Value::Object(Map::new());
        self.identifiers()
            .into_iter()
            .map(|identifier| (identifier.to_string(), self.create(identifier, &empty)))
            .collect()
    }
}

/// Builds the registry of built-in components.
pub fn builtin_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    registry.register(HtmlLoader::definition());
    registry.register(TextLoader::definition());
    registry.register(ParagraphSplitter::definition());
    registry
}
