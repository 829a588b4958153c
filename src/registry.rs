//! Named factories for writers and reconcilers
//!
//! The binary selects a writer and a reconciler by name. Both registries are
//! plain name → factory maps filled by explicit `register` calls; library
//! users add their own entries without touching the engine.

use std::collections::BTreeMap;

use crate::adapters::writers::{
    CsvWriter, FailingWriter, JsonWriter, NoOpWriter, PrettyWriter, WriterOptions,
};
use crate::core::ports::DiffWriter;
use crate::core::services::{KeyedReconciler, NoOpReconciler, ReconcileConfig, Reconciler};
use crate::error::{ReconcileError, Result};

/// Builds a writer from its options
pub type WriterFactory = Box<dyn Fn(WriterOptions) -> Box<dyn DiffWriter> + Send + Sync>;

/// Builds a reconciler from its configuration
pub type ReconcilerFactory =
    Box<dyn Fn(&ReconcileConfig) -> Result<Box<dyn Reconciler>> + Send + Sync>;

/// Writer factories by name
#[derive(Default)]
pub struct WriterRegistry {
    factories: BTreeMap<String, WriterFactory>,
}

impl std::fmt::Debug for WriterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterRegistry").field("names", &self.names()).finish()
    }
}

impl WriterRegistry {
    /// Name of the writer used when none is requested
    pub const DEFAULT: &'static str = "pretty";

    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in writers
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("pretty", |options| Box::new(PrettyWriter::new(options)));
        registry.register("csv", |_| Box::new(CsvWriter));
        registry.register("fail", |_| Box::new(FailingWriter));
        registry.register("json", |_| Box::new(JsonWriter));
        registry.register("noop", |_| Box::new(NoOpWriter));
        registry
    }

    /// Register a factory, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(WriterOptions) -> Box<dyn DiffWriter> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Build the writer registered under `name`
    pub fn create(&self, name: &str, options: WriterOptions) -> Result<Box<dyn DiffWriter>> {
        self.factories.get(name).map(|factory| factory(options)).ok_or_else(|| {
            ReconcileError::UnknownWriter {
                name: name.to_string(),
                available: self.names().join(", "),
            }
        })
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Whether a writer is registered under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

/// Reconciler factories by name
#[derive(Default)]
pub struct ReconcilerRegistry {
    factories: BTreeMap<String, ReconcilerFactory>,
}

impl std::fmt::Debug for ReconcilerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcilerRegistry").field("names", &self.names()).finish()
    }
}

impl ReconcilerRegistry {
    /// Name of the reconciler used when none is requested
    pub const DEFAULT: &'static str = "keyed";

    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in reconcilers
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register("keyed", |config| Ok(Box::new(KeyedReconciler::new(config)?)));
        registry.register("noop", |_| Ok(Box::new(NoOpReconciler)));
        registry
    }

    /// Register a factory, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&ReconcileConfig) -> Result<Box<dyn Reconciler>> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Build the reconciler registered under `name`
    pub fn create(&self, name: &str, config: &ReconcileConfig) -> Result<Box<dyn Reconciler>> {
        let factory = self.factories.get(name).ok_or_else(|| ReconcileError::UnknownReconciler {
            name: name.to_string(),
            available: self.names().join(", "),
        })?;
        factory(config)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
