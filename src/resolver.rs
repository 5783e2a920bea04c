//! Schema ID resolution with per-subject caching.
//!
//! Producing a wire-format message requires the registry-assigned ID of
//! the message's schema. The resolver computes the subject for the send
//! context, consults the known-subjects cache, and on a miss talks to
//! the registry — either fetching the latest registered version
//! (`use.latest.version`) or registering/looking up the schema document
//! itself, after recursively resolving every schema file it imports.
//!
//! The cache is the only shared mutable state in the crate: reads are
//! concurrent, a miss takes the write lock briefly to store the resolved
//! ID, and entries are never invalidated. Two sends racing on the same
//! uncached subject both resolve against the registry and both store the
//! same ID, because resolution is idempotent registry-side.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use log::debug;
use prost_reflect::{FileDescriptor, MessageDescriptor};
use tokio::sync::RwLock;

use crate::config::SerializerConfig;
use crate::descriptor::file_descriptor_to_string;
use crate::error::{SerdeError, SerdeResult};
use crate::registry::{RegisteredSchema, SchemaReference, SchemaRegistry, SchemaType};
use crate::subject::SerializationContext;

/// Import path prefix of the protobuf well-known types, which every
/// registry already knows and which `skip.known.types` leaves out of
/// reference resolution.
const WELL_KNOWN_TYPES_PREFIX: &str = "google/protobuf/";

/// Resolves and caches registry schema IDs per subject.
pub struct SchemaIdResolver {
    registry: Arc<dyn SchemaRegistry>,
    config: SerializerConfig,
    known_subjects: RwLock<HashMap<String, u32>>,
}

impl SchemaIdResolver {
    /// Creates a resolver over the given registry client. Fails if the
    /// configuration combines mutually exclusive options.
    pub fn new(
        registry: Arc<dyn SchemaRegistry>,
        config: SerializerConfig,
    ) -> Result<Self, SerdeError> {
        config.validate()?;
        Ok(Self {
            registry,
            config,
            known_subjects: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Resolves the schema ID to embed for a message of the given type
    /// sent in the given context.
    ///
    /// The fast path is a read-locked cache probe and performs no I/O.
    /// On a miss the registry round-trip happens on the caller's task;
    /// no timeout is imposed here.
    pub async fn resolve_schema_id(
        &self,
        ctx: &SerializationContext,
        descriptor: &MessageDescriptor,
    ) -> SerdeResult<u32> {
        let subject = self
            .config
            .subject_name_strategy
            .subject(ctx, descriptor.full_name());

        if let Some(&id) = self.known_subjects.read().await.get(&subject) {
            debug!("subject '{}' resolved from cache: schema id {}", subject, id);
            return Ok(id);
        }

        let id = if self.config.use_latest_version {
            debug!("fetching latest schema for subject '{}'", subject);
            self.registry.get_latest_schema(&subject).await?.id
        } else {
            let file = descriptor.parent_file();
            let references = self.resolve_references(ctx, &file).await?;
            let schema = file_descriptor_to_string(&file);
            self.register_or_lookup(&subject, &schema, &references)
                .await?
                .id
        };
        debug!("subject '{}' resolved to schema id {}", subject, id);

        // Losing a race here is harmless: the other writer stored the
        // same ID for the same subject.
        self.known_subjects.write().await.insert(subject, id);

        Ok(id)
    }

    /// Recursively resolves the schema references of `file`.
    ///
    /// Imports are processed in declaration order, depth-first and
    /// post-order: a file's own imports are registered (or looked up)
    /// before the file itself, since the registry requires references to
    /// exist at registration time. Only references for `file`'s direct
    /// imports are returned; transitively resolved files are registered
    /// as a side effect. Any registry failure aborts the whole
    /// resolution — already-registered dependencies stay registered,
    /// which is safe because registration is idempotent.
    pub fn resolve_references<'a>(
        &'a self,
        ctx: &'a SerializationContext,
        file: &'a FileDescriptor,
    ) -> BoxFuture<'a, SerdeResult<Vec<SchemaReference>>> {
        Box::pin(async move {
            let mut references = Vec::new();
            for dependency in file.dependencies() {
                if self.config.skip_known_types
                    && dependency.name().starts_with(WELL_KNOWN_TYPES_PREFIX)
                {
                    debug!("skipping well-known import '{}'", dependency.name());
                    continue;
                }

                let dependency_references = self.resolve_references(ctx, &dependency).await?;

                let subject = self
                    .config
                    .reference_subject_name_strategy
                    .subject(ctx, dependency.name());
                let schema = file_descriptor_to_string(&dependency);
                let registered = self
                    .register_or_lookup(&subject, &schema, &dependency_references)
                    .await?;

                references.push(SchemaReference {
                    name: dependency.name().to_string(),
                    subject,
                    version: registered.version,
                });
            }
            Ok(references)
        })
    }

    async fn register_or_lookup(
        &self,
        subject: &str,
        schema: &str,
        references: &[SchemaReference],
    ) -> Result<RegisteredSchema, crate::registry::RegistryError> {
        if self.config.auto_register_schemas {
            debug!("registering schema under subject '{}'", subject);
            self.registry
                .create_schema(subject, schema, SchemaType::Protobuf, references)
                .await
        } else {
            debug!("looking up schema under subject '{}'", subject);
            self.registry
                .lookup_schema(subject, schema, SchemaType::Protobuf, references)
                .await
        }
    }
}
