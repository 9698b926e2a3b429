//! The attachment migration pipeline.

use crate::Fetcher;
use assetize_cache::FetchCache;
use assetize_core::{Payload, PublishedObject, Reference, ReplacementMapping};
use assetize_error::AssetizeResult;
use assetize_media::{ContentNamer, MediaProcessor, detect};
use assetize_storage::Publisher;
use assetize_text::{ReferenceExtractor, render, rewrite};
use derive_getters::Getters;
use futures::future::try_join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of migrating one document.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct MigrationOutcome {
    /// One mapping per unique URL, in document order
    mappings: Vec<ReplacementMapping>,
    /// Rendered table of migrated files
    rendered: String,
    /// Input text with every reference pointing at its published URL
    rewritten: String,
    /// Published object of every mapping, same order
    published: Vec<PublishedObject>,
}

impl MigrationOutcome {
    /// Objects created by this run.
    pub fn created(&self) -> usize {
        self.published
            .iter()
            .filter(|object| !object.existed_before_run)
            .count()
    }
}

/// Extracts references, migrates each unique URL once, and renders the result.
pub struct MigrationPipeline {
    extractor: ReferenceExtractor,
    fetcher: Arc<dyn Fetcher>,
    processor: MediaProcessor,
    namer: ContentNamer,
    publisher: Publisher,
}

impl std::fmt::Debug for MigrationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationPipeline")
            .field("processor", &self.processor)
            .field("namer", &self.namer)
            .field("publisher", &self.publisher)
            .finish()
    }
}

impl MigrationPipeline {
    /// Create a pipeline.
    ///
    /// The namer writes into the publisher's namespace directory.
    pub fn new(fetcher: Arc<dyn Fetcher>, processor: MediaProcessor, publisher: Publisher) -> Self {
        let namer = ContentNamer::new(publisher.namespace().directory());
        Self {
            extractor: ReferenceExtractor::new(),
            fetcher,
            processor,
            namer,
            publisher,
        }
    }

    /// The publisher in use.
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Migrate every reference in `text`.
    ///
    /// Distinct URLs resolve concurrently; the first failure aborts the run
    /// and nothing is rendered.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn run(&self, text: &str) -> AssetizeResult<MigrationOutcome> {
        let references = self.extractor.extract(text);
        info!(references = references.len(), "Extracted references");

        let cache = FetchCache::new();
        let resolved = try_join_all(references.iter().map(|reference| {
            cache.resolve(&reference.url, || self.resolve(&reference.url))
        }))
        .await?;
        debug!(resolutions = cache.started(), "All references resolved");

        let mut seen = HashSet::new();
        let (mappings, published): (Vec<_>, Vec<_>) = references
            .iter()
            .zip(resolved)
            .filter(|(reference, _)| seen.insert(reference.url.clone()))
            .map(|(reference, object)| (Self::mapping(reference, &object), object))
            .unzip();

        let outcome = MigrationOutcome {
            rendered: render(&mappings),
            rewritten: rewrite(text, &mappings),
            mappings,
            published,
        };
        info!(
            files = outcome.mappings.len(),
            created = outcome.created(),
            "Migration complete"
        );
        Ok(outcome)
    }

    fn mapping(reference: &Reference, object: &PublishedObject) -> ReplacementMapping {
        ReplacementMapping {
            original_text: reference.original_text.clone(),
            original_url: reference.url.clone(),
            published_url: object.url.clone(),
        }
    }

    /// Fetch, transform and publish one URL.
    #[instrument(skip(self))]
    async fn resolve(&self, url: &str) -> AssetizeResult<PublishedObject> {
        let namespace = self.publisher.namespace();
        if let Some(path) = namespace.path_of(url) {
            debug!("Already in the destination namespace");
            return Ok(PublishedObject {
                path,
                url: url.to_string(),
                existed_before_run: true,
            });
        }

        let bytes = self.fetcher.fetch(url).await?;
        let detected = detect(&bytes);
        debug!(file_type = %detected, size = bytes.len(), "Fetched");

        let predicted = self.processor.normalizer().target_type(detected);
        let mut candidates = vec![self.namer.path(url, predicted)];
        if predicted != detected {
            candidates.push(self.namer.path(url, detected));
        }
        for path in &candidates {
            if let Some(existing) = self.publisher.find_existing(path).await? {
                return Ok(existing);
            }
        }

        let outcome = self.processor.process(Payload::new(bytes, detected)).await?;
        debug!(
            steps = outcome.steps(),
            parameter = ?outcome.parameter(),
            size = outcome.payload().len(),
            "Processed"
        );

        let payload = outcome.into_payload();
        let path = self.namer.path(url, *payload.file_type());
        let message = format!("Add {}", path);
        self.publisher.publish(&path, &payload, &message).await
    }
}
