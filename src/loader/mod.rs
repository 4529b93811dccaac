// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Annotation loading.
//!
//! A topic selection turns into a [`LoadRequest`]: one fetch per topic-scoped article of
//! the active collection plus one per matching article of the linked collection. The
//! request carries a [`Generation`] so completions from superseded selections can be
//! recognized and discarded by the viewer.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::config::ViewerOptions;
use crate::model::{
    AnnotatedArticle, Article, ArticleId, ContentLabel, LoadedAnnotations, TopicId,
};

mod source;

pub use source::{annotation_location, PathSource, StaticSource};

/// Fetches the annotations of one article of a collection stored under `path`.
#[async_trait]
pub trait AnnotationSource: Send + Sync {
    async fn load(&self, path: &str, article_id: &ArticleId) -> Result<LoadedAnnotations, LoadError>;
}

/// Monotonic tag of a load batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTask {
    pub collection: ContentLabel,
    pub path: String,
    pub article: Article,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadPlan {
    collections: Vec<ContentLabel>,
    tasks: Vec<LoadTask>,
}

impl LoadPlan {
    /// Plans the fetches for `topic` in collection `content`.
    ///
    /// Linked articles are included when the collection declares `seeAlso`, the linked
    /// article is in the same topic and its id is the `altId` of one of the
    /// topic-scoped primary articles.
    pub fn for_topic(options: &ViewerOptions, content: &ContentLabel, topic: &TopicId) -> Self {
        let mut plan = Self::default();
        let Some(primary) = options.content_by_label(content) else {
            return plan;
        };
        if !options.articles.contains_key(content) {
            return plan;
        }

        let topic_articles = options.topic_articles(content, topic);
        plan.push_collection(options, content, topic_articles.iter().cloned());

        if let Some(linked) = &primary.see_also {
            if options.articles.contains_key(linked) {
                let alt_ids = topic_articles
                    .iter()
                    .filter_map(|article| article.alt_id.as_ref())
                    .collect::<BTreeSet<_>>();
                let linked_articles = options
                    .articles_for(linked)
                    .iter()
                    .filter(|article| &article.topic == topic && alt_ids.contains(&article.id))
                    .cloned();
                plan.push_collection(options, linked, linked_articles);
            }
        }

        plan
    }

    fn push_collection(
        &mut self,
        options: &ViewerOptions,
        collection: &ContentLabel,
        articles: impl Iterator<Item = Article>,
    ) {
        let path = options.path_for(collection).unwrap_or_default().to_owned();
        self.collections.push(collection.clone());
        self.tasks.extend(articles.map(|article| LoadTask {
            collection: collection.clone(),
            path: path.clone(),
            article,
        }));
    }

    pub fn collections(&self) -> &[ContentLabel] {
        &self.collections
    }

    pub fn tasks(&self) -> &[LoadTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: Generation,
    pub plan: LoadPlan,
}

/// Annotated articles per collection, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedArticles {
    by_collection: BTreeMap<ContentLabel, Vec<AnnotatedArticle>>,
}

impl AnnotatedArticles {
    pub fn ensure_collection(&mut self, collection: &ContentLabel) {
        self.by_collection.entry(collection.clone()).or_default();
    }

    pub fn push(&mut self, collection: &ContentLabel, article: AnnotatedArticle) {
        self.by_collection.entry(collection.clone()).or_default().push(article);
    }

    pub fn get(&self, collection: &ContentLabel) -> &[AnnotatedArticle] {
        self.by_collection.get(collection).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, collection: &ContentLabel, id: &ArticleId) -> Option<&AnnotatedArticle> {
        self.get(collection).iter().find(|article| &article.id == id)
    }

    pub fn has_collection(&self, collection: &ContentLabel) -> bool {
        self.by_collection.contains_key(collection)
    }

    pub fn len(&self) -> usize {
        self.by_collection.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub generation: Generation,
    pub articles: AnnotatedArticles,
    pub requested: usize,
    pub failed: usize,
}

/// Runs every fetch of `request` concurrently and resolves once all of them settled.
///
/// Failed fetches are logged and the article is left out; siblings are never aborted.
/// An empty plan resolves immediately.
pub async fn load_batch(source: &dyn AnnotationSource, request: LoadRequest) -> LoadOutcome {
    let LoadRequest { generation, plan } = request;
    let mut articles = AnnotatedArticles::default();
    for collection in plan.collections() {
        articles.ensure_collection(collection);
    }

    tracing::info!(%generation, fetches = plan.len(), "loading annotations");

    let mut pending = plan
        .tasks()
        .iter()
        .map(|task| async move {
            let result = source.load(&task.path, &task.article.id).await;
            (task, result)
        })
        .collect::<FuturesUnordered<_>>();

    let mut failed = 0usize;
    while let Some((task, result)) = pending.next().await {
        match result {
            Ok(loaded) => {
                articles.push(&task.collection, AnnotatedArticle::from_article(&task.article, loaded));
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(
                    collection = %task.collection,
                    article = %task.article.id,
                    error = %err,
                    "annotation fetch failed; article dropped"
                );
            }
        }
    }

    LoadOutcome {
        generation,
        articles,
        requested: plan.len(),
        failed,
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io {
        location: String,
        source: std::io::Error,
    },
    Http {
        location: String,
        source: reqwest::Error,
    },
    Json {
        location: String,
        source: serde_json::Error,
    },
    NotFound {
        location: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { location, source } => write!(f, "io error at {location}: {source}"),
            Self::Http { location, source } => write!(f, "http error at {location}: {source}"),
            Self::Json { location, source } => write!(f, "json error at {location}: {source}"),
            Self::NotFound { location } => write!(f, "no annotations at {location}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests;
