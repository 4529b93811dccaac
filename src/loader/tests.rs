// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use rstest::{fixture, rstest};
use tokio::sync::Notify;

use super::{
    load_batch, AnnotationSource, Generation, LoadError, LoadPlan, LoadRequest,
    StaticSource,
};
use crate::config::ViewerOptions;
use crate::demo::{demo_options, demo_source, DEMO_FT_PATH};
use crate::model::{ArticleId, ContentLabel, LoadedAnnotations, TopicId};

#[fixture]
fn options() -> ViewerOptions {
    demo_options().expect("demo options")
}

fn label(value: &str) -> ContentLabel {
    value.parse().expect("content label")
}

fn topic(value: &str) -> TopicId {
    value.parse().expect("topic id")
}

fn ids_for(plan: &LoadPlan, collection: &str) -> Vec<String> {
    plan.tasks()
        .iter()
        .filter(|task| task.collection.as_str() == collection)
        .map(|task| task.article.id.to_string())
        .collect()
}

/// Waits on `gate` before answering for `gated_id`; every other article resolves at once.
struct GatedSource {
    gate: Arc<Notify>,
    gated_id: ArticleId,
    settled: AtomicUsize,
}

#[async_trait]
impl AnnotationSource for GatedSource {
    async fn load(&self, _path: &str, article_id: &ArticleId) -> Result<LoadedAnnotations, LoadError> {
        if article_id == &self.gated_id {
            self.gate.notified().await;
            self.settled.fetch_add(1, Ordering::SeqCst);
            return Err(LoadError::NotFound {
                location: article_id.to_string(),
            });
        }
        self.settled.fetch_add(1, Ordering::SeqCst);
        Ok(LoadedAnnotations::default())
    }
}

#[rstest]
fn plan_for_linked_collection_uses_alt_ids(options: ViewerOptions) {
    let plan = LoadPlan::for_topic(&options, &label("ft"), &topic("_107"));

    assert_eq!(plan.collections(), &[label("ft"), label("ta")]);
    assert_eq!(ids_for(&plan, "ft"), vec!["55328", "59472", "64840"]);
    // 10773095 is in topic _107 of `ta` but not linked from any `ft` article.
    assert_eq!(ids_for(&plan, "ta"), vec!["11532215", "11690545", "11790258"]);
    assert!(!ids_for(&plan, "ta").contains(&"59472".to_owned()));
    assert!(plan
        .tasks()
        .iter()
        .filter(|task| task.collection.as_str() == "ta")
        .all(|task| task.path == options.paths[&label("ta")]));
}

#[rstest]
fn plan_without_see_also_only_loads_active_collection(options: ViewerOptions) {
    let plan = LoadPlan::for_topic(&options, &label("ta"), &topic("_107"));
    assert_eq!(plan.collections(), &[label("ta")]);
    assert_eq!(plan.len(), 4);
}

#[rstest]
fn plan_for_topic_missing_from_collection_is_empty(options: ViewerOptions) {
    let plan = LoadPlan::for_topic(&options, &label("ft"), &topic("_106"));
    assert!(plan.is_empty());
    assert_eq!(plan.collections().len(), 2);
}

#[rstest]
#[tokio::test]
async fn batch_collects_successes_per_collection(options: ViewerOptions) {
    let source = demo_source(&options);
    let plan = LoadPlan::for_topic(&options, &label("ft"), &topic("_107"));
    let request = LoadRequest {
        generation: Generation::default().next(),
        plan,
    };

    let outcome = load_batch(&source, request).await;

    assert_eq!(outcome.generation.value(), 1);
    assert_eq!(outcome.requested, 6);
    assert_eq!(outcome.failed, 0);
    assert_eq!(outcome.articles.get(&label("ft")).len(), 3);
    assert_eq!(outcome.articles.get(&label("ta")).len(), 3);
    assert_eq!(source.fetch_count(), 6);

    let linked = outcome
        .articles
        .find(&label("ft"), &ArticleId::new("59472").expect("id"))
        .expect("annotated ft article");
    assert_eq!(linked.alt_id.as_ref().map(|id| id.as_str()), Some("11690545"));
}

#[rstest]
#[tokio::test]
async fn failed_fetches_are_dropped_without_aborting_siblings(options: ViewerOptions) {
    let source = StaticSource::new().with(
        DEMO_FT_PATH,
        ArticleId::new("59472").expect("id"),
        LoadedAnnotations::default(),
    );
    let plan = LoadPlan::for_topic(&options, &label("ft"), &topic("_107"));

    let outcome = load_batch(
        &source,
        LoadRequest {
            generation: Generation::default(),
            plan,
        },
    )
    .await;

    assert_eq!(source.fetch_count(), 6);
    assert_eq!(outcome.failed, 5);
    assert_eq!(outcome.articles.get(&label("ft")).len(), 1);
    assert!(outcome.articles.has_collection(&label("ta")));
    assert!(outcome.articles.get(&label("ta")).is_empty());
}

#[tokio::test]
async fn empty_plan_resolves_immediately() {
    let source = StaticSource::new();
    let outcome = load_batch(
        &source,
        LoadRequest {
            generation: Generation::default(),
            plan: LoadPlan::default(),
        },
    )
    .now_or_never()
    .expect("empty batch must not wait");

    assert_eq!(outcome.requested, 0);
    assert!(outcome.articles.is_empty());
    assert_eq!(source.fetch_count(), 0);
}

#[rstest]
#[tokio::test]
async fn barrier_waits_for_every_fetch_including_failures(options: ViewerOptions) {
    let gate = Arc::new(Notify::new());
    let source = GatedSource {
        gate: gate.clone(),
        gated_id: ArticleId::new("64840").expect("id"),
        settled: AtomicUsize::new(0),
    };
    let plan = LoadPlan::for_topic(&options, &label("ft"), &topic("_107"));
    let mut batch = Box::pin(load_batch(
        &source,
        LoadRequest {
            generation: Generation::default(),
            plan,
        },
    ));

    assert!(futures::poll!(batch.as_mut()).is_pending());
    assert_eq!(source.settled.load(Ordering::SeqCst), 5);

    gate.notify_one();
    let outcome = batch.await;

    assert_eq!(source.settled.load(Ordering::SeqCst), 6);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.articles.get(&label("ft")).len(), 2);
    assert_eq!(outcome.articles.get(&label("ta")).len(), 3);
}

#[rstest]
#[tokio::test]
async fn shared_source_loads_through_trait_object(options: ViewerOptions) {
    let source: Arc<dyn AnnotationSource> = Arc::new(demo_source(&options));

    let loaded = source
        .load(DEMO_FT_PATH, &ArticleId::new("59472").expect("id"))
        .await
        .expect("demo annotations");
    assert!(!loaded.data.is_empty());

    let missing = source
        .load(DEMO_FT_PATH, &ArticleId::new("11690545").expect("id"))
        .await;
    assert!(matches!(missing, Err(LoadError::NotFound { .. })));
}

#[test]
fn generations_are_monotonic() {
    let first = Generation::default();
    let second = first.next();
    assert!(second > first);
    assert_eq!(second.to_string(), "#1");
}
