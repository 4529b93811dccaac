// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The Biolinks viewer.
//!
//! Owns the selection state, the annotated articles of the current load batch and the
//! chart components. Selections move through content → topic → reference article →
//! compared article; every content/topic change starts a new load batch, and only the
//! completion of the latest batch is accepted.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::chart::{
    AnnotationChart, AnnotationOptions, AnnotationRole, ChartEvent, Charts, DistributionChart,
    DistributionOptions, SimilarityChart, SimilarityOptions,
};
use crate::config::{ConfigError, ViewerOptions};
use crate::loader::{AnnotatedArticles, Generation, LoadOutcome, LoadPlan, LoadRequest};
use crate::model::{AnnotatedArticle, Article, ArticleId, Content, ContentLabel, TopicId};
use crate::panels::{PanelVisibility, SIMILARITY_MIN_ARTICLES};
use crate::state::{GroupFilter, RefreshTarget, SelectionState};
use crate::stats::{DistributionMatrix, SimilarityGraph, Statistics};

const SLOT_GAP: u32 = 10;

/// A similarity chart bound to one collection, with the graph it currently shows.
pub struct SimilaritySlot<S> {
    content: Content,
    chart: S,
    graph: Option<SimilarityGraph>,
}

impl<S> SimilaritySlot<S> {
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn chart(&self) -> &S {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut S {
        &mut self.chart
    }

    pub fn graph(&self) -> Option<&SimilarityGraph> {
        self.graph.as_ref()
    }
}

/// An annotation cloud bound to one collection.
pub struct AnnotationSlot<A> {
    content: Content,
    chart: A,
}

impl<A> AnnotationSlot<A> {
    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn chart(&self) -> &A {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut A {
        &mut self.chart
    }
}

type Slots<T> = SmallVec<[T; 2]>;

pub struct BiolinksViewer<C: Charts> {
    options: ViewerOptions,
    statistics: Box<dyn Statistics>,
    charts: C,
    state: SelectionState,
    topic_articles: Vec<Article>,
    generation: Generation,
    annotated: Option<AnnotatedArticles>,
    distribution: C::Distribution,
    distribution_data: Option<DistributionMatrix>,
    similarity: Slots<SimilaritySlot<C::Similarity>>,
    reference_annotations: Slots<AnnotationSlot<C::Annotation>>,
    compared_annotations: Slots<AnnotationSlot<C::Annotation>>,
    visibility: PanelVisibility,
}

impl<C: Charts> BiolinksViewer<C> {
    /// Validates `options` and selects the first collection and its first topic.
    /// Nothing is loaded until [`BiolinksViewer::start`] hands out the first request.
    pub fn new(
        options: ViewerOptions,
        mut charts: C,
        statistics: Box<dyn Statistics>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let content = options.content.first().ok_or(ConfigError::NoContent)?.label.clone();
        let first_topic = first_topic(&options, &content);
        let group_filter = GroupFilter::new(options.known_groups());
        let distribution = charts.distribution();

        let mut viewer = Self {
            state: SelectionState::new(content, first_topic, group_filter),
            options,
            statistics,
            charts,
            topic_articles: Vec::new(),
            generation: Generation::default(),
            annotated: None,
            distribution,
            distribution_data: None,
            similarity: SmallVec::new(),
            reference_annotations: SmallVec::new(),
            compared_annotations: SmallVec::new(),
            visibility: PanelVisibility::HIDDEN,
        };
        viewer.rebuild_slots();
        Ok(viewer)
    }

    pub fn start(&mut self) -> LoadRequest {
        self.begin_load()
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.annotated.is_none()
    }

    pub fn topic_articles(&self) -> &[Article] {
        &self.topic_articles
    }

    pub fn annotated(&self) -> Option<&AnnotatedArticles> {
        self.annotated.as_ref()
    }

    pub fn distribution_chart(&self) -> &C::Distribution {
        &self.distribution
    }

    pub fn distribution_chart_mut(&mut self) -> &mut C::Distribution {
        &mut self.distribution
    }

    pub fn distribution_data(&self) -> Option<&DistributionMatrix> {
        self.distribution_data.as_ref()
    }

    pub fn similarity_slots(&self) -> &[SimilaritySlot<C::Similarity>] {
        &self.similarity
    }

    pub fn similarity_slots_mut(&mut self) -> &mut [SimilaritySlot<C::Similarity>] {
        &mut self.similarity
    }

    pub fn reference_slots(&self) -> &[AnnotationSlot<C::Annotation>] {
        &self.reference_annotations
    }

    pub fn compared_slots(&self) -> &[AnnotationSlot<C::Annotation>] {
        &self.compared_annotations
    }

    pub fn active_content(&self) -> Option<&Content> {
        self.options.content_by_label(self.state.content())
    }

    /// The companion collection declared by the active collection's `seeAlso`.
    pub fn linked_content(&self) -> Option<&Content> {
        let see_also = self.active_content()?.see_also.as_ref()?;
        self.options.content_by_label(see_also)
    }

    pub fn reference_article(&self) -> Option<&Article> {
        let id = self.state.reference()?;
        self.find_article(id)
    }

    pub fn compared_article(&self) -> Option<&Article> {
        let id = self.state.compared()?;
        self.topic_articles.iter().find(|article| &article.id == id)
    }

    pub fn reference_headline(&self) -> String {
        match (self.reference_article(), self.active_content()) {
            (Some(article), Some(content)) => {
                format!("{} ({})", article.title, content.prefixed_id(&article.id))
            }
            _ if self.topic_articles.len() >= SIMILARITY_MIN_ARTICLES => "Click on any column in the \
                 distribution matrix to select an article and display similarity network"
                .to_owned(),
            _ => "Click on any column in the distribution matrix to select an article and \
                  display annotations"
                .to_owned(),
        }
    }

    pub fn compared_headline(&self) -> String {
        match self.compared_article() {
            Some(article) => article.title.clone(),
            None => "Select an article by clicking on any node in any of the graphs.".to_owned(),
        }
    }

    /// Switches to another collection, resetting the topic to its first one.
    /// Unknown labels are ignored.
    pub fn select_content(&mut self, label: &ContentLabel) -> Option<LoadRequest> {
        self.options.content_by_label(label)?;
        let first_topic = first_topic(&self.options, label);
        self.transition(|state| state.with_content(label.clone(), first_topic));
        self.rebuild_slots();
        Some(self.begin_load())
    }

    /// Switches topic within the active collection. Unknown topics are ignored.
    pub fn select_topic(&mut self, topic: &TopicId) -> Option<LoadRequest> {
        let known = self
            .options
            .topics_for(self.state.content())
            .iter()
            .any(|candidate| &candidate.id == topic);
        if !known {
            return None;
        }
        self.transition(|state| state.with_topic(topic.clone()));
        Some(self.begin_load())
    }

    /// Accepts the outcome of a load batch. Outcomes of superseded batches are dropped
    /// and `false` is returned.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> bool {
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = %outcome.generation,
                current = %self.generation,
                "discarding stale annotation load"
            );
            return false;
        }

        if outcome.failed > 0 {
            tracing::debug!(
                generation = %outcome.generation,
                failed = outcome.failed,
                requested = outcome.requested,
                "annotation load finished with dropped articles"
            );
        }
        self.annotated = Some(outcome.articles);
        self.transition(SelectionState::without_selection);
        self.render_distribution();
        self.update_panels();
        true
    }

    pub fn handle_event(&mut self, event: ChartEvent) -> bool {
        match event {
            ChartEvent::DistributionSelected { article_id } => self.select_reference(&article_id),
            ChartEvent::SimilaritySelected {
                collection,
                related_id,
                terms,
            } => self.select_compared(&collection, &related_id, terms),
        }
    }

    /// Selects the reference article by its id in the active collection.
    pub fn select_reference(&mut self, article_id: &ArticleId) -> bool {
        if self.annotated.is_none() {
            return false;
        }
        let Some(article) = self.find_article(article_id).cloned() else {
            return false;
        };

        self.transition(|state| state.with_reference(article.id.clone()));
        self.update_panels();

        if self.visibility.similarity {
            self.render_similarity(&article);
        }
        self.render_annotations(AnnotationRole::Reference, &article);
        true
    }

    /// Selects the compared article from a similarity-network node of `collection`.
    ///
    /// Nodes of the linked collection carry linked ids, which map back to topic articles
    /// through `altId`. Picking the reference article itself deselects.
    pub fn select_compared(
        &mut self,
        collection: &ContentLabel,
        related_id: &ArticleId,
        terms: Vec<String>,
    ) -> bool {
        if !self.visibility.similarity {
            return false;
        }
        let Some(reference) = self.state.reference().cloned() else {
            return false;
        };
        let Some(article) = self.resolve_graph_article(collection, related_id).cloned() else {
            return false;
        };

        if article.id == reference {
            self.transition(|state| state.with_compared(None));
            self.update_panels();
            self.highlight_reference_terms(&BTreeSet::new());
            return true;
        }

        self.transition(|state| state.with_compared(Some(article.id.clone())));
        self.update_panels();
        self.render_annotations(AnnotationRole::Compared, &article);
        let terms = terms.into_iter().collect::<BTreeSet<_>>();
        self.highlight_reference_terms(&terms);
        true
    }

    /// Applies a new group filter and refreshes from the cached annotations.
    pub fn apply_group_filter(&mut self, filter: GroupFilter) -> Option<LoadRequest> {
        self.transition(|state| state.with_group_filter(filter));
        self.refresh_distribution()
    }

    /// Recomputes the distribution.
    ///
    /// Right after a filter change the cached annotations are reused and prior
    /// selections are restored when still present; otherwise (or while nothing is
    /// cached yet) a full reload is requested.
    pub fn refresh_distribution(&mut self) -> Option<LoadRequest> {
        if !self.state.refresh_mode() || self.annotated.is_none() {
            return Some(self.begin_reload());
        }

        let refresh = self.take_refresh();
        tracing::debug!(generation = %self.generation, "recomputing distribution from cache");
        self.render_distribution();
        self.update_panels();
        if let Some(refresh) = refresh {
            self.restore_selection(refresh);
        }
        None
    }

    fn restore_selection(&mut self, refresh: RefreshTarget) {
        let Some(reference) = refresh.reference else {
            return;
        };
        let in_distribution = self
            .distribution_data
            .as_ref()
            .is_some_and(|data| data.contains_article(&reference));
        if !in_distribution || !self.select_reference(&reference) {
            return;
        }
        self.distribution.select(&reference);

        let Some(compared) = refresh.compared else {
            return;
        };
        let primary = self.state.content().clone();
        let terms = self
            .similarity
            .iter()
            .find(|slot| slot.content.label == primary)
            .and_then(|slot| slot.graph.as_ref())
            .and_then(|graph| graph.node(&compared))
            .map(|node| node.shared_terms.clone());
        let Some(terms) = terms else {
            return;
        };
        if !self.select_compared(&primary, &compared, terms) {
            return;
        }
        if let Some(slot) = self
            .similarity
            .iter_mut()
            .find(|slot| slot.content.label == primary)
        {
            slot.chart.select(&compared);
        }
    }

    fn transition(&mut self, step: impl FnOnce(SelectionState) -> SelectionState) {
        self.state = step(self.state.clone());
    }

    fn take_refresh(&mut self) -> Option<RefreshTarget> {
        let (state, refresh) = self.state.clone().take_refresh();
        self.state = state.without_selection();
        refresh
    }

    fn begin_reload(&mut self) -> LoadRequest {
        self.take_refresh();
        self.begin_load()
    }

    fn begin_load(&mut self) -> LoadRequest {
        let content = self.state.content().clone();
        self.topic_articles = match self.state.topic() {
            Some(topic) => self.options.topic_articles(&content, topic),
            None => Vec::new(),
        };
        let plan = match self.state.topic() {
            Some(topic) => LoadPlan::for_topic(&self.options, &content, topic),
            None => LoadPlan::default(),
        };

        self.generation = self.generation.next();
        self.annotated = None;
        self.distribution_data = None;
        self.distribution.clear();
        self.update_panels();

        LoadRequest {
            generation: self.generation,
            plan,
        }
    }

    fn rebuild_slots(&mut self) {
        for slot in &mut self.similarity {
            slot.chart.stop_force();
            slot.chart.clear();
        }
        let slot_contents = self
            .active_content()
            .into_iter()
            .chain(self.linked_content())
            .cloned()
            .collect::<Slots<_>>();

        self.similarity = slot_contents
            .iter()
            .map(|content| SimilaritySlot {
                chart: self.charts.similarity(content),
                content: content.clone(),
                graph: None,
            })
            .collect();
        self.reference_annotations = slot_contents
            .iter()
            .map(|content| AnnotationSlot {
                chart: self.charts.annotation(content, AnnotationRole::Reference),
                content: content.clone(),
            })
            .collect();
        self.compared_annotations = slot_contents
            .iter()
            .map(|content| AnnotationSlot {
                chart: self.charts.annotation(content, AnnotationRole::Compared),
                content: content.clone(),
            })
            .collect();
    }

    fn find_article(&self, id: &ArticleId) -> Option<&Article> {
        self.options
            .articles_for(self.state.content())
            .iter()
            .find(|article| &article.id == id)
    }

    fn resolve_graph_article(&self, collection: &ContentLabel, related_id: &ArticleId) -> Option<&Article> {
        if collection == self.state.content() {
            return self.topic_articles.iter().find(|article| &article.id == related_id);
        }
        let linked = self.active_content()?.see_also.as_ref()?;
        if collection != linked {
            return None;
        }
        self.topic_articles
            .iter()
            .find(|article| article.alt_id.as_ref() == Some(related_id))
    }

    /// Id of `article` inside the collection of `slot`: its own id for the active
    /// collection, its `altId` for the linked one.
    fn id_in_slot<'a>(&self, slot: &Content, article: &'a Article) -> Option<&'a ArticleId> {
        if &slot.label == self.state.content() {
            Some(&article.id)
        } else {
            article.alt_id.as_ref()
        }
    }

    /// Annotated topic articles of `collection`, ordered like the topic article list.
    fn ordered_topic_articles(&self, collection: &ContentLabel) -> Vec<AnnotatedArticle> {
        let Some(annotated) = &self.annotated else {
            return Vec::new();
        };
        let Some(slot) = self.options.content_by_label(collection) else {
            return Vec::new();
        };
        self.topic_articles
            .iter()
            .filter_map(|article| self.id_in_slot(slot, article))
            .filter_map(|id| annotated.find(collection, id))
            .cloned()
            .collect()
    }

    fn slot_width(&self, slots: usize) -> u32 {
        let slots = u32::try_from(slots.max(1)).unwrap_or(1);
        (self.options.width / slots).saturating_sub(SLOT_GAP)
    }

    fn render_distribution(&mut self) {
        let content = self.state.content().clone();
        let articles = self.ordered_topic_articles(&content);
        let data = self
            .statistics
            .compute_distribution(&articles, Some(self.state.group_filter()));
        let options = DistributionOptions {
            width: self.options.width,
            height: self.options.distribution_height,
            prefix: self
                .active_content()
                .map(|content| content.prefix.clone())
                .unwrap_or_default(),
            url: self.active_content().and_then(|content| content.url.clone()),
        };
        self.distribution.clear();
        self.distribution.render(&data, &options);
        self.distribution_data = Some(data);
    }

    fn render_similarity(&mut self, reference: &Article) {
        let primary = self.active_content().cloned();
        let linked = self.linked_content().cloned();
        let width = self.slot_width(self.similarity.len());
        let height = self.options.similarity_height;
        let filter = self.state.group_filter().clone();

        let mut rendered = Vec::with_capacity(self.similarity.len());
        for slot in &self.similarity {
            let is_primary = Some(&slot.content.label) == primary.as_ref().map(|c| &c.label);
            let query_id = self.id_in_slot(&slot.content, reference);
            let Some(annotated) = &self.annotated else {
                rendered.push(None);
                continue;
            };
            let Some(query) = query_id.and_then(|id| annotated.find(&slot.content.label, id)) else {
                rendered.push(None);
                continue;
            };
            let candidates = self.ordered_topic_articles(&slot.content.label);
            let graph = self.statistics.compute_similarity(query, &candidates, Some(&filter));

            let options = if is_primary {
                SimilarityOptions {
                    width,
                    height,
                    query_id: query.id.clone(),
                    alternative_query_id: query.alt_id.clone(),
                    prefix_id: slot.content.prefix.clone(),
                    alternative_prefix_id: linked.as_ref().map(|linked| linked.prefix.clone()),
                    use_alternative_ids: false,
                    url: slot.content.url.clone(),
                }
            } else {
                SimilarityOptions {
                    width,
                    height,
                    query_id: query.id.clone(),
                    alternative_query_id: Some(reference.id.clone()),
                    prefix_id: slot.content.prefix.clone(),
                    alternative_prefix_id: primary.as_ref().map(|primary| primary.prefix.clone()),
                    use_alternative_ids: true,
                    url: slot.content.url.clone(),
                }
            };
            rendered.push(Some((graph, options)));
        }

        for (slot, rendered) in self.similarity.iter_mut().zip(rendered) {
            slot.chart.stop_force();
            slot.chart.clear();
            slot.graph = None;
            if let Some((graph, options)) = rendered {
                slot.chart.render(&graph, &options);
                slot.graph = Some(graph);
            }
        }
    }

    fn render_annotations(&mut self, role: AnnotationRole, article: &Article) {
        let slots = match role {
            AnnotationRole::Reference => &self.reference_annotations,
            AnnotationRole::Compared => &self.compared_annotations,
        };
        let options = AnnotationOptions {
            width: self.slot_width(slots.len()),
            height: self.options.annotation_height,
            group_filter: self.state.group_filter().clone(),
            max_terms: self.options.max_terms,
        };

        let data = slots
            .iter()
            .map(|slot| {
                let id = self.id_in_slot(&slot.content, article)?;
                let annotated = self.annotated.as_ref()?;
                annotated
                    .find(&slot.content.label, id)
                    .map(|found| found.annotations.clone())
            })
            .collect::<Vec<_>>();

        let slots = match role {
            AnnotationRole::Reference => &mut self.reference_annotations,
            AnnotationRole::Compared => &mut self.compared_annotations,
        };
        for (slot, data) in slots.iter_mut().zip(data) {
            slot.chart.clear();
            if let Some(data) = data {
                slot.chart.render(&data, &options);
            }
        }
    }

    fn highlight_reference_terms(&mut self, terms: &BTreeSet<String>) {
        for slot in &mut self.reference_annotations {
            slot.chart.highlight(terms);
        }
    }

    /// Recomputes panel visibility and clears every chart of a panel that is hidden.
    fn update_panels(&mut self) {
        let next = PanelVisibility::compute(
            self.topic_articles.len(),
            self.state.reference(),
            self.state.compared(),
        );

        if !next.similarity {
            for slot in &mut self.similarity {
                slot.chart.stop_force();
                slot.chart.clear();
                slot.graph = None;
            }
        }
        if !next.reference_annotations {
            for slot in &mut self.reference_annotations {
                slot.chart.clear();
            }
        }
        if !next.compared_annotations {
            for slot in &mut self.compared_annotations {
                slot.chart.clear();
            }
        }
        self.visibility = next;
    }
}

fn first_topic(options: &ViewerOptions, content: &ContentLabel) -> Option<TopicId> {
    options.topics_for(content).first().map(|topic| topic.id.clone())
}
