// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use biolinks::chart::{
    AnnotationChart, AnnotationOptions, AnnotationRole, ChartEvent, Charts, DistributionChart,
    DistributionOptions, SimilarityChart, SimilarityOptions,
};
use biolinks::demo::{demo_options, demo_source};
use biolinks::loader::{load_batch, LoadRequest, StaticSource};
use biolinks::model::{Annotation, ArticleId, Content, ContentLabel};
use biolinks::panels::PanelVisibility;
use biolinks::state::GroupFilter;
use biolinks::stats::{BiolinksStatistics, DistributionMatrix, SimilarityGraph};
use biolinks::viewer::BiolinksViewer;
use futures::executor::block_on;

#[derive(Default)]
struct Columns(Vec<ArticleId>);

impl DistributionChart for Columns {
    fn render(&mut self, data: &DistributionMatrix, _options: &DistributionOptions) {
        self.0 = data.columns.iter().map(|column| column.id.clone()).collect();
    }

    fn select(&mut self, article_id: &ArticleId) -> bool {
        self.0.contains(article_id)
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Default)]
struct Nodes(Option<SimilarityGraph>);

impl SimilarityChart for Nodes {
    fn render(&mut self, data: &SimilarityGraph, _options: &SimilarityOptions) {
        self.0 = Some(data.clone());
    }

    fn select(&mut self, article_id: &ArticleId) -> bool {
        self.0.as_ref().is_some_and(|graph| graph.contains(article_id))
    }

    fn stop_force(&mut self) {}

    fn clear(&mut self) {
        self.0 = None;
    }
}

#[derive(Default)]
struct Cloud {
    terms: usize,
    highlighted: BTreeSet<String>,
}

impl AnnotationChart for Cloud {
    fn render(&mut self, data: &[Annotation], options: &AnnotationOptions) {
        self.terms = biolinks::chart::visible_terms(data, options).len();
        self.highlighted.clear();
    }

    fn highlight(&mut self, terms: &BTreeSet<String>) {
        self.highlighted = terms.clone();
    }

    fn clear(&mut self) {
        self.terms = 0;
        self.highlighted.clear();
    }
}

struct Headless;

impl Charts for Headless {
    type Distribution = Columns;
    type Similarity = Nodes;
    type Annotation = Cloud;

    fn distribution(&mut self) -> Columns {
        Columns::default()
    }

    fn similarity(&mut self, _slot: &Content) -> Nodes {
        Nodes::default()
    }

    fn annotation(&mut self, _slot: &Content, _role: AnnotationRole) -> Cloud {
        Cloud::default()
    }
}

fn run(viewer: &mut BiolinksViewer<Headless>, source: &StaticSource, request: LoadRequest) {
    let outcome = block_on(load_batch(source, request));
    assert_eq!(outcome.failed, 0, "demo loads cleanly");
    assert!(viewer.complete_load(outcome));
}

fn label(value: &str) -> ContentLabel {
    ContentLabel::new(value).expect("content label")
}

#[test]
fn demo_walkthrough_from_load_to_filtered_comparison() {
    let options = demo_options().expect("demo options");
    let source = demo_source(&options);
    let mut viewer =
        BiolinksViewer::new(options, Headless, Box::new(BiolinksStatistics)).expect("viewer");

    let request = viewer.start();
    run(&mut viewer, &source, request);
    assert_eq!(viewer.distribution_chart().0.len(), 3);
    assert_eq!(viewer.visibility(), PanelVisibility::HIDDEN);

    let reference = viewer.distribution_chart().0[0].clone();
    assert!(viewer.handle_event(ChartEvent::DistributionSelected {
        article_id: reference.clone(),
    }));
    assert_eq!(viewer.similarity_slots().len(), 2);
    assert!(viewer
        .similarity_slots()
        .iter()
        .all(|slot| slot.graph().is_some()));

    // Compare through the linked collection's graph; the node id maps back via altId.
    let linked = viewer.similarity_slots()[1]
        .graph()
        .and_then(|graph| graph.related.iter().find(|node| node.alt_id.is_some()).cloned())
        .expect("linked related node");
    assert!(viewer.handle_event(ChartEvent::SimilaritySelected {
        collection: label("ta"),
        related_id: linked.id.clone(),
        terms: linked.shared_terms.clone(),
    }));
    let compared = viewer.state().compared().cloned().expect("compared article");
    assert_eq!(linked.alt_id.as_ref(), Some(&compared));
    assert!(viewer.visibility().compared_annotations);
    let reference_cloud = viewer.reference_slots()[0].chart();
    assert!(reference_cloud.terms > 0);
    assert_eq!(
        reference_cloud.highlighted,
        linked.shared_terms.iter().cloned().collect::<BTreeSet<_>>()
    );

    // Narrowing the filter recomputes from cache and keeps both selections.
    let filter = viewer
        .state()
        .group_filter()
        .iter()
        .filter(|group| group.as_str() != "ACTI")
        .cloned()
        .collect::<GroupFilter>();
    assert!(viewer.apply_group_filter(filter).is_none());
    assert_eq!(viewer.state().reference(), Some(&reference));
    assert_eq!(viewer.state().compared(), Some(&compared));

    // A plain refresh goes back to the sources.
    let request = viewer.refresh_distribution().expect("reload request");
    run(&mut viewer, &source, request);
    assert!(viewer.state().reference().is_none());
    assert_eq!(viewer.visibility(), PanelVisibility::HIDDEN);
}
