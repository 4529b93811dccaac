// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chart component contracts.
//!
//! The viewer drives three kinds of charts (distribution matrix, similarity network,
//! annotation cloud) through these traits and receives their selections as
//! [`ChartEvent`]s.

use std::collections::BTreeSet;

use crate::model::{Annotation, ArticleId, Content, ContentLabel};
use crate::state::GroupFilter;
use crate::stats::{DistributionMatrix, SimilarityGraph};

/// Selection notifications emitted by charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    /// A distribution-matrix column was clicked.
    DistributionSelected { article_id: ArticleId },
    /// A similarity-network node was clicked. `collection` is the panel slot the graph
    /// belongs to, `related_id` is the node's id in that collection.
    SimilaritySelected {
        collection: ContentLabel,
        related_id: ArticleId,
        terms: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionOptions {
    pub width: u32,
    pub height: u32,
    pub prefix: String,
    /// Article link base of the distribution's collection.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityOptions {
    pub width: u32,
    pub height: u32,
    pub query_id: ArticleId,
    pub alternative_query_id: Option<ArticleId>,
    pub prefix_id: String,
    pub alternative_prefix_id: Option<String>,
    pub use_alternative_ids: bool,
    /// Article link base of the graph's own collection.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationOptions {
    pub width: u32,
    pub height: u32,
    pub group_filter: GroupFilter,
    pub max_terms: Option<usize>,
}

pub trait DistributionChart {
    fn render(&mut self, data: &DistributionMatrix, options: &DistributionOptions);

    /// Marks the column of `article_id` as selected; `false` when it is not rendered.
    fn select(&mut self, article_id: &ArticleId) -> bool;

    fn clear(&mut self);
}

pub trait SimilarityChart {
    fn render(&mut self, data: &SimilarityGraph, options: &SimilarityOptions);

    /// Marks the node of `article_id` as selected; `false` when it is not rendered.
    fn select(&mut self, article_id: &ArticleId) -> bool;

    /// Halts any running layout simulation. Called before the graph is torn down.
    fn stop_force(&mut self);

    fn clear(&mut self);
}

pub trait AnnotationChart {
    fn render(&mut self, data: &[Annotation], options: &AnnotationOptions);

    fn highlight(&mut self, terms: &BTreeSet<String>);

    fn clear(&mut self);
}

/// Creates the chart components of a viewer. Similarity and annotation charts are
/// created per collection slot (active collection plus linked collection).
pub trait Charts {
    type Distribution: DistributionChart;
    type Similarity: SimilarityChart;
    type Annotation: AnnotationChart;

    fn distribution(&mut self) -> Self::Distribution;

    fn similarity(&mut self, slot: &Content) -> Self::Similarity;

    fn annotation(&mut self, slot: &Content, role: AnnotationRole) -> Self::Annotation;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationRole {
    Reference,
    Compared,
}

/// Terms that pass `options`, most frequent first, capped at `max_terms`.
pub fn visible_terms<'a>(data: &'a [Annotation], options: &AnnotationOptions) -> Vec<&'a Annotation> {
    let mut terms = data
        .iter()
        .filter(|annotation| options.group_filter.accepts(annotation))
        .collect::<Vec<_>>();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.text.cmp(&b.text)));
    if let Some(max_terms) = options.max_terms {
        terms.truncate(max_terms);
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::{visible_terms, AnnotationOptions};
    use crate::model::{Annotation, GroupId};
    use crate::state::GroupFilter;

    #[test]
    fn visible_terms_filters_sorts_and_caps() {
        let devi = GroupId::new("DEVI").expect("group");
        let diso = GroupId::new("DISO").expect("group");
        let data = vec![
            Annotation::new("array", vec![devi.clone()], 2),
            Annotation::new("chip", vec![devi.clone()], 5),
            Annotation::new("tumor", vec![diso], 9),
            Annotation::new("scanner", vec![devi.clone()], 1),
        ];
        let options = AnnotationOptions {
            width: 400,
            height: 400,
            group_filter: GroupFilter::new([devi]),
            max_terms: Some(2),
        };

        let terms = visible_terms(&data, &options)
            .into_iter()
            .map(|annotation| annotation.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(terms, vec!["chip", "array"]);
    }
}
