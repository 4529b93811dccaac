// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Distribution and similarity statistics over annotated articles.
//!
//! The viewer only assembles inputs and renders what a [`Statistics`] implementation
//! returns; [`BiolinksStatistics`] is the implementation shipped with the crate.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;

use crate::model::{AnnotatedArticle, ArticleId, GroupId};
use crate::state::GroupFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionColumn {
    pub id: ArticleId,
    pub alt_id: Option<ArticleId>,
    pub title: String,
}

/// Groups (rows) by articles (columns); each cell is the share of the article's
/// annotation occurrences that fall in the group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistributionMatrix {
    pub groups: Vec<GroupId>,
    pub columns: Vec<DistributionColumn>,
    pub cells: Vec<Vec<f64>>,
}

impl DistributionMatrix {
    pub fn column_index(&self, id: &ArticleId) -> Option<usize> {
        self.columns.iter().position(|column| &column.id == id)
    }

    pub fn contains_article(&self, id: &ArticleId) -> bool {
        self.column_index(id).is_some()
    }

    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityNode {
    pub id: ArticleId,
    pub alt_id: Option<ArticleId>,
    pub title: String,
    pub score: f64,
    pub shared_terms: Vec<String>,
}

/// Star-shaped network around the query article.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityGraph {
    pub query: SimilarityNode,
    pub related: Vec<SimilarityNode>,
}

impl SimilarityGraph {
    pub fn node(&self, id: &ArticleId) -> Option<&SimilarityNode> {
        if &self.query.id == id {
            return Some(&self.query);
        }
        self.related.iter().find(|node| &node.id == id)
    }

    pub fn contains(&self, id: &ArticleId) -> bool {
        self.node(id).is_some()
    }

    /// Query node first, then related nodes by descending score.
    pub fn nodes(&self) -> impl Iterator<Item = &SimilarityNode> + '_ {
        std::iter::once(&self.query).chain(self.related.iter())
    }
}

pub trait Statistics: Send + Sync {
    fn compute_distribution(
        &self,
        articles: &[AnnotatedArticle],
        filter: Option<&GroupFilter>,
    ) -> DistributionMatrix;

    fn compute_similarity(
        &self,
        query: &AnnotatedArticle,
        candidates: &[AnnotatedArticle],
        filter: Option<&GroupFilter>,
    ) -> SimilarityGraph;
}

/// Occurrence-share distribution and Jaccard similarity over filtered term sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiolinksStatistics;

impl BiolinksStatistics {
    fn group_counts(
        article: &AnnotatedArticle,
        filter: Option<&GroupFilter>,
    ) -> BTreeMap<GroupId, u64> {
        let mut counts = BTreeMap::<GroupId, u64>::new();
        for annotation in &article.annotations {
            for group in &annotation.groups {
                if filter.is_some_and(|filter| !filter.contains(group)) {
                    continue;
                }
                *counts.entry(group.clone()).or_default() += u64::from(annotation.count);
            }
        }
        counts
    }

    fn term_set(article: &AnnotatedArticle, filter: Option<&GroupFilter>) -> BTreeSet<String> {
        article
            .annotations
            .iter()
            .filter(|annotation| filter.map_or(true, |filter| filter.accepts(annotation)))
            .map(|annotation| annotation.text.to_lowercase())
            .collect()
    }

    fn node(article: &AnnotatedArticle, score: f64, shared_terms: Vec<String>) -> SimilarityNode {
        SimilarityNode {
            id: article.id.clone(),
            alt_id: article.alt_id.clone(),
            title: article.title.clone(),
            score,
            shared_terms,
        }
    }
}

impl Statistics for BiolinksStatistics {
    fn compute_distribution(
        &self,
        articles: &[AnnotatedArticle],
        filter: Option<&GroupFilter>,
    ) -> DistributionMatrix {
        let per_article = articles
            .par_iter()
            .map(|article| (article, Self::group_counts(article, filter)))
            .filter(|(_, counts)| !counts.is_empty())
            .collect::<Vec<_>>();

        let groups = match filter {
            Some(filter) => filter.iter().cloned().collect::<Vec<_>>(),
            None => per_article
                .iter()
                .flat_map(|(_, counts)| counts.keys().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        };

        let columns = per_article
            .iter()
            .map(|(article, _)| DistributionColumn {
                id: article.id.clone(),
                alt_id: article.alt_id.clone(),
                title: article.title.clone(),
            })
            .collect();

        let cells = groups
            .iter()
            .map(|group| {
                per_article
                    .iter()
                    .map(|(_, counts)| {
                        let total = counts.values().sum::<u64>();
                        let in_group = counts.get(group).copied().unwrap_or(0);
                        if total == 0 {
                            0.0
                        } else {
                            in_group as f64 / total as f64
                        }
                    })
                    .collect()
            })
            .collect();

        DistributionMatrix {
            groups,
            columns,
            cells,
        }
    }

    fn compute_similarity(
        &self,
        query: &AnnotatedArticle,
        candidates: &[AnnotatedArticle],
        filter: Option<&GroupFilter>,
    ) -> SimilarityGraph {
        let query_terms = Self::term_set(query, filter);

        let mut related = candidates
            .par_iter()
            .filter(|candidate| candidate.id != query.id)
            .map(|candidate| {
                let terms = Self::term_set(candidate, filter);
                let shared = query_terms.intersection(&terms).cloned().collect::<Vec<_>>();
                let union = query_terms.union(&terms).count();
                let score = if union == 0 {
                    0.0
                } else {
                    shared.len() as f64 / union as f64
                };
                Self::node(candidate, score, shared)
            })
            .collect::<Vec<_>>();

        related.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));

        SimilarityGraph {
            query: Self::node(query, 1.0, Vec::new()),
            related,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BiolinksStatistics, Statistics};
    use crate::model::{AnnotatedArticle, Annotation, ArticleId, GroupId};
    use crate::state::GroupFilter;

    fn group(value: &str) -> GroupId {
        GroupId::new(value).expect("group")
    }

    fn article(id: &str, annotations: &[(&str, &str, u32)]) -> AnnotatedArticle {
        AnnotatedArticle {
            id: ArticleId::new(id).expect("id"),
            title: format!("Article {id}"),
            alt_id: None,
            annotations: annotations
                .iter()
                .map(|(text, grp, count)| Annotation::new(*text, vec![group(grp)], *count))
                .collect(),
        }
    }

    fn sample() -> Vec<AnnotatedArticle> {
        vec![
            article("1", &[("microarray", "DEVI", 3), ("cancer", "DISO", 1)]),
            article("2", &[("microarray", "DEVI", 1), ("liver", "ANAT", 1)]),
            article("3", &[("liver", "ANAT", 2)]),
        ]
    }

    #[test]
    fn distribution_shares_sum_to_one_per_article() {
        let matrix = BiolinksStatistics.compute_distribution(&sample(), None);
        assert_eq!(matrix.groups, vec![group("ANAT"), group("DEVI"), group("DISO")]);
        assert_eq!(matrix.columns.len(), 3);
        for column in 0..matrix.columns.len() {
            let total: f64 = (0..matrix.groups.len()).map(|row| matrix.value(row, column)).sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
        let first = matrix.column_index(&ArticleId::new("1").expect("id")).expect("column");
        assert!((matrix.value(1, first) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn filter_restricts_rows_and_drops_excluded_articles() {
        let filter = GroupFilter::new([group("DEVI"), group("DISO")]);
        let matrix = BiolinksStatistics.compute_distribution(&sample(), Some(&filter));
        assert_eq!(matrix.groups, vec![group("DEVI"), group("DISO")]);
        assert!(!matrix.contains_article(&ArticleId::new("3").expect("id")));
        assert_eq!(matrix.columns.len(), 2);
    }

    #[test]
    fn similarity_ranks_by_shared_terms_and_excludes_query() {
        let articles = sample();
        let graph = BiolinksStatistics.compute_similarity(&articles[1], &articles, None);
        assert_eq!(graph.query.id.as_str(), "2");
        assert_eq!(graph.related.len(), 2);
        assert!(graph.related.iter().all(|node| node.id.as_str() != "2"));
        assert_eq!(graph.related[0].id.as_str(), "3");
        assert!((graph.related[0].score - 0.5).abs() < 1e-9);
        assert_eq!(graph.related[0].shared_terms, vec!["liver".to_owned()]);
        assert_eq!(graph.nodes().count(), 3);
    }

    #[test]
    fn similarity_respects_filter() {
        let articles = sample();
        let filter = GroupFilter::new([group("DEVI")]);
        let graph = BiolinksStatistics.compute_similarity(&articles[1], &articles, Some(&filter));
        let first = graph.node(&ArticleId::new("1").expect("id")).expect("node");
        assert!((first.score - 1.0).abs() < 1e-9);
        let third = graph.node(&ArticleId::new("3").expect("id")).expect("node");
        assert_eq!(third.score, 0.0);
    }
}
