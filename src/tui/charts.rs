// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal renditions of the viewer's chart components.
//!
//! Each view keeps the last data it was given plus a cursor; drawing happens in
//! `draw`, which only reads from these views.

use std::collections::BTreeSet;

use crate::chart::{
    visible_terms, AnnotationChart, AnnotationOptions, AnnotationRole, ChartEvent, Charts,
    DistributionChart, DistributionOptions, SimilarityChart, SimilarityOptions,
};
use crate::model::{Annotation, ArticleId, Content, ContentLabel};
use crate::stats::{DistributionMatrix, SimilarityGraph, SimilarityNode};

fn clamp_cursor(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = cursor as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DistributionView {
    data: Option<DistributionMatrix>,
    options: Option<DistributionOptions>,
    cursor: usize,
    selected: Option<ArticleId>,
}

impl DistributionView {
    pub(crate) fn data(&self) -> Option<&DistributionMatrix> {
        self.data.as_ref()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn selected(&self) -> Option<&ArticleId> {
        self.selected.as_ref()
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let len = self.data.as_ref().map_or(0, |data| data.columns.len());
        self.cursor = clamp_cursor(self.cursor, delta, len);
    }

    pub(crate) fn cursor_article(&self) -> Option<&ArticleId> {
        self.data
            .as_ref()
            .and_then(|data| data.columns.get(self.cursor))
            .map(|column| &column.id)
    }

    /// Marks the column under the cursor and returns the click it stands for.
    pub(crate) fn activate(&mut self) -> Option<ChartEvent> {
        let article_id = self.cursor_article()?.clone();
        self.selected = Some(article_id.clone());
        Some(ChartEvent::DistributionSelected { article_id })
    }

    pub(crate) fn column_url(&self, id: &ArticleId) -> Option<String> {
        let url = self.options.as_ref()?.url.as_ref()?;
        Some(format!("{url}{id}"))
    }

    pub(crate) fn column_label(&self, id: &ArticleId) -> String {
        match self.options.as_ref() {
            Some(options) if !options.prefix.is_empty() => format!("{}:{id}", options.prefix),
            _ => id.to_string(),
        }
    }
}

impl DistributionChart for DistributionView {
    fn render(&mut self, data: &DistributionMatrix, options: &DistributionOptions) {
        self.cursor = self.cursor.min(data.columns.len().saturating_sub(1));
        self.data = Some(data.clone());
        self.options = Some(options.clone());
        self.selected = None;
    }

    fn select(&mut self, article_id: &ArticleId) -> bool {
        let Some(index) = self.data.as_ref().and_then(|data| data.column_index(article_id)) else {
            return false;
        };
        self.cursor = index;
        self.selected = Some(article_id.clone());
        true
    }

    fn clear(&mut self) {
        self.data = None;
        self.options = None;
        self.selected = None;
        self.cursor = 0;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SimilarityView {
    collection: ContentLabel,
    header: String,
    data: Option<SimilarityGraph>,
    options: Option<SimilarityOptions>,
    cursor: usize,
    selected: Option<ArticleId>,
    settling: bool,
}

impl SimilarityView {
    pub(crate) fn new(slot: &Content) -> Self {
        Self {
            collection: slot.label.clone(),
            header: format!("Similarity network - {}", slot.text),
            data: None,
            options: None,
            cursor: 0,
            selected: None,
            settling: false,
        }
    }

    pub(crate) fn header(&self) -> &str {
        &self.header
    }

    pub(crate) fn data(&self) -> Option<&SimilarityGraph> {
        self.data.as_ref()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn selected(&self) -> Option<&ArticleId> {
        self.selected.as_ref()
    }

    /// Whether the layout is still moving; terminal graphs settle on the next draw.
    pub(crate) fn is_settling(&self) -> bool {
        self.settling
    }

    pub(crate) fn settle(&mut self) {
        self.settling = false;
    }

    pub(crate) fn move_cursor(&mut self, delta: isize) {
        let len = self.data.as_ref().map_or(0, |graph| graph.nodes().count());
        self.cursor = clamp_cursor(self.cursor, delta, len);
    }

    pub(crate) fn activate(&mut self) -> Option<ChartEvent> {
        let node = self.data.as_ref()?.nodes().nth(self.cursor)?;
        let event = ChartEvent::SimilaritySelected {
            collection: self.collection.clone(),
            related_id: node.id.clone(),
            terms: node.shared_terms.clone(),
        };
        self.selected = Some(node.id.clone());
        Some(event)
    }

    /// Link to the article page of the node under the cursor, in the graph's own collection.
    pub(crate) fn cursor_url(&self) -> Option<String> {
        let node = self.data.as_ref()?.nodes().nth(self.cursor)?;
        let url = self.options.as_ref()?.url.as_ref()?;
        Some(format!("{url}{}", node.id))
    }

    /// Identifier shown for `node`: linked graphs show the active collection's ids.
    pub(crate) fn node_label(&self, node: &SimilarityNode) -> String {
        let Some(options) = self.options.as_ref() else {
            return node.id.to_string();
        };
        if options.use_alternative_ids {
            if let (Some(alt_id), Some(alt_prefix)) =
                (node.alt_id.as_ref(), options.alternative_prefix_id.as_ref())
            {
                return format!("{alt_prefix}:{alt_id}");
            }
        }
        format!("{}:{}", options.prefix_id, node.id)
    }
}

impl SimilarityChart for SimilarityView {
    fn render(&mut self, data: &SimilarityGraph, options: &SimilarityOptions) {
        self.data = Some(data.clone());
        self.options = Some(options.clone());
        self.cursor = 0;
        self.selected = None;
        self.settling = true;
    }

    fn select(&mut self, article_id: &ArticleId) -> bool {
        let Some(index) = self
            .data
            .as_ref()
            .and_then(|graph| graph.nodes().position(|node| &node.id == article_id))
        else {
            return false;
        };
        self.cursor = index;
        self.selected = Some(article_id.clone());
        true
    }

    fn stop_force(&mut self) {
        self.settling = false;
    }

    fn clear(&mut self) {
        self.data = None;
        self.options = None;
        self.cursor = 0;
        self.selected = None;
    }
}

#[derive(Debug, Clone)]
pub(crate) struct AnnotationView {
    header: String,
    data: Vec<Annotation>,
    options: Option<AnnotationOptions>,
    highlighted: BTreeSet<String>,
}

impl AnnotationView {
    pub(crate) fn new(slot: &Content, role: AnnotationRole) -> Self {
        let panel = match role {
            AnnotationRole::Reference => "Reference annotations",
            AnnotationRole::Compared => "Compared annotations",
        };
        Self {
            header: format!("{panel} - {}", slot.text),
            data: Vec::new(),
            options: None,
            highlighted: BTreeSet::new(),
        }
    }

    pub(crate) fn header(&self) -> &str {
        &self.header
    }

    pub(crate) fn is_rendered(&self) -> bool {
        self.options.is_some()
    }

    /// Terms that pass the current filter, most frequent first.
    pub(crate) fn terms(&self) -> Vec<&Annotation> {
        match self.options.as_ref() {
            Some(options) => visible_terms(&self.data, options),
            None => Vec::new(),
        }
    }

    pub(crate) fn is_highlighted(&self, annotation: &Annotation) -> bool {
        self.highlighted.contains(&annotation.text.to_lowercase())
    }
}

impl AnnotationChart for AnnotationView {
    fn render(&mut self, data: &[Annotation], options: &AnnotationOptions) {
        self.data = data.to_vec();
        self.options = Some(options.clone());
        self.highlighted.clear();
    }

    fn highlight(&mut self, terms: &BTreeSet<String>) {
        self.highlighted = terms.iter().map(|term| term.to_lowercase()).collect();
    }

    fn clear(&mut self) {
        self.data.clear();
        self.options = None;
        self.highlighted.clear();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TerminalCharts;

impl Charts for TerminalCharts {
    type Distribution = DistributionView;
    type Similarity = SimilarityView;
    type Annotation = AnnotationView;

    fn distribution(&mut self) -> Self::Distribution {
        DistributionView::default()
    }

    fn similarity(&mut self, slot: &Content) -> Self::Similarity {
        SimilarityView::new(slot)
    }

    fn annotation(&mut self, slot: &Content, role: AnnotationRole) -> Self::Annotation {
        AnnotationView::new(slot, role)
    }
}
