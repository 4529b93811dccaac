// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Selection state.
//!
//! `SelectionState` is a value: every transition consumes the old state and returns the
//! next one, so the viewer can only change selections through the named transitions
//! below.

use std::collections::BTreeSet;

use crate::model::{Annotation, ArticleId, ContentLabel, GroupId, TopicId};

/// Set of semantic groups statistics and annotation clouds are restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    groups: BTreeSet<GroupId>,
}

impl GroupFilter {
    pub fn new(groups: impl IntoIterator<Item = GroupId>) -> Self {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    pub fn contains(&self, group: &GroupId) -> bool {
        self.groups.contains(group)
    }

    pub fn accepts(&self, annotation: &Annotation) -> bool {
        annotation.groups.iter().any(|group| self.groups.contains(group))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupId> + '_ {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<GroupId> for GroupFilter {
    fn from_iter<I: IntoIterator<Item = GroupId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Selections remembered when a group filter is applied, re-selected after the
/// distribution is recomputed from cached annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshTarget {
    pub reference: Option<ArticleId>,
    pub compared: Option<ArticleId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStage {
    ContentSelected,
    TopicSelected,
    ReferenceSelected,
    ComparedSelected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    content: ContentLabel,
    topic: Option<TopicId>,
    reference: Option<ArticleId>,
    compared: Option<ArticleId>,
    group_filter: GroupFilter,
    refresh: Option<RefreshTarget>,
}

impl SelectionState {
    pub fn new(content: ContentLabel, topic: Option<TopicId>, group_filter: GroupFilter) -> Self {
        Self {
            content,
            topic,
            reference: None,
            compared: None,
            group_filter,
            refresh: None,
        }
    }

    pub fn content(&self) -> &ContentLabel {
        &self.content
    }

    pub fn topic(&self) -> Option<&TopicId> {
        self.topic.as_ref()
    }

    pub fn reference(&self) -> Option<&ArticleId> {
        self.reference.as_ref()
    }

    pub fn compared(&self) -> Option<&ArticleId> {
        self.compared.as_ref()
    }

    pub fn group_filter(&self) -> &GroupFilter {
        &self.group_filter
    }

    pub fn refresh_mode(&self) -> bool {
        self.refresh.is_some()
    }

    pub fn stage(&self) -> ViewStage {
        match (&self.topic, &self.reference, &self.compared) {
            (None, _, _) => ViewStage::ContentSelected,
            (Some(_), None, _) => ViewStage::TopicSelected,
            (Some(_), Some(_), None) => ViewStage::ReferenceSelected,
            (Some(_), Some(_), Some(_)) => ViewStage::ComparedSelected,
        }
    }

    /// Switches collection; the caller passes the collection's first topic.
    pub fn with_content(self, content: ContentLabel, first_topic: Option<TopicId>) -> Self {
        Self {
            content,
            topic: first_topic,
            reference: None,
            compared: None,
            group_filter: self.group_filter,
            refresh: None,
        }
    }

    pub fn with_topic(self, topic: TopicId) -> Self {
        Self {
            topic: Some(topic),
            reference: None,
            compared: None,
            refresh: None,
            ..self
        }
    }

    /// A new reference always drops the compared article.
    pub fn with_reference(self, reference: ArticleId) -> Self {
        Self {
            reference: Some(reference),
            compared: None,
            ..self
        }
    }

    /// Ignored while no reference is selected.
    pub fn with_compared(self, compared: Option<ArticleId>) -> Self {
        if self.reference.is_none() {
            return self;
        }
        Self { compared, ..self }
    }

    pub fn without_selection(self) -> Self {
        Self {
            reference: None,
            compared: None,
            ..self
        }
    }

    /// Applies a new filter and enters refresh mode, remembering the current selections.
    pub fn with_group_filter(self, group_filter: GroupFilter) -> Self {
        let refresh = RefreshTarget {
            reference: self.reference.clone(),
            compared: self.compared.clone(),
        };
        Self {
            group_filter,
            refresh: Some(refresh),
            ..self
        }
    }

    /// Leaves refresh mode, handing back what was remembered. Refresh mode is single-use.
    pub fn take_refresh(self) -> (Self, Option<RefreshTarget>) {
        let refresh = self.refresh.clone();
        (
            Self {
                refresh: None,
                ..self
            },
            refresh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupFilter, RefreshTarget, SelectionState, ViewStage};
    use crate::model::{ArticleId, GroupId};

    fn id(value: &str) -> ArticleId {
        ArticleId::new(value).expect("article id")
    }

    fn state() -> SelectionState {
        SelectionState::new(
            "ft".parse().expect("label"),
            Some("_107".parse().expect("topic")),
            GroupFilter::new([GroupId::new("DISO").expect("group")]),
        )
    }

    #[test]
    fn stages_follow_selection_depth() {
        let state = state();
        assert_eq!(state.stage(), ViewStage::TopicSelected);
        let state = state.with_reference(id("59472"));
        assert_eq!(state.stage(), ViewStage::ReferenceSelected);
        let state = state.with_compared(Some(id("64840")));
        assert_eq!(state.stage(), ViewStage::ComparedSelected);
        let state = state.with_content("ta".parse().expect("label"), None);
        assert_eq!(state.stage(), ViewStage::ContentSelected);
    }

    #[test]
    fn topic_change_clears_deeper_selections() {
        let state = state()
            .with_reference(id("59472"))
            .with_compared(Some(id("64840")))
            .with_topic("_106".parse().expect("topic"));
        assert!(state.reference().is_none());
        assert!(state.compared().is_none());
    }

    #[test]
    fn new_reference_drops_compared() {
        let state = state()
            .with_reference(id("59472"))
            .with_compared(Some(id("64840")))
            .with_reference(id("55328"));
        assert!(state.compared().is_none());
    }

    #[test]
    fn compared_requires_reference() {
        let state = state().with_compared(Some(id("64840")));
        assert!(state.compared().is_none());
    }

    #[test]
    fn refresh_mode_is_single_use_and_cleared_by_topic_change() {
        let state = state()
            .with_reference(id("59472"))
            .with_group_filter(GroupFilter::default());
        assert!(state.refresh_mode());

        let (state, refresh) = state.take_refresh();
        assert_eq!(
            refresh,
            Some(RefreshTarget {
                reference: Some(id("59472")),
                compared: None,
            })
        );
        assert!(!state.refresh_mode());
        assert_eq!(state.take_refresh().1, None);

        let state = self::state()
            .with_group_filter(GroupFilter::default())
            .with_topic("_106".parse().expect("topic"));
        assert!(!state.refresh_mode());
    }

    #[test]
    fn content_change_keeps_group_filter() {
        let state = state().with_content("ta".parse().expect("label"), None);
        assert_eq!(state.group_filter().len(), 1);
    }
}
