// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ArticleId;

/// Minimum number of topic-scoped articles for a similarity network to make sense.
pub const SIMILARITY_MIN_ARTICLES: usize = 2;

/// Which panels below the distribution matrix are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelVisibility {
    pub similarity: bool,
    pub reference_annotations: bool,
    pub compared_annotations: bool,
}

impl PanelVisibility {
    pub const HIDDEN: Self = Self {
        similarity: false,
        reference_annotations: false,
        compared_annotations: false,
    };

    pub fn compute(
        topic_article_count: usize,
        reference: Option<&ArticleId>,
        compared: Option<&ArticleId>,
    ) -> Self {
        let Some(reference) = reference else {
            return Self::HIDDEN;
        };

        if topic_article_count < SIMILARITY_MIN_ARTICLES {
            return Self {
                similarity: false,
                reference_annotations: true,
                compared_annotations: false,
            };
        }

        Self {
            similarity: true,
            reference_annotations: true,
            compared_annotations: compared.is_some_and(|compared| compared != reference),
        }
    }

    pub fn annotation_group(&self) -> bool {
        self.reference_annotations || self.compared_annotations
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PanelVisibility;
    use crate::model::ArticleId;

    fn id(value: &str) -> ArticleId {
        ArticleId::new(value).expect("article id")
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn small_topics_never_show_similarity(#[case] count: usize) {
        let reference = id("14521963");
        for compared in [None, Some(id("14521963")), Some(id("10773095"))] {
            let visibility = PanelVisibility::compute(count, Some(&reference), compared.as_ref());
            assert!(!visibility.similarity);
            assert!(visibility.reference_annotations);
            assert!(!visibility.compared_annotations);
        }
        assert_eq!(PanelVisibility::compute(count, None, None), PanelVisibility::HIDDEN);
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(40)]
    fn reference_pick_shows_similarity_and_reference_annotations(#[case] count: usize) {
        let reference = id("59472");
        let visibility = PanelVisibility::compute(count, Some(&reference), None);
        assert_eq!(
            visibility,
            PanelVisibility {
                similarity: true,
                reference_annotations: true,
                compared_annotations: false,
            }
        );
    }

    #[test]
    fn compared_panel_requires_distinct_article() {
        let reference = id("59472");
        let same = PanelVisibility::compute(3, Some(&reference), Some(&id("59472")));
        assert!(!same.compared_annotations);
        let other = PanelVisibility::compute(3, Some(&reference), Some(&id("64840")));
        assert!(other.compared_annotations);
    }

    #[test]
    fn nothing_shows_before_reference() {
        assert_eq!(PanelVisibility::compute(3, None, Some(&id("1"))), PanelVisibility::HIDDEN);
    }
}
