// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::content::Article;
use super::ids::{ArticleId, GroupId};

/// UMLS semantic groups, in the order the distribution matrix lists them.
pub const KNOWN_GROUPS: [(&str, &str); 15] = [
    ("ACTI", "Activities & Behaviors"),
    ("ANAT", "Anatomy"),
    ("CHEM", "Chemicals & Drugs"),
    ("CONC", "Concepts & Ideas"),
    ("DEVI", "Devices"),
    ("DISO", "Disorders"),
    ("GENE", "Genes & Molecular Sequences"),
    ("GEOG", "Geographic Areas"),
    ("LIVB", "Living Beings"),
    ("OBJC", "Objects"),
    ("OCCU", "Occupations"),
    ("ORGA", "Organizations"),
    ("PHEN", "Phenomena"),
    ("PHYS", "Physiology"),
    ("PROC", "Procedures"),
];

/// Display name of a known group; unknown ids have none.
pub fn group_name(id: &GroupId) -> Option<&'static str> {
    KNOWN_GROUPS
        .iter()
        .find(|(known, _)| *known == id.as_str())
        .map(|(_, name)| *name)
}

pub fn known_groups() -> Vec<GroupId> {
    KNOWN_GROUPS
        .iter()
        .filter_map(|(id, _)| GroupId::new(id).ok())
        .collect()
}

/// One annotated term of an article: the surface text, the semantic groups its concept
/// belongs to, and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

fn default_count() -> u32 {
    1
}

impl Annotation {
    pub fn new(text: impl Into<String>, groups: Vec<GroupId>, count: u32) -> Self {
        Self {
            text: text.into(),
            groups,
            count,
            uri: None,
        }
    }

    pub fn has_group(&self, group: &GroupId) -> bool {
        self.groups.contains(group)
    }
}

pub type AnnotationList = Vec<Annotation>;

/// Payload an annotation source resolves to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAnnotations {
    pub data: AnnotationList,
}

/// An article enriched with its loaded annotations. Only exists after a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedArticle {
    pub id: ArticleId,
    pub title: String,
    pub alt_id: Option<ArticleId>,
    pub annotations: AnnotationList,
}

impl AnnotatedArticle {
    pub fn from_article(article: &Article, loaded: LoadedAnnotations) -> Self {
        Self {
            id: article.id.clone(),
            title: article.title.clone(),
            alt_id: article.alt_id.clone(),
            annotations: loaded.data,
        }
    }
}
