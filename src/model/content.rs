// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{ArticleId, ContentLabel, TopicId};

/// A named document collection, e.g. full text (`ft`) or title and abstract (`ta`).
///
/// `see_also` links the collection to a companion collection that holds the same
/// articles under alternate identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub label: ContentLabel,
    pub text: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<ContentLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Content {
    pub fn new(label: ContentLabel, text: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
            prefix: prefix.into(),
            alt_prefix: None,
            see_also: None,
            url: None,
        }
    }

    pub fn with_see_also(mut self, see_also: ContentLabel) -> Self {
        self.see_also = Some(see_also);
        self
    }

    /// `PMC:59472`-style label for an article of this collection.
    pub fn prefixed_id(&self, id: &ArticleId) -> String {
        if self.prefix.is_empty() {
            id.to_string()
        } else {
            format!("{}:{id}", self.prefix)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub text: String,
}

impl Topic {
    pub fn new(id: TopicId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// An article scoped to exactly one topic within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub topic: TopicId,
    pub id: ArticleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_id: Option<ArticleId>,
    pub title: String,
}

impl Article {
    pub fn new(topic: TopicId, id: ArticleId, title: impl Into<String>) -> Self {
        Self {
            topic,
            id,
            alt_id: None,
            title: title.into(),
        }
    }

    pub fn with_alt_id(mut self, alt_id: ArticleId) -> Self {
        self.alt_id = Some(alt_id);
        self
    }
}
