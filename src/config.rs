// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Viewer configuration.
//!
//! Camel-case JSON keys:
//! `content` lists the collections, `topics`/`articles`/`paths` are keyed by collection
//! label.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{known_groups, Article, Content, ContentLabel, GroupId, Topic, TopicId};

pub const DEFAULT_TITLE: &str = "Biotea-Biolinks";
pub const DEFAULT_WIDTH: u32 = 880;
pub const DEFAULT_PANEL_HEIGHT: u32 = 400;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    pub title: String,
    pub width: u32,
    pub annotation_height: u32,
    pub similarity_height: u32,
    pub distribution_height: u32,
    pub content: Vec<Content>,
    pub topics: BTreeMap<ContentLabel, Vec<Topic>>,
    pub articles: BTreeMap<ContentLabel, Vec<Article>>,
    pub paths: BTreeMap<ContentLabel, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_terms: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<GroupId>>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            width: DEFAULT_WIDTH,
            annotation_height: DEFAULT_PANEL_HEIGHT,
            similarity_height: DEFAULT_PANEL_HEIGHT,
            distribution_height: DEFAULT_PANEL_HEIGHT,
            content: Vec::new(),
            topics: BTreeMap::new(),
            articles: BTreeMap::new(),
            paths: BTreeMap::new(),
            max_terms: None,
            groups: None,
        }
    }
}

impl ViewerOptions {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_json_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects configurations the viewer cannot start from: no collections, a
    /// collection without topics, or a `seeAlso` naming an unknown collection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.is_empty() {
            return Err(ConfigError::NoContent);
        }
        for content in &self.content {
            let has_topics = self
                .topics
                .get(&content.label)
                .is_some_and(|topics| !topics.is_empty());
            if !has_topics {
                return Err(ConfigError::MissingTopics {
                    content: content.label.clone(),
                });
            }
            if let Some(see_also) = &content.see_also {
                if self.content_by_label(see_also).is_none() {
                    return Err(ConfigError::UnknownSeeAlso {
                        content: content.label.clone(),
                        see_also: see_also.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn content_by_label(&self, label: &ContentLabel) -> Option<&Content> {
        self.content.iter().find(|content| &content.label == label)
    }

    pub fn topics_for(&self, label: &ContentLabel) -> &[Topic] {
        self.topics.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn articles_for(&self, label: &ContentLabel) -> &[Article] {
        self.articles.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn topic_articles(&self, label: &ContentLabel, topic: &TopicId) -> Vec<Article> {
        self.articles_for(label)
            .iter()
            .filter(|article| &article.topic == topic)
            .cloned()
            .collect()
    }

    pub fn path_for(&self, label: &ContentLabel) -> Option<&str> {
        self.paths.get(label).map(String::as_str)
    }

    /// Rebases relative filesystem `paths` onto `base` (the config file's directory).
    /// URLs and absolute paths are left alone.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in self.paths.values_mut() {
            let is_url = path.starts_with("http://") || path.starts_with("https://");
            if is_url || Path::new(path.as_str()).is_absolute() {
                continue;
            }
            let mut resolved = base.join(path.as_str()).to_string_lossy().into_owned();
            if path.ends_with('/') && !resolved.ends_with('/') {
                resolved.push('/');
            }
            *path = resolved;
        }
    }

    /// Groups offered by the filter dialog and selected by default.
    pub fn known_groups(&self) -> Vec<GroupId> {
        match &self.groups {
            Some(groups) if !groups.is_empty() => groups.clone(),
            _ => known_groups(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    NoContent,
    MissingTopics {
        content: ContentLabel,
    },
    UnknownSeeAlso {
        content: ContentLabel,
        see_also: ContentLabel,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::NoContent => f.write_str("configuration lists no content collections"),
            Self::MissingTopics { content } => {
                write!(f, "content collection {content} has no topics")
            }
            Self::UnknownSeeAlso { content, see_also } => write!(
                f,
                "content collection {content} links to unknown collection {see_also}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::NoContent | Self::MissingTopics { .. } | Self::UnknownSeeAlso { .. } => None,
        }
    }
}
