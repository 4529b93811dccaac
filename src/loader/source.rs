// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AnnotationSource, LoadError};
use crate::model::{ArticleId, LoadedAnnotations};

/// `<path>/<article-id>.json`, regardless of whether `path` ends with a slash.
pub fn annotation_location(path: &str, article_id: &ArticleId) -> String {
    if path.is_empty() {
        return format!("{article_id}.json");
    }
    let separator = if path.ends_with('/') { "" } else { "/" };
    format!("{path}{separator}{article_id}.json")
}

fn is_http(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Loads `{"data": [...]}` annotation documents from a directory or an HTTP base URL.
#[derive(Debug, Clone, Default)]
pub struct PathSource {
    client: reqwest::Client,
}

impl PathSource {
    pub fn new() -> Self {
        Self::default()
    }

    async fn load_http(&self, location: String) -> Result<LoadedAnnotations, LoadError> {
        let response = self
            .client
            .get(&location)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| {
                if source.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                    LoadError::NotFound {
                        location: location.clone(),
                    }
                } else {
                    LoadError::Http {
                        location: location.clone(),
                        source,
                    }
                }
            })?;
        let body = response.text().await.map_err(|source| LoadError::Http {
            location: location.clone(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| LoadError::Json { location, source })
    }

    async fn load_file(&self, location: String) -> Result<LoadedAnnotations, LoadError> {
        let raw = tokio::fs::read_to_string(&location).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    location: location.clone(),
                }
            } else {
                LoadError::Io {
                    location: location.clone(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&raw).map_err(|source| LoadError::Json { location, source })
    }
}

#[async_trait]
impl AnnotationSource for PathSource {
    async fn load(&self, path: &str, article_id: &ArticleId) -> Result<LoadedAnnotations, LoadError> {
        let location = annotation_location(path, article_id);
        if is_http(&location) {
            self.load_http(location).await
        } else {
            self.load_file(location).await
        }
    }
}

/// In-memory annotations keyed by collection path and article id.
///
/// Counts every fetch it serves (including misses), which makes it usable both for the
/// demo dataset and for asserting that a code path did not fetch.
#[derive(Debug, Default)]
pub struct StaticSource {
    entries: Mutex<HashMap<(String, ArticleId), LoadedAnnotations>>,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<String>, article_id: ArticleId, loaded: LoadedAnnotations) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert((path.into(), article_id), loaded);
        }
    }

    pub fn with(self, path: impl Into<String>, article_id: ArticleId, loaded: LoadedAnnotations) -> Self {
        self.insert(path, article_id, loaded);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnnotationSource for StaticSource {
    async fn load(&self, path: &str, article_id: &ArticleId) -> Result<LoadedAnnotations, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let found = self
            .entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&(path.to_owned(), article_id.clone())).cloned());
        found.ok_or_else(|| LoadError::NotFound {
            location: annotation_location(path, article_id),
        })
    }
}
