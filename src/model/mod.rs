// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Collections contain topic-scoped articles; articles become annotated articles once
//! their annotations are loaded.

pub mod annotation;
pub mod content;
pub mod ids;

pub use annotation::{
    group_name, known_groups, AnnotatedArticle, Annotation, AnnotationList, LoadedAnnotations,
    KNOWN_GROUPS,
};
pub use content::{Article, Content, Topic};
pub use ids::{ArticleId, ContentLabel, GroupId, Id, IdError, TopicId};
