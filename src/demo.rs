// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Biolinks and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in demo dataset: a full-text collection linked to a title+abstract collection,
//! with deterministic synthetic annotations so the viewer runs without any data files.

use crate::config::ViewerOptions;
use crate::loader::StaticSource;
use crate::model::{Annotation, Article, GroupId, LoadedAnnotations};

pub const DEMO_FT_PATH: &str = "demo/pmc/";
pub const DEMO_TA_PATH: &str = "demo/pubmed/";

const DEMO_OPTIONS: &str = r#"{
    "title": "Biotea-Biolinks (demo)",
    "content": [
        {"label": "ft", "text": "Full content", "prefix": "PMC", "seeAlso": "ta",
            "url": "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC"},
        {"label": "ta", "text": "Title and abstract", "prefix": "PMID",
            "url": "https://pubmed.ncbi.nlm.nih.gov/"}
    ],
    "topics": {
        "ft": [{"id": "_107", "text": "Topic with 3ft and 4 ta articles"}],
        "ta": [
            {"id": "_106", "text": "Topic with 0ft and 1 ta articles"},
            {"id": "_107", "text": "Topic with 3ft and 4 ta articles"}
        ]
    },
    "articles": {
        "ft": [
            {"topic": "_107", "id": "55328", "altId": "11532215",
                "title": "Cluster-Rasch models for microarray gene expression data."},
            {"topic": "_107", "id": 59472, "altId": 11690545,
                "title": "A simple method for statistical analysis of intensity differences in microarray-derived gene expression data."},
            {"topic": "_107", "id": 64840, "altId": 11790258,
                "title": "Evaluation of normalization procedures for oligonucleotide array data based on spiked cRNA controls."}
        ],
        "ta": [
            {"topic": "_106", "id": 14521963,
                "title": "A comprehensive search for HNF-3alpha-regulated genes in mouse hepatoma cells by 60K cDNA microarray and chromatin immunoprecipitation/PCR analysis."},
            {"topic": "_107", "id": 10773095,
                "title": "Normalization strategies for cDNA microarrays."},
            {"topic": "_107", "id": "11532215", "altId": "55328",
                "title": "Cluster-Rasch models for microarray gene expression data."},
            {"topic": "_107", "id": 11690545, "altId": 59472,
                "title": "A simple method for statistical analysis of intensity differences in microarray-derived gene expression data."},
            {"topic": "_107", "id": 11790258, "altId": 64840,
                "title": "Evaluation of normalization procedures for oligonucleotide array data based on spiked cRNA controls."}
        ]
    },
    "paths": {"ft": "demo/pmc/", "ta": "demo/pubmed/"},
    "maxTerms": 40
}"#;

const VOCABULARY: [(&str, &str); 28] = [
    ("microarray", "DEVI"),
    ("gene expression", "PHYS"),
    ("normalization", "PROC"),
    ("statistical analysis", "CONC"),
    ("cDNA", "CHEM"),
    ("oligonucleotide", "CHEM"),
    ("RNA", "CHEM"),
    ("mouse", "LIVB"),
    ("hepatoma", "DISO"),
    ("carcinoma", "DISO"),
    ("liver", "ANAT"),
    ("cell", "ANAT"),
    ("chromatin", "ANAT"),
    ("immunoprecipitation", "PROC"),
    ("polymerase chain reaction", "PROC"),
    ("transcription factor", "GENE"),
    ("HNF-3alpha", "GENE"),
    ("genome", "GENE"),
    ("intensity", "PHEN"),
    ("fluorescence", "PHEN"),
    ("hybridization", "PHEN"),
    ("laboratory", "ORGA"),
    ("researcher", "OCCU"),
    ("software", "OBJC"),
    ("cluster analysis", "CONC"),
    ("Rasch model", "CONC"),
    ("spike-in control", "CHEM"),
    ("data analysis", "ACTI"),
];

pub fn demo_options() -> Result<ViewerOptions, serde_json::Error> {
    ViewerOptions::from_json_str(DEMO_OPTIONS)
}

/// Annotations for every demo article. Both collections derive terms from the title, so
/// the same article shares most concepts across collections; abstracts keep fewer.
pub fn demo_source(options: &ViewerOptions) -> StaticSource {
    let source = StaticSource::new();
    for content in &options.content {
        let Some(path) = options.path_for(&content.label) else {
            continue;
        };
        let abstract_only = path == DEMO_TA_PATH;
        for article in options.articles_for(&content.label) {
            source.insert(
                path,
                article.id.clone(),
                demo_annotations(article, abstract_only),
            );
        }
    }
    source
}

fn demo_annotations(article: &Article, abstract_only: bool) -> LoadedAnnotations {
    let seed = article
        .title
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    let title = article.title.to_lowercase();

    let data = VOCABULARY
        .iter()
        .enumerate()
        .filter(|(idx, (term, _))| {
            title.contains(&term.to_lowercase()) || (seed.wrapping_add(idx * 7)) % 3 == 0
        })
        .filter(|(idx, _)| !abstract_only || idx % 2 == 0)
        .filter_map(|(idx, (term, group))| {
            let group = GroupId::new(group).ok()?;
            let count = 1 + (seed.wrapping_add(idx) % 5) as u32;
            Some(Annotation::new(*term, vec![group], count))
        })
        .collect();

    LoadedAnnotations { data }
}

#[cfg(test)]
mod tests {
    use super::{demo_options, demo_source, DEMO_FT_PATH, DEMO_TA_PATH};
    use crate::model::ArticleId;

    #[test]
    fn demo_options_validate() {
        let options = demo_options().expect("demo options");
        options.validate().expect("valid demo options");
        assert_eq!(options.content.len(), 2);
    }

    #[tokio::test]
    async fn demo_source_serves_every_article() {
        use crate::loader::AnnotationSource;

        let options = demo_options().expect("demo options");
        let source = demo_source(&options);
        let ft = source
            .load(DEMO_FT_PATH, &ArticleId::new("59472").expect("id"))
            .await
            .expect("ft annotations");
        let ta = source
            .load(DEMO_TA_PATH, &ArticleId::new("11690545").expect("id"))
            .await
            .expect("ta annotations");
        assert!(!ft.data.is_empty());
        assert!(ta.data.len() <= ft.data.len());
    }
}
