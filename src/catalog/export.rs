//! Flattened CSV projection of a corpus

use log::info;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::catalog::corpus::Corpus;
use crate::catalog::types::{CatalogError, CatalogResult, Criterion, RepositoryRecord};

/// Delimiter for set-valued columns
pub const LIST_DELIMITER: &str = "; ";

/// One CSV row. Nested fields are flattened to scalars.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: Option<u64>,
    name: &'a str,
    full_name: &'a str,
    description: &'a str,
    html_url: &'a str,
    language: &'a str,
    topics: String,
    generated_tags: String,
    all_tags: String,
    visibility: &'a str,
    created_at: &'a str,
    updated_at: &'a str,
    pushed_at: &'a str,
    size: u64,
    stargazers_count: u32,
    forks_count: u32,
    open_issues_count: u32,
    archived: bool,
    disabled: bool,
    has_readme: Option<bool>,
    license: &'a str,
    owner_login: &'a str,
    owner_type: &'a str,
    quality_score: Option<u32>,
    featured: Option<bool>,
    featured_score: Option<u32>,
    missing_criteria: String,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a RepositoryRecord) -> Self {
        let verdict = record.featured.as_ref().and_then(|f| f.verdict());
        let owner = record.owner.as_ref();

        Self {
            id: record.id,
            name: record.name.as_deref().unwrap_or_default(),
            full_name: record.full_name.as_deref().unwrap_or_default(),
            description: record.description.as_deref().unwrap_or_default(),
            html_url: record.html_url.as_deref().unwrap_or_default(),
            language: record.language.as_deref().unwrap_or_default(),
            topics: record.topics.join(LIST_DELIMITER),
            generated_tags: join(record.generated_tags.as_deref()),
            all_tags: join(record.all_tags.as_deref()),
            visibility: record.visibility.map_or("", |v| v.as_str()),
            created_at: record.created_at.as_deref().unwrap_or_default(),
            updated_at: record.updated_at.as_deref().unwrap_or_default(),
            pushed_at: record.pushed_at.as_deref().unwrap_or_default(),
            size: record.size,
            stargazers_count: record.stargazers_count,
            forks_count: record.forks_count,
            open_issues_count: record.open_issues_count,
            archived: record.archived,
            disabled: record.disabled,
            has_readme: record.has_readme,
            license: record
                .license
                .as_ref()
                .and_then(|l| l.display_name())
                .unwrap_or_default(),
            owner_login: owner.map_or("", |o| o.login.as_str()),
            owner_type: owner.and_then(|o| o.kind.as_deref()).unwrap_or_default(),
            quality_score: record.quality_score,
            featured: record.featured.as_ref().map(|f| f.is_featured()),
            featured_score: verdict.map(|v| v.score),
            missing_criteria: verdict
                .map(|v| {
                    v.missing_criteria
                        .iter()
                        .map(Criterion::as_str)
                        .collect::<Vec<_>>()
                        .join(LIST_DELIMITER)
                })
                .unwrap_or_default(),
        }
    }
}

fn join(tags: Option<&[String]>) -> String {
    tags.unwrap_or_default().join(LIST_DELIMITER)
}

/// Writes one row per typed record. Raw entries are skipped.
pub fn write_csv<W: Write>(corpus: &Corpus, writer: W) -> CatalogResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;
    for record in corpus.records() {
        csv_writer.serialize(CsvRow::from_record(record))?;
        rows += 1;
    }
    csv_writer
        .flush()
        .map_err(|e| CatalogError::Csv(csv::Error::from(e)))?;
    Ok(rows)
}

pub fn export_csv(corpus: &Corpus, path: &Path) -> CatalogResult<usize> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
    }
    let file = std::fs::File::create(path).map_err(|e| CatalogError::io(path, e))?;
    let rows = write_csv(corpus, file)?;
    info!("Exported {rows} rows to {}", path.display());
    Ok(rows)
}
