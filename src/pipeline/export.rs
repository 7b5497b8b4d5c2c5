// src/pipeline/export.rs

//! Markdown digest of the success mapping.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::models::PosterRecord;
use crate::storage::CatalogStorage;

/// Render all records as markdown blocks, in mapping iteration order.
pub fn render_markdown(records: &BTreeMap<String, PosterRecord>) -> String {
    let mut out = String::new();
    for record in records.values() {
        let _ = writeln!(out, "## {}", record.title);
        let _ = writeln!(out, "**Author**: {}\n", record.author);
        let _ = writeln!(out, "**Abstract**: {}\n", record.abstract_text);
        if let Some(translated) = &record.abstract_translated {
            let _ = writeln!(out, "**Abstract(Chinese)**: {translated}\n");
        }
        let _ = writeln!(out, "**URL**: {}\n", record.url);
        out.push_str("---\n\n");
    }
    out
}

/// Load the success mapping, render it, and write the digest file.
/// Returns the number of exported records.
pub async fn run_export(storage: &dyn CatalogStorage, path: &Path) -> Result<usize> {
    let records = storage.load_records().await?;
    let markdown = render_markdown(&records);
    tokio::fs::write(path, markdown).await?;

    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PathsConfig;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_single_block_format() {
        let mut records = BTreeMap::new();
        records.insert(
            "Paper A#00000000".to_string(),
            PosterRecord {
                title: "Paper A".to_string(),
                author: "X".to_string(),
                abstract_text: "Y".to_string(),
                abstract_translated: Some("Z".to_string()),
                url: "U".to_string(),
            },
        );

        let expected = "## Paper A\n\
                        **Author**: X\n\
                        \n\
                        **Abstract**: Y\n\
                        \n\
                        **Abstract(Chinese)**: Z\n\
                        \n\
                        **URL**: U\n\
                        \n\
                        ---\n\
                        \n";
        assert_eq!(render_markdown(&records), expected);
    }

    #[test]
    fn test_untranslated_record_omits_chinese_line() {
        let mut records = BTreeMap::new();
        records.insert(
            "Paper B#00000000".to_string(),
            PosterRecord {
                title: "Paper B".to_string(),
                author: "X".to_string(),
                abstract_text: "Y".to_string(),
                abstract_translated: None,
                url: "U".to_string(),
            },
        );

        let rendered = render_markdown(&records);
        assert!(!rendered.contains("Abstract(Chinese)"));
        assert!(rendered.ends_with("---\n\n"));
    }

    #[test]
    fn test_blocks_follow_mapping_order() {
        let mut records = BTreeMap::new();
        for title in ["B Paper", "A Paper"] {
            records.insert(
                format!("{title}#00000000"),
                PosterRecord {
                    title: title.to_string(),
                    author: "X".to_string(),
                    abstract_text: "Y".to_string(),
                    abstract_translated: None,
                    url: "U".to_string(),
                },
            );
        }

        let rendered = render_markdown(&records);
        let a = rendered.find("## A Paper").unwrap();
        let b = rendered.find("## B Paper").unwrap();
        assert!(a < b);
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path(), PathsConfig::default());

        let mut records = BTreeMap::new();
        records.insert(
            "Paper A#00000000".to_string(),
            PosterRecord {
                title: "Paper A".to_string(),
                author: "X".to_string(),
                abstract_text: "Y".to_string(),
                abstract_translated: None,
                url: "U".to_string(),
            },
        );
        storage.save_records(&records).await.unwrap();

        let count = run_export(&storage, &storage.markdown_path()).await.unwrap();
        assert_eq!(count, 1);

        let written = tokio::fs::read_to_string(storage.markdown_path())
            .await
            .unwrap();
        assert!(written.starts_with("## Paper A\n"));
    }
}
