use super::SourceLoader;
use crate::app::ports::RetrieverPort;
use crate::constants::{
    CACHE_NAME_DELIMITER, GENE_COLUMN, HIT_CALL_PREFIX, HIT_CALL_SOURCE, PLATE_MARKER,
};
use crate::domain::{RemoteFile, TidyTable};
use crate::error::{CoverageError, Result};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-cell-line hit-call CSV files.
pub struct HitCallLoader {
    files: BTreeMap<String, RemoteFile>,
}

impl HitCallLoader {
    pub fn new(files: BTreeMap<String, RemoteFile>) -> Self {
        Self { files }
    }
}

impl SourceLoader for HitCallLoader {
    fn name(&self) -> &str {
        HIT_CALL_SOURCE
    }

    fn load(&self, retriever: &dyn RetrieverPort) -> Result<TidyTable> {
        let mut table = TidyTable::new(HIT_CALL_SOURCE);
        for (key, remote) in &self.files {
            let local = retriever.fetch(remote)?;
            let origin = derive_category(&local);
            if origin == HIT_CALL_PREFIX {
                warn!(
                    "Hit-call file '{}' ({}) yields an empty category token",
                    key,
                    local.display()
                );
            }
            let before = table.len();
            read_genes(&local, &origin, &mut table)?;
            info!("Loaded {} hit calls for {} as {}", table.len() - before, key, origin);
        }
        Ok(table)
    }
}

/// Origin category for a cached hit-call file.
///
/// Mirrors `split_part(split_part(stem, '-', 2), '_pl', 1)`: the cache prefix is
/// dropped at the first `-` and the name is cut at the plate marker, so
/// `5f2309b4-A549_plate_level_hits.csv` becomes `CRISPR_A549`.
pub fn derive_category(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let after_prefix = stem.split(CACHE_NAME_DELIMITER).nth(1).unwrap_or("");
    let token = after_prefix.split(PLATE_MARKER).next().unwrap_or("");
    format!("{}{}", HIT_CALL_PREFIX, token)
}

fn read_genes(path: &Path, origin: &str, table: &mut TidyTable) -> Result<()> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

    let gene_idx = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == GENE_COLUMN)
        .ok_or_else(|| CoverageError::Schema {
            source_name: format!("{} ({})", HIT_CALL_SOURCE, path.display()),
            column: GENE_COLUMN.to_string(),
        })?;

    let mut blank = 0usize;
    for result in reader.records() {
        let record = result?;
        match record.get(gene_idx).map(str::trim) {
            Some(gene) if !gene.is_empty() => table.push(gene, origin),
            _ => blank += 1,
        }
    }
    if blank > 0 {
        debug!("Skipped {} rows without a gene in {}", blank, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn category_is_cut_at_plate_marker() {
        let path = PathBuf::from(
            "/cache/sha256/5f/5f2309b4dbb65377-A549_plate_level_median_per_feat_sig_genes_1_FDR_whole_cell_hits.csv",
        );
        assert_eq!(derive_category(&path), "CRISPR_A549");

        let hela = PathBuf::from("d4f6a715-HeLa_DMEM_plate_level_median_hits.csv");
        assert_eq!(derive_category(&hela), "CRISPR_HeLa_DMEM");
    }

    #[test]
    fn category_without_delimiter_has_empty_token() {
        assert_eq!(derive_category(Path::new("A549_plate_level_hits.csv")), "CRISPR_");
    }

    #[test]
    fn category_without_marker_keeps_whole_segment() {
        assert_eq!(derive_category(Path::new("abc-HeLa.csv")), "CRISPR_HeLa");
    }

    #[test]
    fn reads_gene_column_and_skips_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc-A549_plate.csv");
        fs::write(&path, "score,Gene\n0.5,TP53\n0.1,\n0.9,TP53\n0.2,BRCA1\n").unwrap();

        let mut table = TidyTable::new(HIT_CALL_SOURCE);
        read_genes(&path, "CRISPR_A549", &mut table).unwrap();

        let genes: Vec<&str> = table.records.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(genes, vec!["TP53", "TP53", "BRCA1"]);
        assert!(table.records.iter().all(|r| r.origin == "CRISPR_A549"));
    }

    #[test]
    fn missing_gene_column_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc-A549_plate.csv");
        fs::write(&path, "symbol,score\nTP53,0.5\n").unwrap();

        let mut table = TidyTable::new(HIT_CALL_SOURCE);
        let err = read_genes(&path, "CRISPR_A549", &mut table).unwrap_err();
        assert!(matches!(err, CoverageError::Schema { column, .. } if column == "Gene"));
    }
}
