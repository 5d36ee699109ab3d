use super::SourceLoader;
use crate::app::ports::RetrieverPort;
use crate::constants::{ANNOTATION_SOURCE, GENE_COLUMN, LACOSTE_ORIGIN};
use crate::domain::{RemoteFile, TidyTable};
use crate::error::{CoverageError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::BTreeSet;
use tracing::info;

/// Curated gene annotations spreadsheet.
pub struct AnnotationLoader {
    file: RemoteFile,
}

impl AnnotationLoader {
    pub fn new(file: RemoteFile) -> Self {
        Self { file }
    }
}

impl SourceLoader for AnnotationLoader {
    fn name(&self) -> &str {
        ANNOTATION_SOURCE
    }

    fn load(&self, retriever: &dyn RetrieverPort) -> Result<TidyTable> {
        let local = retriever.fetch(&self.file)?;
        let mut workbook = open_workbook_auto(&local)?;
        let range = workbook.worksheet_range_at(0).ok_or_else(|| CoverageError::Schema {
            source_name: ANNOTATION_SOURCE.to_string(),
            column: "first worksheet".to_string(),
        })??;

        let genes = distinct_genes(&range)?;
        info!("Loaded {} distinct annotated genes from {}", genes.len(), local.display());

        let mut table = TidyTable::new(ANNOTATION_SOURCE);
        for gene in genes {
            table.push(gene, LACOSTE_ORIGIN);
        }
        Ok(table)
    }
}

/// Distinct non-empty values of the `Gene` column, every cell read as text.
/// The first row is the header.
pub fn distinct_genes(range: &Range<Data>) -> Result<BTreeSet<String>> {
    let mut rows = range.rows();
    let header = rows.next().unwrap_or(&[]);
    let gene_idx = header
        .iter()
        .position(|cell| cell.to_string().trim() == GENE_COLUMN)
        .ok_or_else(|| CoverageError::Schema {
            source_name: ANNOTATION_SOURCE.to_string(),
            column: GENE_COLUMN.to_string(),
        })?;

    let genes = rows
        .filter_map(|row| row.get(gene_idx))
        .map(|cell| cell.to_string().trim().to_string())
        .filter(|gene| !gene.is_empty())
        .collect();
    Ok(genes)
}
