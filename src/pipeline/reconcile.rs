use super::reshape::WideTable;
use crate::constants::GENE_COLUMN;
use crate::error::{CoverageError, Result};
use std::collections::{BTreeMap, HashMap};

/// The final gene x origin table. Rows are keyed and ordered by gene
/// (byte-wise), and every cell holds a count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageTable {
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<u32>>,
}

impl CoverageTable {
    pub(crate) fn from_parts(columns: Vec<String>, rows: BTreeMap<String, Vec<u32>>) -> Self {
        Self { columns, rows }
    }

    /// Origin columns, without the leading `Gene` key column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.rows.iter().map(|(g, counts)| (g.as_str(), counts.as_slice()))
    }

    pub fn row(&self, gene: &str) -> Option<&[u32]> {
        self.rows.get(gene).map(Vec::as_slice)
    }

    pub fn get(&self, gene: &str, origin: &str) -> Option<u32> {
        let col = self.columns.iter().position(|c| c == origin)?;
        self.row(gene).map(|counts| counts[col])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Result of one or more outer joins, before missing cells are filled.
#[derive(Debug, Default)]
struct JoinedTable {
    columns: Vec<String>,
    owners: HashMap<String, String>,
    rows: BTreeMap<String, Vec<Option<u32>>>,
}

impl JoinedTable {
    fn full_outer_join(mut self, right: &WideTable) -> Result<Self> {
        for origin in right.origins() {
            if origin == GENE_COLUMN {
                return Err(CoverageError::OriginCollision {
                    origin: origin.clone(),
                    first: GENE_COLUMN.to_string(),
                    second: right.source().to_string(),
                });
            }
            if let Some(first) = self.owners.get(origin) {
                return Err(CoverageError::OriginCollision {
                    origin: origin.clone(),
                    first: first.clone(),
                    second: right.source().to_string(),
                });
            }
        }

        let left_width = self.columns.len();
        let right_width = right.origins().len();
        for origin in right.origins() {
            self.owners.insert(origin.clone(), right.source().to_string());
            self.columns.push(origin.clone());
        }

        // Left-only genes get empty right cells
        for cells in self.rows.values_mut() {
            cells.resize(left_width + right_width, None);
        }
        for (gene, counts) in right.rows() {
            let cells = self
                .rows
                .entry(gene.to_string())
                .or_insert_with(|| vec![None; left_width + right_width]);
            for (i, count) in counts.iter().enumerate() {
                cells[left_width + i] = Some(*count);
            }
        }
        Ok(self)
    }

    fn coalesce(self) -> CoverageTable {
        let rows = self
            .rows
            .into_iter()
            .map(|(gene, cells)| (gene, cells.into_iter().map(|c| c.unwrap_or(0)).collect()))
            .collect();
        CoverageTable::from_parts(self.columns, rows)
    }
}

/// Full outer join of `tables` on gene, in order, with missing cells set to 0.
///
/// Fails when two tables produce the same origin column.
pub fn reconcile(tables: &[WideTable]) -> Result<CoverageTable> {
    let joined = tables
        .iter()
        .try_fold(JoinedTable::default(), |acc, table| acc.full_outer_join(table))?;
    Ok(joined.coalesce())
}
