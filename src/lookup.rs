//! Read side of the coverage table: which datasets cover a given gene.

use crate::pipeline::CoverageTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneCoverage {
    pub gene: String,
    pub found: bool,
    /// Non-zero cells only.
    pub datasets: BTreeMap<String, u32>,
}

pub fn lookup(table: &CoverageTable, genes: &[String]) -> Vec<GeneCoverage> {
    genes
        .iter()
        .map(|gene| match table.row(gene) {
            Some(counts) => GeneCoverage {
                gene: gene.clone(),
                found: true,
                datasets: table
                    .columns()
                    .iter()
                    .zip(counts)
                    .filter(|(_, n)| **n > 0)
                    .map(|(col, n)| (col.clone(), *n))
                    .collect(),
            },
            None => GeneCoverage {
                gene: gene.clone(),
                found: false,
                datasets: BTreeMap::new(),
            },
        })
        .collect()
}
