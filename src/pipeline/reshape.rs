use crate::domain::TidyTable;
use std::collections::{BTreeMap, HashMap};

/// One source pivoted to wide form: a row per distinct gene, a count column per origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    source: String,
    origins: Vec<String>,
    rows: BTreeMap<String, Vec<u32>>,
}

impl WideTable {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Origin columns in first-seen order.
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.rows.iter().map(|(g, counts)| (g.as_str(), counts.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Pivot tidy records on origin, counting repeated `(gene, origin)` pairs.
pub fn pivot(tidy: &TidyTable) -> WideTable {
    let mut origins: Vec<String> = Vec::new();
    let mut column_of: HashMap<&str, usize> = HashMap::new();
    for record in &tidy.records {
        if !column_of.contains_key(record.origin.as_str()) {
            column_of.insert(record.origin.as_str(), origins.len());
            origins.push(record.origin.clone());
        }
    }

    let mut rows: BTreeMap<String, Vec<u32>> = BTreeMap::new();
    for record in &tidy.records {
        let col = column_of[record.origin.as_str()];
        let counts = rows
            .entry(record.gene.clone())
            .or_insert_with(|| vec![0; origins.len()]);
        counts[col] += 1;
    }

    WideTable {
        source: tidy.source.clone(),
        origins,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tidy(source: &str, pairs: &[(&str, &str)]) -> TidyTable {
        let mut table = TidyTable::new(source);
        for (gene, origin) in pairs {
            table.push(*gene, *origin);
        }
        table
    }

    #[test]
    fn repeated_pair_counts_twice() {
        let wide = pivot(&tidy("jump", &[("TP53", "ORF_JUMP"), ("TP53", "ORF_JUMP")]));
        assert_eq!(wide.rows().collect::<Vec<_>>(), vec![("TP53", &[2][..])]);
        assert_eq!(wide.len(), 1);
    }

    #[test]
    fn absent_pair_is_zero_within_the_table() {
        let wide = pivot(&tidy(
            "jump",
            &[("X1", "ORF_JUMP"), ("X2", "CRISPR_JUMP")],
        ));
        assert_eq!(wide.origins(), ["ORF_JUMP", "CRISPR_JUMP"]);
        assert_eq!(
            wide.rows().collect::<Vec<_>>(),
            vec![("X1", &[1, 0][..]), ("X2", &[0, 1][..])]
        );
    }

    #[test]
    fn columns_follow_first_seen_order() {
        let wide = pivot(&tidy(
            "jump",
            &[("B", "ORF_JUMP"), ("A", "CRISPR_JUMP"), ("C", "ORF_JUMP")],
        ));
        assert_eq!(wide.origins(), ["ORF_JUMP", "CRISPR_JUMP"]);
        assert_eq!(wide.rows().map(|(gene, _)| gene).collect::<Vec<_>>(), vec!["A", "B", "C"]);
        assert_eq!(wide.source(), "jump");
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let wide = pivot(&TidyTable::new("empty"));
        assert!(wide.is_empty());
        assert!(wide.origins().is_empty());
    }
}
