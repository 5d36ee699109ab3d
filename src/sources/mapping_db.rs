use super::SourceLoader;
use crate::app::ports::RetrieverPort;
use crate::constants::{
    MAPPING_DB_GENE_COLUMN, MAPPING_DB_PLATE_TYPES, MAPPING_DB_SOURCE, MAPPING_DB_SUFFIX,
    MAPPING_DB_TABLE, MAPPING_DB_TYPE_COLUMN,
};
use crate::domain::{RemoteFile, TidyTable};
use crate::error::{CoverageError, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

/// JUMP identifier mapping database (SQLite).
pub struct MappingDbLoader {
    file: RemoteFile,
}

impl MappingDbLoader {
    pub fn new(file: RemoteFile) -> Self {
        Self { file }
    }
}

impl SourceLoader for MappingDbLoader {
    fn name(&self) -> &str {
        MAPPING_DB_SOURCE
    }

    fn load(&self, retriever: &dyn RetrieverPort) -> Result<TidyTable> {
        let local = retriever.fetch(&self.file)?;
        let table = read_mapping_db(&local)?;
        info!("Loaded {} mapping rows from {}", table.len(), local.display());
        Ok(table)
    }
}

pub fn read_mapping_db(path: &Path) -> Result<TidyTable> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    check_columns(&conn)?;

    let sql = format!(
        "SELECT {gene}, {ty} FROM {table} WHERE lower({ty}) IN (?1, ?2)",
        gene = MAPPING_DB_GENE_COLUMN,
        ty = MAPPING_DB_TYPE_COLUMN,
        table = MAPPING_DB_TABLE,
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params![MAPPING_DB_PLATE_TYPES[0], MAPPING_DB_PLATE_TYPES[1]])?;

    let mut table = TidyTable::new(MAPPING_DB_SOURCE);
    let mut null_keys = 0usize;
    while let Some(row) = rows.next()? {
        let gene: Option<String> = row.get(0)?;
        let plate_type: String = row.get(1)?;
        match gene {
            Some(g) => table.push(g, format!("{}{}", plate_type.to_uppercase(), MAPPING_DB_SUFFIX)),
            None => null_keys += 1,
        }
    }
    if null_keys > 0 {
        debug!("Skipped {} mapping rows with a NULL {}", null_keys, MAPPING_DB_GENE_COLUMN);
    }
    Ok(table)
}

fn check_columns(conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", MAPPING_DB_TABLE))?;
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<_, _>>()?;

    for required in [MAPPING_DB_GENE_COLUMN, MAPPING_DB_TYPE_COLUMN] {
        if !columns.iter().any(|c| c == required) {
            return Err(CoverageError::Schema {
                source_name: MAPPING_DB_SOURCE.to_string(),
                column: format!("{}.{}", MAPPING_DB_TABLE, required),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_db(path: &Path, rows: &[(Option<&str>, &str)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE babel (JCP2022 TEXT, standard_key TEXT, plate_type TEXT);",
        )
        .unwrap();
        for (i, (key, ty)) in rows.iter().enumerate() {
            conn.execute(
                "INSERT INTO babel (JCP2022, standard_key, plate_type) VALUES (?1, ?2, ?3)",
                params![format!("JCP2022_{:06}", i), key, ty],
            )
            .unwrap();
        }
    }

    #[test]
    fn selects_recognized_plate_types_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("babel");
        build_db(
            &path,
            &[
                (Some("TP53"), "orf"),
                (Some("TP53"), "crispr"),
                (Some("BRCA1"), "CRISPR"),
                (Some("aspirin"), "compound"),
                (None, "orf"),
            ],
        );

        let table = read_mapping_db(&path).unwrap();
        let pairs: Vec<(&str, &str)> = table
            .records
            .iter()
            .map(|r| (r.gene.as_str(), r.origin.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("TP53", "ORF_JUMP"),
                ("TP53", "CRISPR_JUMP"),
                ("BRCA1", "CRISPR_JUMP"),
            ]
        );
    }

    #[test]
    fn missing_plate_type_column_is_a_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("babel");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE babel (standard_key TEXT);").unwrap();
        drop(conn);

        let err = read_mapping_db(&path).unwrap_err();
        assert!(matches!(err, CoverageError::Schema { column, .. } if column == "babel.plate_type"));
    }
}
