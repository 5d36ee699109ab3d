use super::reconcile::CoverageTable;
use crate::constants::GENE_COLUMN;
use crate::error::{CoverageError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Serialize as CSV: `Gene` header first, one row per gene.
pub fn write_csv<W: Write>(table: &CoverageTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(GENE_COLUMN);
    header.extend(table.columns().iter().map(String::as_str));
    wtr.write_record(&header)?;

    for (gene, counts) in table.rows() {
        let mut record = Vec::with_capacity(counts.len() + 1);
        record.push(gene.to_string());
        record.extend(counts.iter().map(u32::to_string));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the table to `path` in one step: a temporary sibling file is filled
/// and then renamed, so an existing table is only replaced by a complete one.
pub fn write_table(table: &CoverageTable, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    write_csv(table, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<CoverageTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.get(0) != Some(GENE_COLUMN) {
        return Err(CoverageError::Schema {
            source_name: "coverage table".to_string(),
            column: GENE_COLUMN.to_string(),
        });
    }
    let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = BTreeMap::new();
    for result in rdr.records() {
        let record = result?;
        let gene = record.get(0).unwrap_or("").to_string();
        let counts = record
            .iter()
            .skip(1)
            .map(|cell| {
                cell.trim().parse::<u32>().map_err(|_| {
                    CoverageError::Config(format!(
                        "coverage table has a non-integer cell '{}' for gene '{}'",
                        cell, gene
                    ))
                })
            })
            .collect::<Result<Vec<u32>>>()?;
        rows.insert(gene, counts);
    }
    Ok(CoverageTable::from_parts(columns, rows))
}

pub fn read_table(path: &Path) -> Result<CoverageTable> {
    read_csv(File::open(path)?)
}
