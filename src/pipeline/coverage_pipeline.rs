use super::output::write_table;
use super::reconcile::reconcile;
use super::reshape::{pivot, WideTable};
use crate::app::ports::RetrieverPort;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::CacheGateway;
use crate::infra::http_client::ReqwestHttp;
use crate::sources::{default_loaders, SourceLoader};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;

/// Loads every source, pivots, reconciles and writes the coverage table.
pub struct CoveragePipeline {
    loaders: Vec<Box<dyn SourceLoader>>,
    retriever: Box<dyn RetrieverPort>,
    output: PathBuf,
}

impl CoveragePipeline {
    pub fn new(
        loaders: Vec<Box<dyn SourceLoader>>,
        retriever: Box<dyn RetrieverPort>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            loaders,
            retriever,
            output: output.into(),
        }
    }

    /// Production wiring: reqwest behind a local download cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let http = ReqwestHttp::new(config.http_timeout_secs)?;
        let gateway = CacheGateway::new(config.cache_dir.clone(), Box::new(http));
        Ok(Self::new(default_loaders(config), Box::new(gateway), config.output.clone()))
    }

    pub fn run(&self) -> Result<CoverageReport> {
        let started_at = Utc::now();
        info!(
            "Building coverage table from {} sources into {}",
            self.loaders.len(),
            self.output.display()
        );

        let mut wide_tables: Vec<WideTable> = Vec::with_capacity(self.loaders.len());
        let mut sources = Vec::with_capacity(self.loaders.len());
        for loader in &self.loaders {
            let span = tracing::info_span!("source", name = %loader.name());
            let _enter = span.enter();

            let tidy = loader.load(self.retriever.as_ref())?;
            let wide = pivot(&tidy);
            info!(
                "{} records -> {} genes x {} origins",
                tidy.len(),
                wide.len(),
                wide.origins().len()
            );
            sources.push(SourceSummary {
                name: loader.name().to_string(),
                records: tidy.len(),
                genes: wide.len(),
                origins: wide.origins().to_vec(),
            });
            wide_tables.push(wide);
        }

        let table = reconcile(&wide_tables)?;
        write_table(&table, &self.output)?;
        info!(
            "Wrote {} genes x {} columns to {}",
            table.len(),
            table.columns().len() + 1,
            self.output.display()
        );

        Ok(CoverageReport {
            output: self.output.clone(),
            genes: table.len(),
            columns: table.columns().to_vec(),
            sources,
            started_at,
            completed_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub name: String,
    pub records: usize,
    pub genes: usize,
    pub origins: Vec<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub output: PathBuf,
    pub genes: usize,
    pub columns: Vec<String>,
    pub sources: Vec<SourceSummary>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CoverageReport {
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}
