//! Source loaders: each turns one kind of remote input into tidy `(gene, origin)` records.

pub mod annotations;
pub mod hit_calls;
pub mod mapping_db;

use crate::app::ports::RetrieverPort;
use crate::config::Config;
use crate::domain::TidyTable;
use crate::error::Result;

pub use annotations::AnnotationLoader;
pub use hit_calls::HitCallLoader;
pub use mapping_db::MappingDbLoader;

pub trait SourceLoader {
    /// Name used in logs and to attribute origin columns.
    fn name(&self) -> &str;

    fn load(&self, retriever: &dyn RetrieverPort) -> Result<TidyTable>;
}

/// The three sources of the coverage table, in join order.
pub fn default_loaders(config: &Config) -> Vec<Box<dyn SourceLoader>> {
    vec![
        Box::new(HitCallLoader::new(config.hit_calls.clone())),
        Box::new(MappingDbLoader::new(config.mapping_db.clone())),
        Box::new(AnnotationLoader::new(config.annotations.clone())),
    ]
}
