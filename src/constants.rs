/// Source locations, hashes and labels used to build the coverage table.
/// These are the embedded defaults; a TOML config can override the remote files.

// Column holding the gene identifier in every tabular source and in the output
pub const GENE_COLUMN: &str = "Gene";

// Hit-call (PERISCOPE) files
pub const HIT_CALL_SOURCE: &str = "hit_calls";
pub const HIT_CALL_PREFIX: &str = "CRISPR_";
pub const CACHE_NAME_DELIMITER: char = '-';
pub const PLATE_MARKER: &str = "_pl";

pub const PERISCOPE_A549_URL: &str = "https://raw.githubusercontent.com/broadinstitute/2022_PERISCOPE//632557b77361777b5b728a7534ed8e9d9ed6c090/4_A549_Screen_Summary/outputs/A549_plate_level_median_per_feat_sig_genes_1_FDR_whole_cell_hits.csv";
pub const PERISCOPE_A549_SHA256: &str =
    "5f2309b4dbb65377dd756ac8bb94a4b8eae70cfb8bc7edd023c06eb6a9392b6b";
pub const PERISCOPE_HELA_DMEM_URL: &str = "https://raw.githubusercontent.com/broadinstitute/2022_PERISCOPE/632557b77361777b5b728a7534ed8e9d9ed6c090/2_HeLa_Screens_Summary/outputs/HeLa_DMEM_plate_level_median_per_feat_sig_genes_1_FDR_whole_cell_hits.csv";
pub const PERISCOPE_HELA_DMEM_SHA256: &str =
    "d4f6a715364749fb01759c078e254d80c4e514fee853edc36af81a0fa36f974c";
pub const PERISCOPE_HELA_HPLM_URL: &str = "https://raw.githubusercontent.com/broadinstitute/2022_PERISCOPE/632557b77361777b5b728a7534ed8e9d9ed6c090/2_HeLa_Screens_Summary/outputs/HeLa_HPLM_plate_level_median_per_feat_sig_genes_1_FDR_whole_cell_hits.csv";
pub const PERISCOPE_HELA_HPLM_SHA256: &str =
    "b5508c768960c1ace5106824eaf8704fc1529b5a2f4154949247c7ec514b5922";

// JUMP mapping database (babel)
pub const MAPPING_DB_SOURCE: &str = "mapping_db";
pub const MAPPING_DB_URL: &str = "https://zenodo.org/api/records/13255965/files/babel.db/content";
pub const MAPPING_DB_SHA256: &str =
    "72180e7889c6c0c66a12e976c0645b5b3d873f77fc00ce106ede70c9fba1bfa7";
pub const MAPPING_DB_FILE_NAME: &str = "babel";
pub const MAPPING_DB_TABLE: &str = "babel";
pub const MAPPING_DB_GENE_COLUMN: &str = "standard_key";
pub const MAPPING_DB_TYPE_COLUMN: &str = "plate_type";
pub const MAPPING_DB_PLATE_TYPES: [&str; 2] = ["orf", "crispr"];
pub const MAPPING_DB_SUFFIX: &str = "_JUMP";

// Lacoste curated annotations
pub const ANNOTATION_SOURCE: &str = "annotations";
pub const LACOSTE_URL: &str = "https://cellpainting-gallery.s3.amazonaws.com/cpg0026-lacoste_haghighi-rare-diseases/broad/workspace/metadata/raw/RC4_IF_standardized_annotations_20180813.xlsx";
pub const LACOSTE_SHA256: &str =
    "26ed9fa3b4e8dec9b1f44ffc1c6ce7887ad2df1285298ecad5ee3be10a474563";
pub const LACOSTE_ORIGIN: &str = "ORF_Lacoste";

// Local paths
pub const DEFAULT_CACHE_DIR: &str = "data/cache";
pub const DEFAULT_OUTPUT: &str = "table.csv";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

pub const USER_AGENT: &str = concat!("gene-coverage/", env!("CARGO_PKG_VERSION"));
