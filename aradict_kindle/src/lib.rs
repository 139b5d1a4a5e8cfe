// aradict_kindle — file formats around the morphological dictionary core.
//
// Reads the Buckwalter analyzer tables and frequency lists, hands them to
// `aradict_morph`, and writes the resulting entries as a Kindle dictionary
// (OPF package + mobipocket HTML pages). The `kindlearadict` binary wires
// these together.
//
// Module overview:
// - `tables.rs`:    Morpheme and compatibility table readers, `load_context`.
// - `freq_list.rs`: Frequency list reader, builds the AcceptFilter.
// - `opf.rs`:       KindleWriter — paginated entries and the OPF manifest.
// - `config.rs`:    DictConfig — book metadata, writer limits, input names.
// - `error.rs`:     KindleError.
// - `main.rs`:      CLI entry point.

pub mod config;
pub mod error;
pub mod freq_list;
pub mod opf;
pub mod tables;

pub use config::{BookMetadata, DictConfig, InputFiles, WriterLimits};
pub use error::KindleError;
pub use opf::{KindleWriter, WriterStats, write_dictionary};
