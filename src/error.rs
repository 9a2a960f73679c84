use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the audio layer.  The bank logs these and degrades to silence;
/// none of them reach the simulation.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound asset `{name}` not found in {}", .dir.display())]
    MissingAsset { name: String, dir: PathBuf },
    #[error("cannot read sound directory {}: {source}", .dir.display())]
    AssetDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}
