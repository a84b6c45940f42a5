pub mod lichess;
pub mod puzzle_file;

use chess_puzzler::{PuzzleDefinition, PuzzleRequest, PuzzleSource, SourceError};

use crate::config::{Config, SourceKind};

/// The puzzle source picked by configuration.
pub enum GateSource {
    Lichess(lichess::LichessClient),
    File(puzzle_file::PuzzleFile),
}

impl GateSource {
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        match &config.source {
            SourceKind::Lichess => Ok(GateSource::Lichess(lichess::LichessClient::new(
                &config.lichess_base_url,
                config.lichess_timeout,
            )?)),
            SourceKind::File(path) => Ok(GateSource::File(puzzle_file::PuzzleFile::load(path)?)),
        }
    }
}

impl PuzzleSource for GateSource {
    async fn fetch_puzzle(&self, request: &PuzzleRequest) -> Result<PuzzleDefinition, SourceError> {
        match self {
            GateSource::Lichess(client) => client.fetch_puzzle(request).await,
            GateSource::File(file) => file.fetch_puzzle(request).await,
        }
    }
}
