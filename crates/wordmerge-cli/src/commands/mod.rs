use crate::commands::{decode::DecodeArgs, tokenize::TokenizeArgs, train::TrainArgs};

pub mod decode;
pub mod tokenize;
pub mod train;

/// Subcommands for wordmerge.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a vocabulary over corpus files.
    Train(TrainArgs),

    /// Tokenize text, one line at a time.
    Tokenize(TokenizeArgs),

    /// Decode lines of token ids back to text.
    Decode(DecodeArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Tokenize(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
        }
    }
}
