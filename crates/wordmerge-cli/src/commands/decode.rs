use std::io::{BufRead, Write};

use wordmerge::{Tokenizer, TokenizerOptions, types::TokenId};

use crate::{
    LogArgs,
    commands::tokenize::VocabArgs,
    input_output::{InputArgs, OutputArgs, for_each_line},
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = self.vocab.load_tokenizer(TokenizerOptions::default())?;
        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_decode(&tokenizer, &mut reader, &mut writer)
    }
}

/// Decode each line of whitespace separated ids to one line of text.
fn run_decode(
    tokenizer: &Tokenizer,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for_each_line(reader, |line| {
        let ids = line
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<TokenId>, _>>()?;

        writeln!(writer, "{}", tokenizer.decode(&ids)?)?;
        Ok(())
    })?;
    writer.flush()?;
    Ok(())
}
