use std::io::{BufRead, Write};

use wordmerge::{Tokenizer, TokenizerOptions, encoders::EncoderKind, vocab::io::load_json_vocab_path};

use crate::{
    LogArgs,
    input_output::{InputArgs, OutputArgs, for_each_line},
};

/// Span encoder choices.
#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
pub enum EncoderArg {
    /// Merge the best available pair, repeatedly.
    #[default]
    Scan,

    /// Replay every merge rule in order.
    Replay,
}

impl From<EncoderArg> for EncoderKind {
    fn from(value: EncoderArg) -> Self {
        match value {
            EncoderArg::Scan => EncoderKind::Scan,
            EncoderArg::Replay => EncoderKind::Replay,
        }
    }
}

/// Vocabulary path arg group.
#[derive(clap::Args, Debug)]
pub struct VocabArgs {
    /// Path to a trained vocabulary (JSON).
    #[arg(long)]
    pub vocab: String,
}

impl VocabArgs {
    /// Load the vocabulary and build a [`Tokenizer`].
    pub fn load_tokenizer(
        &self,
        options: TokenizerOptions,
    ) -> Result<Tokenizer, Box<dyn std::error::Error>> {
        log::info!("Loading vocabulary: {}", self.vocab);
        let vocab = load_json_vocab_path(&self.vocab)?;
        log::info!(
            "{} merges; {} symbols",
            vocab.merges().len(),
            vocab.num_symbols()
        );

        Ok(options.build(vocab.into())?)
    }
}

/// Args for the tokenize command.
#[derive(clap::Args, Debug)]
pub struct TokenizeArgs {
    #[command(flatten)]
    vocab: VocabArgs,

    /// Span encoder.
    #[arg(long, value_enum, default_value_t = EncoderArg::default())]
    encoder: EncoderArg,

    /// Print token ids instead of token strings.
    #[arg(long)]
    ids: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl TokenizeArgs {
    /// Run the tokenize command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let options = TokenizerOptions::default().with_encoder(self.encoder.into());
        let tokenizer = self.vocab.load_tokenizer(options)?;
        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        run_tokenize(&tokenizer, self.ids, &mut reader, &mut writer)
    }
}

/// Write each input line's tokens (or ids), space separated, one line each.
fn run_tokenize(
    tokenizer: &Tokenizer,
    ids: bool,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for_each_line(reader, |line| {
        let out = if ids {
            tokenizer
                .encode(line)
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            tokenizer.tokenize(line).join(" ")
        };
        writeln!(writer, "{out}")?;
        Ok(())
    })?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use wordmerge::create_vocab_and_tokenization;

    use super::*;

    fn test_tokenizer() -> Tokenizer {
        let results = create_vocab_and_tokenization("low lower lowest", 2, true).unwrap();
        Tokenizer::new(results.vocab).unwrap()
    }

    #[test]
    fn test_run_tokenize() {
        let tokenizer = test_tokenizer();

        let mut reader: &[u8] = b"Lower\nlow low\n";
        let mut out: Vec<u8> = Vec::new();
        run_tokenize(&tokenizer, false, &mut reader, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "low e r </w>\nlow </w> low </w>\n"
        );
    }

    #[test]
    fn test_run_tokenize_ids() {
        let tokenizer = test_tokenizer();
        let vocab = tokenizer.vocab().clone();

        let mut reader: &[u8] = b"low";
        let mut out: Vec<u8> = Vec::new();
        run_tokenize(&tokenizer, true, &mut reader, &mut out).unwrap();

        let expected = format!(
            "{} {}\n",
            vocab.token_id("low").unwrap(),
            vocab.token_id("</w>").unwrap()
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
