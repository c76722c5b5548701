use std::{io::BufReader, sync::Arc};

use wordmerge::{
    BpeVocab,
    VocabOptions,
    merge_budget,
    training::{BpeTrainer, BpeTrainerOptions},
    vocab::{EndOfWordMode, SplitMode, io::write_json_vocab},
};

use crate::{
    LogArgs,
    input_output::{OutputArgs, for_each_line},
};

/// Word split modes.
#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
pub enum SplitArg {
    /// Split on whitespace.
    #[default]
    Whitespace,

    /// Split into word and punctuation runs.
    WordPunct,
}

impl From<SplitArg> for SplitMode {
    fn from(value: SplitArg) -> Self {
        match value {
            SplitArg::Whitespace => SplitMode::Whitespace,
            SplitArg::WordPunct => SplitMode::WordPunct,
        }
    }
}

/// End-of-word token modes.
#[derive(Debug, Default, Clone, Copy, clap::ValueEnum)]
pub enum EowModeArg {
    /// Keep the marker on tokens.
    #[default]
    Keep,

    /// Strip the marker from tokens.
    Strip,
}

impl From<EowModeArg> for EndOfWordMode {
    fn from(value: EowModeArg) -> Self {
        match value {
            EowModeArg::Keep => EndOfWordMode::Keep,
            EowModeArg::Strip => EndOfWordMode::Strip,
        }
    }
}

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Input corpus files.
    #[arg(required = true)]
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Number of merges to learn.
    #[arg(long, allow_negative_numbers = true)]
    num_merges: i64,

    /// Fold text to lowercase.
    #[arg(long)]
    lower_case: bool,

    /// Word split mode.
    #[arg(long, value_enum, default_value_t = SplitArg::default())]
    split: SplitArg,

    /// End-of-word token mode.
    #[arg(long, value_enum, default_value_t = EowModeArg::default())]
    eow_mode: EowModeArg,

    #[command(flatten)]
    output: OutputArgs,
}

impl TrainArgs {
    /// The [`VocabOptions`] selected by these args.
    fn vocab_options(&self) -> VocabOptions {
        VocabOptions::default()
            .with_lower_case(self.lower_case)
            .with_split(self.split.into())
            .with_end_of_word_mode(self.eow_mode.into())
    }

    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;
        self.train_and_save()
    }

    /// Train, then open the output; a failed run writes nothing.
    fn train_and_save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let vocab = self.train()?;

        if let Some(path) = &self.output.output {
            log::info!("output: {}", path);
        }
        let mut writer = self.output.open_writer()?;
        write_json_vocab(&vocab, &mut writer)?;

        Ok(())
    }

    fn train(&self) -> Result<Arc<BpeVocab>, Box<dyn std::error::Error>> {
        let num_merges = merge_budget(self.num_merges)?;
        let options = BpeTrainerOptions::new(num_merges).with_vocab_options(self.vocab_options());

        let mut trainer: BpeTrainer = options.init();

        log::info!("Reading corpus files:");
        for (idx, path) in self.files.iter().enumerate() {
            log::info!("{idx}: {path}");
            let mut reader = BufReader::new(std::fs::File::open(path)?);
            for_each_line(&mut reader, |line| {
                trainer.update_from_text(line);
                Ok(())
            })?;
        }

        log::info!("Training vocabulary...");
        let results = trainer.train()?;
        log::info!(
            "Learned {} of {} merges; {} symbols",
            results.merges_performed,
            results.merges_requested,
            results.vocab.num_symbols()
        );

        Ok(results.vocab)
    }
}
