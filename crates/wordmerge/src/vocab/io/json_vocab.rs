//! # JSON Vocabulary IO

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::WMResult,
    types::{Symbol, SymbolPair},
    vocab::{BpeVocab, VocabOptions},
};

/// The serialized form of a [`BpeVocab`].
///
/// Merged symbols and token ids are not stored;
/// they are rebuilt from `alphabet` and the ordered `merges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonVocab {
    /// The training-time preprocessing options.
    pub options: VocabOptions,

    /// The base alphabet, sorted.
    pub alphabet: Vec<Symbol>,

    /// The ordered ``[left, right]`` merges.
    pub merges: Vec<SymbolPair>,
}

impl From<&BpeVocab> for JsonVocab {
    fn from(vocab: &BpeVocab) -> Self {
        Self {
            options: vocab.options().clone(),
            alphabet: vocab.alphabet().to_vec(),
            merges: vocab.merge_pairs().collect(),
        }
    }
}

impl TryFrom<JsonVocab> for BpeVocab {
    type Error = crate::errors::WordmergeError;

    fn try_from(value: JsonVocab) -> Result<Self, Self::Error> {
        BpeVocab::from_parts(value.options, value.alphabet, value.merges)
    }
}

/// Write a [`BpeVocab`] as JSON to a [`Write`] writer.
///
/// ## Arguments
/// * `vocab` - the vocabulary to write.
/// * `writer` - the target writer.
pub fn write_json_vocab<W: Write + ?Sized>(
    vocab: &BpeVocab,
    writer: &mut W,
) -> WMResult<()> {
    serde_json::to_writer_pretty(&mut *writer, &JsonVocab::from(vocab))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Read and validate a [`BpeVocab`] from a JSON [`Read`] stream.
///
/// ## Arguments
/// * `reader` - the source reader.
///
/// ## Returns
/// The vocabulary, or [`crate::WordmergeError::VocabConflict`]
/// if the stored merges are inconsistent.
pub fn read_json_vocab<R: Read>(reader: R) -> WMResult<BpeVocab> {
    let data: JsonVocab = serde_json::from_reader(reader)?;
    data.try_into()
}

/// Save a [`BpeVocab`] to a JSON file.
///
/// ## Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_json_vocab_path<P: AsRef<Path>>(
    vocab: &BpeVocab,
    path: P,
) -> WMResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_json_vocab(vocab, &mut writer)
}

/// Load a [`BpeVocab`] from a JSON file.
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_json_vocab_path<P: AsRef<Path>>(path: P) -> WMResult<BpeVocab> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_json_vocab(reader)
}
