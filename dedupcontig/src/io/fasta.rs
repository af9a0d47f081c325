//! FASTA reading and writing for [`SequenceCollection`].
//!
//! Parsing is delegated to `bio::io::fasta`, which tolerates arbitrary
//! line wrapping. Writing goes through the collection's `Display`
//! implementation, which wraps sequence lines at 80 columns.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use bio::io::fasta;

use crate::data_structs::sequence::{Sequence, SequenceCollection};
use crate::error::{Error, Result};

/// Reads a sequence collection from any buffered FASTA source.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<SequenceCollection> {
    let mut collection = SequenceCollection::new();
    for record in fasta::Reader::from_bufread(reader).records() {
        let record = record?;
        collection.push(Sequence::new(
            record.id(),
            record.desc().map(str::to_string),
            String::from_utf8_lossy(record.seq()).into_owned(),
        ));
    }
    Ok(collection)
}

/// Reads a sequence collection from a FASTA file.
pub fn read_fasta_path(path: impl AsRef<Path>) -> Result<SequenceCollection> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    read_fasta(BufReader::new(File::open(path)?))
}

/// Writes a sequence collection as FASTA, 80 columns per sequence line.
pub fn write_fasta<W: Write>(
    writer: &mut W,
    collection: &SequenceCollection,
) -> Result<()> {
    writeln!(writer, "{}", collection)?;
    Ok(())
}

/// Writes a sequence collection to a FASTA file.
pub fn write_fasta_path(
    path: impl AsRef<Path>,
    collection: &SequenceCollection,
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_fasta(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}
