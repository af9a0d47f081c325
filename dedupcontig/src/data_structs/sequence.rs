//! Sequences and ordered sequence collections.
//!
//! A [`SequenceCollection`] mirrors a multi-FASTA file: an ordered list of
//! identified sequences. Order is the only relationship between entries;
//! identifiers need not be unique and lookups return the first match.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::data_structs::typedef::SeqName;
use crate::error::{Error, Result};

/// Output line width for serialized sequences.
pub const FASTA_LINE_WIDTH: usize = 80;

/// Complement of a single IUPAC nucleotide code, case preserved.
/// `None` for bytes outside the ambiguity alphabet.
pub fn complement(base: u8) -> Option<u8> {
    let complemented = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'N' => b'N',
        b'S' => b'S',
        b'W' => b'W',
        b'Y' => b'R',
        b'R' => b'Y',
        b'M' => b'K',
        b'K' => b'M',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        _ => return None,
    };
    if base.is_ascii_lowercase() {
        Some(complemented.to_ascii_lowercase())
    }
    else {
        Some(complemented)
    }
}

/// A single identified sequence.
///
/// The identifier is the first whitespace-delimited token of the FASTA
/// header; the rest of the header, if any, is kept as the description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    id:          SeqName,
    description: Option<String>,
    seq:         String,
}

impl Sequence {
    pub fn new(
        id: impl Into<SeqName>,
        description: Option<String>,
        seq: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description,
            seq: seq.into(),
        }
    }

    pub fn id(&self) -> &SeqName {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn seq(&self) -> &str {
        &self.seq
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Reverse-complements the sequence over the IUPAC ambiguity alphabet,
    /// both cases. Fails with [`Error::UnknownBase`] on any other byte.
    pub fn reverse_complement(&self) -> Result<Self> {
        let complemented = self
            .seq
            .bytes()
            .rev()
            .map(|base| {
                complement(base).ok_or(Error::UnknownBase {
                    id: self.id.clone(),
                    byte: base,
                })
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self {
            id: self.id.clone(),
            description: self.description.clone(),
            // Complements of ASCII bytes stay ASCII.
            seq: String::from_utf8_lossy(&complemented).into_owned(),
        })
    }
}

impl Display for Sequence {
    /// FASTA rendition: header line, then bases wrapped at 80 columns.
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match &self.description {
            Some(desc) => writeln!(f, ">{} {}", self.id, desc)?,
            None => writeln!(f, ">{}", self.id)?,
        }
        let bytes = self.seq.as_bytes();
        let mut chunks = bytes.chunks(FASTA_LINE_WIDTH).peekable();
        while let Some(chunk) = chunks.next() {
            f.write_str(&String::from_utf8_lossy(chunk))?;
            if chunks.peek().is_some() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Ordered collection of sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceCollection {
    sequences: Vec<Sequence>,
}

impl SequenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn push(
        &mut self,
        sequence: Sequence,
    ) {
        self.sequences.push(sequence);
    }

    /// Order-preserving append of another collection. Identifiers are not
    /// deduplicated.
    pub fn concat(
        &mut self,
        other: SequenceCollection,
    ) {
        self.sequences.extend(other.sequences);
    }

    /// Identifiers in collection order.
    pub fn ids(&self) -> impl Iterator<Item = &SeqName> {
        self.sequences.iter().map(Sequence::id)
    }

    /// Sequence lengths in collection order.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.sequences.iter().map(Sequence::len)
    }

    /// First sequence with the given identifier.
    pub fn get(
        &self,
        id: &str,
    ) -> Result<&Sequence> {
        self.sequences
            .iter()
            .find(|seq| seq.id().as_str() == id)
            .ok_or_else(|| Error::missing_id(id))
    }

    /// Index of the first sequence with the given identifier.
    pub fn index_of(
        &self,
        id: &str,
    ) -> Result<usize> {
        self.sequences
            .iter()
            .position(|seq| seq.id().as_str() == id)
            .ok_or_else(|| Error::missing_id(id))
    }
}

impl FromIterator<Sequence> for SequenceCollection {
    fn from_iter<T: IntoIterator<Item = Sequence>>(iter: T) -> Self {
        Self {
            sequences: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SequenceCollection {
    type IntoIter = std::vec::IntoIter<Sequence>;
    type Item = Sequence;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.into_iter()
    }
}

impl<'a> IntoIterator for &'a SequenceCollection {
    type IntoIter = std::slice::Iter<'a, Sequence>;
    type Item = &'a Sequence;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}

impl Display for SequenceCollection {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.sequences.iter().join("\n"))
    }
}
