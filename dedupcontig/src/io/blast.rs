//! The external aligner collaborator: `blastn` invocation and parsing of
//! its tabular output.
//!
//! The column contract is pinned to the BLAST+ `-outfmt 6` default layout,
//! twelve tab-separated columns in this order:
//!
//! ```text
//! qseqid sseqid pident length mismatch gapopen qstart qend sstart send evalue bitscore
//! ```
//!
//! Coordinates are 1-based with inclusive ends. The span credited to the
//! covered contig is the query-side span `[qstart, qend + 1)`: in a
//! self-vs-self search every alignment is reported once per role, so each
//! contig collects its coverage from the rows where it is the query.

use std::fmt::Display;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::{PosType, SeqName};
use crate::error::{Error, Result};

/// One alignment record from `blastn -outfmt 6`.
///
/// Field order matches the tabular output and must not be reordered:
/// `csv` deserializes the headerless records positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastHit {
    pub qseqid:   SeqName,
    pub sseqid:   SeqName,
    pub pident:   f64,
    pub length:   PosType,
    pub mismatch: PosType,
    pub gapopen:  PosType,
    pub qstart:   PosType,
    pub qend:     PosType,
    pub sstart:   PosType,
    pub send:     PosType,
    pub evalue:   f64,
    pub bitscore: f64,
}

impl BlastHit {
    /// True when query and subject are the same contig. Such hits carry
    /// no redundancy information and are discarded downstream.
    pub fn is_self_hit(&self) -> bool {
        self.qseqid == self.sseqid
    }

    /// The aligned region on the query contig as a half-open interval.
    pub fn query_interval(&self) -> Result<Interval> {
        Interval::new(self.qseqid.clone(), self.qstart, self.qend + 1)
    }
}

impl Display for BlastHit {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} vs {} ({}:{}-{}, {:.1}%)",
            self.qseqid, self.sseqid, self.qseqid, self.qstart, self.qend,
            self.pident
        )
    }
}

/// Parses `-outfmt 6` records from any reader.
pub fn parse_hits<R: Read>(reader: R) -> Result<Vec<BlastHit>> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_reader(reader)
        .into_deserialize::<BlastHit>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::external(format!("unparseable blastn output: {e}")))
}

/// Runner for `blastn` of one FASTA file against another.
#[derive(Debug, Clone)]
pub struct BlastnRunner {
    program:  PathBuf,
    out_path: Option<PathBuf>,
}

impl Default for BlastnRunner {
    fn default() -> Self {
        Self::new(None)
    }
}

impl BlastnRunner {
    /// Creates a runner; `blast_dir` overrides PATH lookup of the binary.
    pub fn new(blast_dir: Option<&Path>) -> Self {
        let program = match blast_dir {
            Some(dir) => dir.join("blastn"),
            None => PathBuf::from("blastn"),
        };
        Self {
            program,
            out_path: None,
        }
    }

    /// Keeps the raw tabular output at the given path instead of a
    /// temporary file.
    pub fn with_out_path(
        mut self,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.out_path = Some(path.into());
        self
    }

    /// Aligns `query` against `subject` and returns the parsed hits.
    ///
    /// Any spawn failure, non-zero exit status or unparseable record is
    /// [`Error::ExternalToolFailure`].
    pub fn run(
        &self,
        query: &Path,
        subject: &Path,
    ) -> Result<Vec<BlastHit>> {
        // The temp file guard must stay alive until parsing is done.
        let (out_path, _guard) = match &self.out_path {
            Some(path) => (path.clone(), None),
            None => {
                let tempfile = NamedTempFile::new()?;
                (tempfile.path().to_path_buf(), Some(tempfile))
            },
        };

        let mut command = Command::new(&self.program);
        command
            .arg("-query")
            .arg(query)
            .arg("-subject")
            .arg(subject)
            .arg("-outfmt")
            .arg("6")
            .arg("-out")
            .arg(&out_path);
        info!("Running {:?}", command);

        let status = command.status().map_err(|e| {
            Error::external(format!(
                "failed to spawn {}: {e}",
                self.program.display()
            ))
        })?;
        if !status.success() {
            return Err(Error::external(format!(
                "{} exited with {status}",
                self.program.display()
            )));
        }

        let hits = parse_hits(std::fs::File::open(&out_path)?)?;
        debug!("Parsed {} alignment records", hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTFMT6: &str = "ctgA\tctgB\t98.50\t500\t5\t2\t1\t500\t101\t600\t1e-100\t900.0\n\
                           ctgA\tctgA\t100.00\t1000\t0\t0\t1\t1000\t1\t1000\t0.0\t1800.0\n";

    #[test]
    fn test_parse_pinned_columns() {
        let hits = parse_hits(OUTFMT6.as_bytes()).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].qseqid, "ctgA");
        assert_eq!(hits[0].sseqid, "ctgB");
        assert_eq!(hits[0].qstart, 1);
        assert_eq!(hits[0].qend, 500);
        assert_eq!(hits[0].sstart, 101);
        assert_eq!(hits[0].send, 600);
        assert!(!hits[0].is_self_hit());
        assert!(hits[1].is_self_hit());
    }

    #[test]
    fn test_query_interval_is_half_open() {
        let hits = parse_hits(OUTFMT6.as_bytes()).unwrap();
        let interval = hits[0].query_interval().unwrap();
        assert_eq!(interval.start(), 1);
        assert_eq!(interval.end(), 501);
        assert_eq!(interval.length(), 500);
    }

    #[test]
    fn test_truncated_record_is_external_tool_failure() {
        let result = parse_hits("ctgA\tctgB\t98.50\n".as_bytes());
        assert!(matches!(result, Err(Error::ExternalToolFailure { .. })));
    }
}
