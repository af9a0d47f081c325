use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use dedupcontig::prelude::*;
use log::info;

use crate::utils::{init_spinner, validate_input};

#[derive(Args, Debug, Clone)]
pub(crate) struct DedupArgs {
    #[arg(
        short = 'd',
        long,
        required = true,
        help = "Draft genome assembly (multi FASTA)"
    )]
    draft: PathBuf,

    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Prefix of the output files"
    )]
    output: PathBuf,

    #[arg(
        short = 'b',
        long,
        help = "Directory containing the blast+ binaries, if not in PATH"
    )]
    blast_path: Option<PathBuf>,

    #[arg(
        short = 't',
        long,
        default_value_t = DEFAULT_THRESHOLD,
        help = "Coverage percent at which a contig counts as redundant"
    )]
    threshold: f64,

    #[arg(
        long,
        help = "Keep the raw blastn tabular output as <prefix>.blastn"
    )]
    keep_alignment: bool,
}

impl DedupArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        validate_input(&self.draft)?;

        println!(
            "\n\t{}\n",
            style("--- REMOVING REDUNDANT CONTIGS ---").bold()
        );
        let draft = read_fasta_path(&self.draft)?;
        info!(
            "Read {} contigs from {}",
            draft.len(),
            self.draft.display()
        );

        let mut runner = BlastnRunner::new(self.blast_path.as_deref());
        if self.keep_alignment {
            runner = runner.with_out_path(self.output_with("blastn"));
        }

        let spinner = init_spinner("Aligning draft against itself...")?;
        let start = Instant::now();
        let hits = runner.run(&self.draft, &self.draft)?;
        spinner.finish_and_clear();
        println!(
            "Alignment done: ran in {}s ({} hits)",
            start.elapsed().as_secs(),
            hits.len()
        );

        let spinner = init_spinner("Analyzing coverage...")?;
        let start = Instant::now();
        let analyzer = CoverageAnalyzer::new(&draft, &hits)?;
        let outcome =
            RedundancyEliminator::new(self.threshold).run(&analyzer)?;
        spinner.finish_and_clear();
        println!(
            "Coverage analysis completed: ran in {}s",
            start.elapsed().as_secs()
        );

        let (kept, removed) = outcome.partition(&draft);
        let kept_path = self.output_with("NR.fasta");
        write_fasta_path(&kept_path, &kept)?;
        info!("Wrote {} contigs to {}", kept.len(), kept_path.display());

        if outcome.n_removed() > 0 {
            let removed_path = self.output_with("RM.fasta");
            write_fasta_path(&removed_path, &removed)?;
            info!(
                "Wrote {} contigs to {}",
                removed.len(),
                removed_path.display()
            );

            println!("\nContigs removed: ");
            println!("\t{}\t{}", style("Contig").bold(), style("% covered").bold());
            for removal in outcome.removals() {
                println!("\t{}\t{:.2}", removal.id, removal.coverage);
            }
        }
        else {
            println!("\n{}", style("No contig removed").green());
        }

        Ok(())
    }

    fn output_with(
        &self,
        extension: &str,
    ) -> PathBuf {
        let mut path = self.output.clone().into_os_string();
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }
}
