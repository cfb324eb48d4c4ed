//! FastHiCcompare CLI entry point
//!
//! Builds joint comparison tables from two Hi-C contact maps.

use clap::{Parser, Subcommand};
use fast_hiccompare::core::{DenseMatrix, HicInput, HicTable, TABLE_COLUMNS};
use fast_hiccompare::{create_hic_table, create_hic_tables_by_chromosome, formats, TableOptions};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "fast-hiccompare")]
#[command(about = "Joint comparison tables for pairs of Hi-C contact maps")]
#[command(version)]
#[command(author = "FastHiCcompare Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the joint table of two contact maps
    Table {
        /// First contact map (3-column sparse or 7-column region pairs)
        input1: PathBuf,
        /// Second contact map, same encoding as the first
        input2: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
        /// Chromosome of 3-column sparse inputs
        #[arg(short = 'c', long)]
        chrom: Option<String>,
        /// Disable library-size scaling of the second dataset
        #[arg(long)]
        no_scale: bool,
        /// Keep bin pairs missing from one dataset with IF = 0
        #[arg(long)]
        include_zeros: bool,
        /// Keep only pairs with D <= this distance (in bins)
        #[arg(long)]
        subset_distance: Option<f64>,
        /// Keep only pairs in the 0-based index window I0 I1 J0 J1
        #[arg(long, num_args = 4, value_names = ["I0", "I1", "J0", "J1"])]
        subset_index: Option<Vec<usize>>,
        /// 3-column BED of regions to exclude
        #[arg(short = 'e', long)]
        exclude: Option<PathBuf>,
        /// Fraction of a bin that must overlap an excluded region
        #[arg(long, default_value = "0.2")]
        exclude_overlap: f64,
        /// Build one table per chromosome (7-column inputs only)
        #[arg(long)]
        split_chroms: bool,
        /// Number of threads for --split-chroms
        #[arg(short = 't', long, default_value = "1")]
        threads: usize,
    },
    /// Write the dense symmetric matrix of a 3-column sparse input
    Dense {
        /// Sparse contact map
        input: PathBuf,
        /// Output file (optional, stdout if not specified)
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_tables<W: Write>(writer: &mut W, tables: &[HicTable]) -> io::Result<()> {
    writeln!(writer, "{}", TABLE_COLUMNS.join("\t"))?;
    for table in tables {
        let chrom = table.chrom();
        for r in table {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                chrom, r.start1, r.end1, chrom, r.start2, r.end2, r.if1, r.if2, r.d, r.m
            )?;
        }
    }
    writer.flush()
}

fn write_dense<W: Write>(writer: &mut W, matrix: &DenseMatrix) -> io::Result<()> {
    let header: Vec<String> = matrix.grid().coords().iter().map(|c| c.to_string()).collect();
    writeln!(writer, "\t{}", header.join("\t"))?;
    for (i, coord) in matrix.grid().coords().iter().enumerate() {
        let row: Vec<String> = matrix.row(i).iter().map(|v| v.to_string()).collect();
        writeln!(writer, "{}\t{}", coord, row.join("\t"))?;
    }
    writer.flush()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Table {
            input1,
            input2,
            output,
            chrom,
            no_scale,
            include_zeros,
            subset_distance,
            subset_index,
            exclude,
            exclude_overlap,
            split_chroms,
            threads,
        } => {
            let exclude_regions = exclude
                .map(formats::read_regions_file)
                .transpose()
                .map_err(|e| anyhow::anyhow!("Failed to load exclusion regions: {}", e))?;

            let options = TableOptions {
                chromosome: chrom,
                scale: !no_scale,
                include_zeros,
                subset_distance,
                subset_index,
                exclude_regions,
                exclude_overlap,
            };
            options.validate()?;

            eprintln!("Reading contact maps: {:?}, {:?}", input1, input2);
            let first = formats::read_hic_file(&input1, 1)?;
            let second = formats::read_hic_file(&input2, 2)?;

            let tables = if split_chroms {
                create_hic_tables_by_chromosome(first, second, &options, threads)?
            } else {
                vec![create_hic_table(first, second, &options)?]
            };

            let mut writer = open_output(output.as_deref())?;
            write_tables(&mut writer, &tables)?;

            eprintln!("\n=== Table Statistics ===");
            for table in &tables {
                eprintln!(
                    "{:<10} bin size {:>8}  records {:>10}  scale factor {}",
                    table.chrom(),
                    table.bin_size(),
                    table.len(),
                    table
                        .scale_factor()
                        .map(|f| format!("{:.4}", f))
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Dense { input, output } => {
            let entries = match formats::read_hic_file(&input, 1)? {
                HicInput::Triplets(entries) => entries,
                other => anyhow::bail!(
                    "dense expects 3-column sparse input, got {}",
                    other.encoding()
                ),
            };
            let matrix = DenseMatrix::from_sparse(&entries)?;

            let mut writer = open_output(output.as_deref())?;
            write_dense(&mut writer, &matrix)?;
            eprintln!(
                "Wrote {}x{} matrix in {:.2}s",
                matrix.dim(),
                matrix.dim(),
                start.elapsed().as_secs_f64()
            );
        }
    }

    Ok(())
}
