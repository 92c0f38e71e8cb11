use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use entropy_coding::compressor;
use entropy_coding::example;
use entropy_coding::{
    ArithmeticCoder, CodeTable, Distribution, FanoBuilder, HuffmanBuilder, Lz78Coder,
    PrefixCodeBuilder, PrefixCoder, Result, entropy,
};

/// entropy-coding: classical entropy coders compared against the Shannon bound
#[derive(Parser)]
#[command(name = "entropy-coding")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shannon entropy of a list of probabilities
    Entropy {
        #[arg(required = true, allow_negative_numbers = true)]
        probabilities: Vec<f64>,
    },

    /// Build a Huffman code
    Huffman(DistributionArgs),

    /// Build a Shannon-Fano code
    Fano(DistributionArgs),

    /// Arithmetic-code a sequence
    Arithmetic {
        /// Sequence to code (defaults to the exercise input)
        #[arg(short, long)]
        sequence: Option<String>,

        #[command(flatten)]
        distribution: DistributionArgs,
    },

    /// LZ78-code a string
    Lz78 {
        #[arg(default_value = example::LZ78_INPUT)]
        input: String,
    },

    /// Write a Huffman-coded copy of a file with the `ctf` extension
    Compress {
        file: PathBuf,

        /// Use a Shannon-Fano code instead
        #[arg(long)]
        fano: bool,
    },

    /// Run the textbook exercises
    Demo,
}

#[derive(Args)]
struct DistributionArgs {
    /// Probabilities as `symbol=probability`
    #[arg(value_parser = parse_entry)]
    entries: Vec<(char, f64)>,
}

impl DistributionArgs {
    fn into_distribution(self, default: fn() -> Distribution<char>) -> Result<Distribution<char>> {
        if self.entries.is_empty() {
            Ok(default())
        } else {
            Distribution::new(self.entries)
        }
    }
}

fn parse_entry(arg: &str) -> std::result::Result<(char, f64), String> {
    let (symbol, probability) = arg
        .rsplit_once('=')
        .ok_or_else(|| format!("expected symbol=probability, got {arg:?}"))?;

    let mut chars = symbol.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(format!("symbol must be a single character, got {symbol:?}")),
    };
    let probability = probability
        .parse()
        .map_err(|e| format!("bad probability {probability:?}: {e}"))?;
    Ok((symbol, probability))
}

fn print_code<B: PrefixCodeBuilder>(builder: B, distribution: Distribution<char>) -> Result<()> {
    let entropy = distribution.entropy()?;
    let mut coder = PrefixCoder::new(builder, distribution);
    print_table(coder.code_table()?);
    println!("average length: {:.6}", coder.average_length()?);
    println!("entropy:        {entropy:.6}");
    Ok(())
}

fn print_table(table: &CodeTable<char>) {
    for (symbol, code) in table.iter() {
        println!("{symbol}\t{code}");
    }
}

fn demo() -> Result<()> {
    println!("== entropy of (4/11, 4/11, 3/11)");
    println!("{:.6}", entropy([4.0 / 11.0, 4.0 / 11.0, 3.0 / 11.0])?);

    println!("\n== Huffman code, textbook distribution");
    print_code(HuffmanBuilder, example::textbook())?;

    println!("\n== English letters");
    let english = example::english_letters();
    let huffman = PrefixCoder::new(HuffmanBuilder, english.clone()).average_length()?;
    let fano = PrefixCoder::new(FanoBuilder, english.clone()).average_length()?;
    println!("entropy:      {:.6}", english.entropy()?);
    println!("Huffman:      {huffman:.6}");
    println!("Shannon-Fano: {fano:.6}");

    println!("\n== arithmetic coding of {:?}", example::ARITHMETIC_INPUT);
    let mut arithmetic =
        ArithmeticCoder::new(example::four_letters(), example::ARITHMETIC_INPUT.chars());
    println!("{}", arithmetic.coded_string()?);

    println!("\n== LZ78 coding of {:?}", example::LZ78_INPUT);
    let mut lz78 = Lz78Coder::new(example::LZ78_INPUT);
    println!("{}", lz78.coded_string()?);
    for (phrase, code) in lz78.codes()? {
        println!("{phrase}\t{code}");
    }
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Entropy { probabilities } => {
            println!("{:.6}", entropy(probabilities)?);
        }
        Commands::Huffman(args) => {
            print_code(HuffmanBuilder, args.into_distribution(example::textbook)?)?;
        }
        Commands::Fano(args) => {
            print_code(FanoBuilder, args.into_distribution(example::textbook)?)?;
        }
        Commands::Arithmetic {
            sequence,
            distribution,
        } => {
            let distribution = distribution.into_distribution(example::four_letters)?;
            let sequence = sequence.unwrap_or_else(|| example::ARITHMETIC_INPUT.to_string());
            let mut coder = ArithmeticCoder::new(distribution, sequence.chars());
            println!("{}", coder.coded_string()?);
        }
        Commands::Lz78 { input } => {
            let mut coder = Lz78Coder::new(input);
            println!("{}", coder.coded_string()?);
            for (phrase, code) in coder.codes()? {
                println!("{phrase}\t{code}");
            }
        }
        Commands::Compress { file, fano } => {
            let report = if fano {
                compressor::compress_file(&FanoBuilder, &file)?
            } else {
                compressor::compress_file(&HuffmanBuilder, &file)?
            };
            println!(
                "{} -> {}: {} bytes, {} bits ({:.4} bits/byte, entropy {:.4})",
                file.display(),
                report.output.display(),
                report.input_bytes,
                report.output_bits,
                report.average_length,
                report.entropy
            );
        }
        Commands::Demo => demo()?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
