use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::alphabet::Distribution;
use crate::code_table::CodeTable;
use crate::error::Result;
use crate::prefix::PrefixCodeBuilder;

/// Extension given to compressed copies.
pub const COMPRESSED_EXTENSION: &str = "ctf";

/// What [`compress_file`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    pub output: PathBuf,
    pub input_bytes: usize,
    pub output_bits: usize,
    /// Average codeword length in bits per byte.
    pub average_length: f64,
    /// Entropy of the byte distribution in bits per byte.
    pub entropy: f64,
}

/// Build a code for the byte frequencies of `content` and code each line of
/// it (line terminators included) with that code.
pub fn compress_bytes<B: PrefixCodeBuilder>(
    builder: &B,
    content: &[u8],
) -> Result<(CodeTable<u8>, Vec<String>)> {
    let distribution = Distribution::from_counts(content.iter().copied())?;
    let table = builder.build(&distribution)?;
    let lines: Vec<String> = content
        .split_inclusive(|&byte| byte == b'\n')
        .map(|line| table.encode(line.iter().copied()))
        .collect::<Result<_>>()?;
    Ok((table, lines))
}

/// Compress the file at `path` into a sibling file with the
/// [`COMPRESSED_EXTENSION`] extension. The copy holds each coded line as the
/// characters `0` and `1`, one after another.
pub fn compress_file<B: PrefixCodeBuilder>(builder: &B, path: &Path) -> Result<CompressionReport> {
    let content = fs::read(path)?;
    let (table, lines) = compress_bytes(builder, &content)?;
    let distribution = Distribution::from_counts(content.iter().copied())?;

    let output = path.with_extension(COMPRESSED_EXTENSION);
    let coded = lines.concat();
    fs::write(&output, &coded)?;

    let report = CompressionReport {
        output,
        input_bytes: content.len(),
        output_bits: coded.len(),
        average_length: builder.average_length(&table, &distribution),
        entropy: distribution.entropy()?,
    };
    info!(
        "compressed {} ({} bytes) into {} ({} bits)",
        path.display(),
        report.input_bytes,
        report.output.display(),
        report.output_bits
    );
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use crate::fano::FanoBuilder;
    use crate::huffman::HuffmanBuilder;

    fn scratch_file(name: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "entropy-coding-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{name}.txt"));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn lines_are_coded_separately() {
        let content = b"abracadabra\nabc\nc";
        let (table, lines) = compress_bytes(&HuffmanBuilder, content).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], table.get(&b'c').unwrap());
        assert!(lines[0].ends_with(table.get(&b'\n').unwrap()));
        assert!(table.is_prefix_free());
    }

    #[test]
    fn empty_content_has_no_distribution() {
        assert_eq!(
            compress_bytes(&HuffmanBuilder, b"").map(|_| ()),
            Err(Error::EmptyDistribution)
        );
    }

    #[test_log::test]
    fn compress_file_writes_sibling() {
        let content = b"she sells sea shells\nby the sea shore\n";
        let path = scratch_file("shells", content);

        let report = compress_file(&HuffmanBuilder, &path).unwrap();
        assert_eq!(report.output, path.with_extension("ctf"));
        assert_eq!(report.input_bytes, content.len());

        let written = fs::read_to_string(&report.output).unwrap();
        assert_eq!(written.len(), report.output_bits);
        assert!(written.chars().all(|c| c == '0' || c == '1'));
        assert!(report.average_length >= report.entropy);
        let expected_bits = report.average_length * content.len() as f64;
        assert!((expected_bits - report.output_bits as f64).abs() < 1e-6);

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn compress_file_writes_compress_bytes_output() {
        let content = b"abracadabra\nabc\nc";
        let path = scratch_file("lines", content);

        let report = compress_file(&FanoBuilder, &path).unwrap();
        let (table, lines) = compress_bytes(&FanoBuilder, content).unwrap();
        let written = fs::read_to_string(&report.output).unwrap();
        assert_eq!(written, lines.concat());

        let distribution = Distribution::from_counts(content.iter().copied()).unwrap();
        assert_eq!(report.average_length, table.average_length(&distribution));

        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn compress_file_with_fano() {
        let path = scratch_file("fano", b"aaaabbbcc\nd");
        let report = compress_file(&FanoBuilder, &path).unwrap();
        assert!(report.average_length >= report.entropy);
        fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("entropy-coding-does-not-exist.txt");
        assert!(matches!(
            compress_file(&HuffmanBuilder, &path),
            Err(Error::Io(_))
        ));
    }
}
