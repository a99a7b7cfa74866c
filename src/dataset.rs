//! Dataset sources for the CLI and benchmarks.
//!
//! The engine only ever borrows a slice; this module is where slices come
//! from: seeded random generation or a text file of integers.

use crate::error::DatasetError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Generate `len` values uniformly drawn from `min..=max`.
///
/// The same seed always produces the same dataset.
pub fn generate(len: usize, min: i64, max: i64, seed: u64) -> Result<Vec<i64>, DatasetError> {
    if min > max {
        return Err(DatasetError::InvalidBounds { min, max });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len).map(|_| rng.gen_range(min..=max)).collect())
}

/// Load integers separated by whitespace or commas.
pub fn load(path: &Path) -> Result<Vec<i64>, DatasetError> {
    let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}

fn parse(contents: &str, path: &Path) -> Result<Vec<i64>, DatasetError> {
    let mut values = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let tokens = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty());
        for token in tokens {
            let value = token.parse::<i64>().map_err(|_| DatasetError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn generation_is_reproducible() {
        let a = generate(1_000, -50, 50, 7).unwrap();
        let b = generate(1_000, -50, 50, 7).unwrap();
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (-50..=50).contains(v)));
    }

    #[test]
    fn generation_rejects_inverted_bounds() {
        assert!(matches!(
            generate(10, 5, 4, 0),
            Err(DatasetError::InvalidBounds { min: 5, max: 4 })
        ));
    }

    #[test]
    fn single_value_bounds_generate_constant_data() {
        let values = generate(32, 9, 9, 1).unwrap();
        assert!(values.iter().all(|&v| v == 9));
    }

    #[test]
    fn load_accepts_mixed_separators() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1 2,3").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  -4\t5 , 6  ").unwrap();

        let values = load(file.path()).unwrap();
        assert_eq!(values, vec![1, 2, 3, -4, 5, 6]);
    }

    #[test]
    fn load_reports_bad_token_with_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "10 20").unwrap();
        writeln!(file, "30 forty").unwrap();

        match load(file.path()) {
            Err(DatasetError::Parse { line, token, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "forty");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = load(Path::new("/nonexistent/values.txt"));
        assert!(matches!(result, Err(DatasetError::Io { .. })));
    }
}
