//! The text I/O boundary: parse the whitespace-delimited puzzle
//! format and write the zero-padded solution format.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sudoku_engine::SolverError;

/// Read a puzzle file: the first whitespace-delimited token is the box
/// side `N`, followed by exactly `(N*N)^2` further whitespace-delimited
/// digits (`0` for empty). Any run of ASCII whitespace, including
/// newlines, separates tokens.
///
/// # Errors
/// [`SolverError::Io`] if the file can't be opened; [`SolverError::Parse`]
/// if a token isn't a valid non-negative integer, the digit count doesn't
/// match `N`, or a digit exceeds `N*N`.
pub fn read_puzzle(path: &Path) -> Result<(usize, Vec<u32>), SolverError> {
    let contents =
        fs::read_to_string(path).map_err(|e| SolverError::Io(format!("{}: {e}", path.display())))?;

    let mut tokens = contents.split_ascii_whitespace();
    let n: usize = tokens
        .next()
        .ok_or_else(|| SolverError::Parse("missing box side N".to_string()))?
        .parse()
        .map_err(|_| SolverError::Parse("box side N is not an integer".to_string()))?;

    let size = n * n;
    let expected = size * size;
    let digits: Vec<u32> = tokens
        .map(|tok| {
            tok.parse::<u32>()
                .map_err(|_| SolverError::Parse(format!("invalid digit token {tok:?}")))
        })
        .collect::<Result<_, _>>()?;

    if digits.len() != expected {
        return Err(SolverError::Parse(format!(
            "expected {expected} digits for N={n}, found {}",
            digits.len()
        )));
    }
    if let Some(&bad) = digits.iter().find(|&&d| d as usize > size) {
        return Err(SolverError::Parse(format!(
            "digit {bad} exceeds the board size {size}"
        )));
    }

    Ok((n, digits))
}

/// Derive the output path from an input path: `outputs/output_<stem>.txt`,
/// where `<stem>` is the input file's basename with its final four
/// characters (the `.txt` extension) removed.
#[must_use]
pub fn output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = if file_name.len() >= 4 {
        &file_name[..file_name.len() - 4]
    } else {
        file_name.as_str()
    };
    Path::new("outputs").join(format!("output_{stem}.txt"))
}

/// Write a solved board to `outputs/output_<stem>.txt`: `N` on its own
/// line, then `N*N` lines of `N*N` space-separated, two-digit zero-padded
/// integers. Creates the `outputs/` directory if it doesn't exist yet.
///
/// # Errors
/// [`SolverError::Io`] if the directory or file can't be created.
pub fn write_solution(input: &Path, n: usize, digits: &[u32]) -> Result<PathBuf, SolverError> {
    let path = output_path(input);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SolverError::Io(e.to_string()))?;
    }

    let size = n * n;
    let mut out = String::with_capacity(digits.len() * 3 + 8);
    out.push_str(&n.to_string());
    out.push('\n');
    for row in digits.chunks(size) {
        let line: Vec<String> = row.iter().map(|d| format!("{d:02}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    let mut file = fs::File::create(&path).map_err(|e| SolverError::Io(e.to_string()))?;
    file.write_all(out.as_bytes())
        .map_err(|e| SolverError::Io(e.to_string()))?;
    Ok(path)
}
