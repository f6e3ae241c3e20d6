//! Concatenates every file of a directory tree that matches an extension
//! filter into a single output file.
//!
//! Files are visited in lexical order, depth first. An existing output file is
//! copied to `<output>.old` before it is replaced.

use clap::Parser;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Parser)]
#[command(name = "merge", version)]
pub struct MergeOptions {
    /// Directory of files to merge.
    #[arg(long, default_value = "./path/to/files/")]
    pub directory: PathBuf,

    /// File extensions to merge, comma separated. Empty keeps every file.
    #[arg(long = "extension", value_delimiter = ',', default_value = ".txt")]
    pub extensions: Vec<String>,

    /// The output file name.
    #[arg(long, default_value = "./output.txt")]
    pub output: PathBuf,

    /// Log every merged file.
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("could not read directory {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not back up {}: {source}", path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeSummary {
    /// The merged files, in the order they were concatenated.
    pub files: Vec<PathBuf>,
    pub bytes: usize,
    /// Where the previous output was copied to, if there was one.
    pub backup: Option<PathBuf>,
}

pub fn merge(options: &MergeOptions) -> Result<MergeSummary, MergeError> {
    let extensions: Vec<&str> = options
        .extensions
        .iter()
        .map(|extension| extension.trim())
        .filter(|extension| !extension.is_empty())
        .collect();

    let mut candidates = Vec::new();
    walk(&options.directory, &mut candidates)?;

    let mut merged = Vec::new();
    let mut files = Vec::new();
    for path in candidates {
        if !matches_extension(&path, &extensions) {
            continue;
        }
        let contents = fs::read(&path).map_err(|source| MergeError::Read {
            path: path.clone(),
            source,
        })?;
        if options.verbose {
            tracing::info!(path = %path.display(), bytes = contents.len(), "merging");
        } else {
            tracing::debug!(path = %path.display(), bytes = contents.len(), "merging");
        }
        merged.extend_from_slice(&contents);
        files.push(path);
    }

    let backup = if options.output.exists() {
        let backup = backup_path(&options.output);
        fs::copy(&options.output, &backup).map_err(|source| MergeError::Backup {
            path: options.output.clone(),
            source,
        })?;
        Some(backup)
    } else {
        None
    };

    fs::write(&options.output, &merged).map_err(|source| MergeError::Write {
        path: options.output.clone(),
        source,
    })?;

    Ok(MergeSummary {
        files,
        bytes: merged.len(),
        backup,
    })
}

/// `<output>.old`
pub fn backup_path(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".old");
    PathBuf::from(path)
}

// Depth first, entries of each directory in lexical order. Symlinked
// directories are not followed.
fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), MergeError> {
    let walk_error = |source| MergeError::Walk {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(walk_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_error)?;
    entries.sort();

    for path in entries {
        let metadata = fs::symlink_metadata(&path).map_err(walk_error)?;
        if metadata.is_dir() {
            walk(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    extensions.iter().any(|extension| name.ends_with(extension))
}
