//! Plain-text map and kernel files

use std::path::{Path, PathBuf};

use crate::io::configuration::MAP_EXTENSION;
use crate::io::error::{ErrorContext, Result, WithContext, file_system_error};
use crate::spatial::{Kernel, TileGrid};

/// Read a training map from a text file
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a rectangular grid
pub fn read_map(path: &Path) -> Result<TileGrid> {
    let text =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read map", e))?;
    TileGrid::parse(&text)
}

/// Read a 0/1 kernel matrix from a text file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid kernel
pub fn read_kernel(path: &Path) -> Result<Kernel> {
    let text =
        std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read kernel", e))?;
    Kernel::parse(&text)
}

/// Read several maps, tagging grid errors with the map index
///
/// # Errors
///
/// Returns the first read or parse error
pub fn read_maps(paths: &[PathBuf]) -> Result<Vec<TileGrid>> {
    paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            read_map(path).with_context(ErrorContext {
                grid: Some(index),
                path: Some(path.clone()),
            })
        })
        .collect()
}

/// Write a grid as newline-terminated rows, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_map(grid: &TileGrid, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    std::fs::write(path, grid.to_string()).map_err(|e| file_system_error(path, "write map", e))
}

/// Expand targets into a sorted list of map files
///
/// Files are taken as given; directories contribute their `.txt` files.
///
/// # Errors
///
/// Returns an error if a target does not exist or a directory cannot be read
pub fn collect_map_files(targets: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for target in targets {
        if target.is_file() {
            files.push(target.clone());
        } else if target.is_dir() {
            let mut found = Vec::new();
            let entries = std::fs::read_dir(target)
                .map_err(|e| file_system_error(target, "read directory", e))?;
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(target, "read directory", e))?
                    .path();
                if path.is_file()
                    && path.extension().and_then(|s| s.to_str()) == Some(MAP_EXTENSION)
                {
                    found.push(path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            return Err(file_system_error(
                target,
                "locate map",
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }
    }
    Ok(files)
}

/// Output path for map `index` of a batch
///
/// `out/map.txt` becomes `out/map_2.txt` for index 2.
pub fn indexed_output_path(path: &Path, index: usize, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let name = path.extension().map_or_else(
        || format!("{stem}{suffix}{index}"),
        |extension| format!("{stem}{suffix}{index}.{}", extension.to_string_lossy()),
    );

    if let Some(parent) = path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}
