//! PNG previews of tile grids

use crate::io::configuration::{MAX_IMAGE_PIXELS, UNRESOLVED_TILE};
use crate::io::error::{MarkovError, Result, file_system_error, invalid_parameter};
use crate::spatial::TileGrid;
use image::{ImageBuffer, Rgba};
use std::collections::HashMap;
use std::path::Path;

// Colors are assigned over the sorted alphabet and repeat past the end
const PALETTE: [[u8; 4]; 16] = [
    [46, 52, 64, 255],
    [191, 97, 106, 255],
    [163, 190, 140, 255],
    [235, 203, 139, 255],
    [129, 161, 193, 255],
    [180, 142, 173, 255],
    [136, 192, 208, 255],
    [229, 233, 240, 255],
    [208, 135, 112, 255],
    [94, 129, 172, 255],
    [76, 86, 106, 255],
    [143, 188, 187, 255],
    [216, 222, 233, 255],
    [67, 76, 94, 255],
    [59, 66, 82, 255],
    [236, 239, 244, 255],
];

/// Deterministic color for every tile of `alphabet`
///
/// The unresolved tile is transparent.
pub fn palette(alphabet: &[char]) -> HashMap<char, [u8; 4]> {
    alphabet
        .iter()
        .filter(|&&tile| tile != UNRESOLVED_TILE)
        .zip(PALETTE.iter().cycle())
        .map(|(&tile, &color)| (tile, color))
        .chain(std::iter::once((UNRESOLVED_TILE, [0, 0, 0, 0])))
        .collect()
}

/// Render `grid` as a PNG with `scale` x `scale` pixels per tile
///
/// # Errors
///
/// Returns an error if:
/// - `scale` is zero or the image would exceed `MAX_IMAGE_PIXELS`
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &TileGrid, scale: u32, output_path: &Path) -> Result<()> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be positive"));
    }

    let too_large = || invalid_parameter("scale", &scale, &"image dimensions overflow");
    let width = u32::try_from(grid.cols())
        .ok()
        .and_then(|cols| cols.checked_mul(scale))
        .ok_or_else(too_large)?;
    let height = u32::try_from(grid.rows())
        .ok()
        .and_then(|rows| rows.checked_mul(scale))
        .ok_or_else(too_large)?;
    if u64::from(width) * u64::from(height) > MAX_IMAGE_PIXELS {
        return Err(invalid_parameter(
            "scale",
            &scale,
            &format!("image would exceed {MAX_IMAGE_PIXELS} pixels"),
        ));
    }

    let colors = palette(&grid.alphabet());
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let tile = grid.get((y / scale) as usize, (x / scale) as usize);
        let rgba = tile
            .and_then(|tile| colors.get(&tile))
            .copied()
            .unwrap_or([0, 0, 0, 0]);
        Rgba(rgba)
    });

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    img.save(output_path)
        .map_err(|e| MarkovError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
