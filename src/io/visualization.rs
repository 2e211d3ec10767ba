//! PNG export of board occupancy
//!
//! Renders each cell as a flat square with a one-pixel border: light for
//! free cells, dark for occupied ones, and a highlight tone for cells the
//! caller wants called out (typically the last committed placement).

use crate::io::configuration::CELL_PIXELS;
use crate::io::error::{BoardError, Result};
use crate::spatial::board::Board;
use crate::spatial::cell::CellCoord;
use image::{ImageBuffer, Rgba};

const FREE_COLOR: Rgba<u8> = Rgba([235, 235, 230, 255]);
const OCCUPIED_COLOR: Rgba<u8> = Rgba([70, 80, 95, 255]);
const HIGHLIGHT_COLOR: Rgba<u8> = Rgba([215, 140, 70, 255]);
const BORDER_COLOR: Rgba<u8> = Rgba([180, 180, 175, 255]);

/// Export the board as a PNG occupancy render
///
/// Cells listed in `highlights` are drawn in the highlight tone regardless
/// of occupation.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_board_as_png(
    board: &Board,
    highlights: &[CellCoord],
    output_path: &str,
) -> Result<()> {
    let pixels = CELL_PIXELS as u32;
    let dimension = board.grid_size() as u32 * pixels;
    let mut img = ImageBuffer::new(dimension, dimension);

    for cell in board.cells() {
        let coord = cell.coord();
        let fill = if highlights.contains(&coord) {
            HIGHLIGHT_COLOR
        } else if cell.is_occupied() {
            OCCUPIED_COLOR
        } else {
            FREE_COLOR
        };

        let origin_x = coord.column as u32 * pixels;
        let origin_y = coord.row as u32 * pixels;
        for dy in 0..pixels {
            for dx in 0..pixels {
                let edge = dx == 0 || dy == 0 || dx == pixels - 1 || dy == pixels - 1;
                let color = if edge { BORDER_COLOR } else { fill };
                img.put_pixel(origin_x + dx, origin_y + dy, color);
            }
        }
    }

    if let Some(parent) = std::path::Path::new(output_path).parent() {
        std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| BoardError::ImageExport {
        path: output_path.into(),
        source: e,
    })?;

    Ok(())
}
