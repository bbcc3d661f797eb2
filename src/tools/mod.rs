//! Grid file handling for the command line tools
//!
//! Grids are stored in one of three forms:
//! - Text: one printed row per line, top row first. `1 x X * #` mark a dot,
//!   `0 . - o` an empty cell, whitespace is ignored, `//` starts a comment
//!   and a `family: <name>` line names the printer family.
//! - JSON: `{"family": "...", "cells": [[...], ...]}`, column-major like
//!   [`crate::DotMatrix::load`].
//! - Cell bitmap (PNG/BMP/GIF): one pixel per cell, dark pixels are dots.
//!   No dot detection happens here; the bitmap must already be the grid.

pub mod config;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::MicError;
use crate::models::{DotMatrix, Layout, Orientation};

/// Luma below which a bitmap pixel counts as a dot
const DARK_THRESHOLD: u8 = 128;

/// Errors reading a grid file
#[derive(Error, Debug)]
pub enum LoadError {
    /// File could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Bitmap could not be decoded
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON grid file is malformed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text grid is malformed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Grid does not fit the layout
    #[error(transparent)]
    Grid(#[from] MicError),
}

/// Grid read from a file, not yet bound to a layout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridFile {
    /// Family named in the file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Column-major cells (`cells[column][row]`, row 0 at the bottom)
    pub cells: Vec<Vec<u8>>,
}

impl GridFile {
    /// Number of columns
    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    /// Number of rows (of the first column)
    pub fn rows(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Load the cells into a matrix for `layout`
    pub fn to_matrix(&self, layout: &'static Layout) -> Result<DotMatrix, LoadError> {
        let mut matrix = DotMatrix::new(layout);
        matrix.load(&self.cells)?;
        Ok(matrix)
    }
}

fn cell_value(c: char) -> Option<u8> {
    match c {
        '1' | 'x' | 'X' | '*' | '#' => Some(1),
        '0' | '.' | '-' | 'o' => Some(0),
        _ => None,
    }
}

/// Parse a text grid
pub fn parse_grid_text(text: &str) -> Result<GridFile, LoadError> {
    let mut family = None;
    let mut rows: Vec<(usize, Vec<u8>)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split("//").next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Some(name) = line
            .strip_prefix("family:")
            .or_else(|| line.strip_prefix("Family:"))
        {
            family = Some(name.trim().to_string());
            continue;
        }

        let mut cells = Vec::new();
        for c in line.chars().filter(|c| !c.is_whitespace()) {
            match cell_value(c) {
                Some(v) => cells.push(v),
                None => {
                    return Err(LoadError::Parse {
                        line: line_no,
                        message: format!("unexpected character {:?}", c),
                    });
                }
            }
        }
        rows.push((line_no, cells));
    }

    let Some((_, first)) = rows.first() else {
        return Err(LoadError::Parse {
            line: 0,
            message: "no grid rows".to_string(),
        });
    };
    let width = first.len();
    if let Some((line, row)) = rows.iter().find(|(_, row)| row.len() != width) {
        return Err(LoadError::Parse {
            line: *line,
            message: format!("row has {} cells, expected {}", row.len(), width),
        });
    }

    // text lists the top row first; row 0 is the bottom of the grid
    let height = rows.len();
    let cells = (0..width)
        .map(|column| {
            (0..height)
                .map(|row| rows[height - 1 - row].1[column])
                .collect()
        })
        .collect();

    Ok(GridFile { family, cells })
}

/// Parse a JSON grid
pub fn parse_grid_json(text: &str) -> Result<GridFile, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Read a cell bitmap, one pixel per cell
pub fn load_grid_image<P: AsRef<Path>>(path: P) -> Result<GridFile, LoadError> {
    let img = image::open(path)?.to_luma8();
    let (width, height) = img.dimensions();
    let cells = (0..width)
        .map(|x| {
            (0..height)
                .map(|row| {
                    let y = height - 1 - row;
                    u8::from(img.get_pixel(x, y).0[0] < DARK_THRESHOLD)
                })
                .collect()
        })
        .collect();
    Ok(GridFile {
        family: None,
        cells,
    })
}

fn is_image(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("png" | "bmp" | "gif"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Read a grid file, choosing the format from its extension
pub fn load_grid_file<P: AsRef<Path>>(path: P) -> Result<GridFile, LoadError> {
    let path = path.as_ref();
    let grid = if is_image(path) {
        load_grid_image(path)?
    } else if extension(path).as_deref() == Some("json") {
        parse_grid_json(&fs::read_to_string(path)?)?
    } else {
        parse_grid_text(&fs::read_to_string(path)?)?
    };
    debug!(
        path = %path.display(),
        columns = grid.columns(),
        rows = grid.rows(),
        "read grid file"
    );
    Ok(grid)
}

/// Render a matrix as a text grid that [`parse_grid_text`] reads back
pub fn render_grid(matrix: &DotMatrix) -> String {
    let layout = matrix.layout();
    let mut out = String::new();
    out.push_str(&format!(
        "// layout: {} ({} columns x {} rows), top row first\n",
        layout.kind(),
        layout.columns(),
        layout.rows()
    ));
    if layout.orientation() == Orientation::Standard {
        let legend: Vec<String> = layout
            .labels()
            .iter()
            .enumerate()
            .map(|(i, role)| format!("{}={}", i, role))
            .collect();
        out.push_str(&format!("// columns: {}\n", legend.join(", ")));
    } else {
        out.push_str("// column 0: row parity, top row: column parity, last column weighs 1\n");
    }

    for row in (0..layout.rows()).rev() {
        let cells: Vec<&str> = (0..layout.columns())
            .map(|column| if matrix.bit(column, row) == 1 { "1" } else { "0" })
            .collect();
        out.push_str(&cells.join(" "));
        match layout.orientation() {
            Orientation::Standard if row == layout.parity_row() => {
                out.push_str("  // parity");
            }
            Orientation::Standard => out.push_str(&format!("  // weight {}", 1u32 << row)),
            Orientation::Rotated => {
                let label = layout.labels().get(row).map(|r| r.label()).unwrap_or_default();
                out.push_str(&format!("  // {}", label));
            }
        }
        out.push('\n');
    }
    out
}

/// Collect grid files under `root`, sorted, optionally truncated to `limit`
pub fn grid_files<P: AsRef<Path>>(root: P, limit: Option<usize>) -> Vec<PathBuf> {
    let mut stack = vec![root.as_ref().to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if matches!(
                extension(&path).as_deref(),
                Some("txt" | "grid" | "json" | "png" | "bmp" | "gif")
            ) {
                files.push(path);
            }
        }
    }

    files.sort();
    if let Some(limit) = limit {
        files.truncate(limit);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::{ROTATED, STANDARD};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_path(ext: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before UNIX epoch")
            .as_nanos();
        let sequence = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
        path.push(format!("mic_grid_{nanos}_{sequence}.{ext}"));
        path
    }

    #[test]
    fn parse_grid_text_maps_top_row_last() {
        let grid = parse_grid_text(
            "family: Phaser\n\
             // comment line\n\
             1 0 0\n\
             0 . x  // trailing comment\n",
        )
        .unwrap();
        assert_eq!(grid.family.as_deref(), Some("Phaser"));
        assert_eq!((grid.columns(), grid.rows()), (3, 2));
        // bottom row (row 0) is the last text line
        assert_eq!(grid.cells[2][0], 1);
        assert_eq!(grid.cells[0][1], 1);
        assert_eq!(grid.cells[0][0], 0);
    }

    #[test]
    fn parse_grid_text_rejects_ragged_rows() {
        let err = parse_grid_text("101\n10\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 2, .. }));
    }

    #[test]
    fn parse_grid_text_rejects_unknown_characters() {
        let err = parse_grid_text("1 0 ?\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
        assert!(parse_grid_text("// nothing\n").is_err());
    }

    #[test]
    fn render_grid_round_trips() {
        for layout in [&STANDARD, &ROTATED] {
            let mut matrix = DotMatrix::new(layout);
            matrix.set(0, 0, 1).unwrap();
            matrix.set(3, 5, 1).unwrap();
            matrix.set(layout.columns() - 1, layout.rows() - 1, 1).unwrap();

            let text = render_grid(&matrix);
            let parsed = parse_grid_text(&text).unwrap();
            assert_eq!(parsed.cells, matrix.to_grid());
        }
    }

    #[test]
    fn to_matrix_checks_shape() {
        let grid = parse_grid_text("1 0\n0 1\n").unwrap();
        let err = grid.to_matrix(&STANDARD).unwrap_err();
        assert!(matches!(err, LoadError::Grid(MicError::ShapeMismatch { .. })));

        let matrix = GridFile {
            family: None,
            cells: vec![vec![0u8; 8]; 15],
        }
        .to_matrix(&STANDARD)
        .unwrap();
        assert_eq!(matrix.count_ones(), 0);
    }

    #[test]
    fn parse_grid_json_reads_cells() {
        let grid = parse_grid_json(r#"{"family": "ColorLaser", "cells": [[0, 1], [1, 0]]}"#)
            .unwrap();
        assert_eq!(grid.family.as_deref(), Some("ColorLaser"));
        assert_eq!(grid.cells, vec![vec![0, 1], vec![1, 0]]);
        assert!(parse_grid_json("{").is_err());
    }

    #[test]
    fn load_grid_file_reads_bitmap() {
        let path = temp_path("png");
        let mut img = image::GrayImage::from_pixel(15, 8, image::Luma([255u8]));
        // top-left pixel is column 0, row 7 (the parity row)
        img.put_pixel(0, 0, image::Luma([0u8]));
        img.put_pixel(14, 7, image::Luma([10u8]));
        img.save(&path).expect("failed to write temp bitmap");

        let grid = load_grid_file(&path).unwrap();
        assert_eq!((grid.columns(), grid.rows()), (15, 8));
        assert_eq!(grid.cells[0][7], 1);
        assert_eq!(grid.cells[14][0], 1);
        assert_eq!(grid.cells.iter().flatten().filter(|&&v| v == 1).count(), 2);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn grid_files_filters_and_limits() {
        let dir = temp_path("d");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("a.txt"), "1\n").unwrap();
        fs::write(dir.join("nested/b.json"), "{}").unwrap();
        fs::write(dir.join("notes.md"), "skip").unwrap();

        let files = grid_files(&dir, None);
        assert_eq!(files.len(), 2);
        assert_eq!(grid_files(&dir, Some(1)).len(), 1);
        let _ = fs::remove_dir_all(dir);
    }
}
