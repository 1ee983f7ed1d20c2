//! Headerless CSV input and output for care areas and generated fields.
//!
//! Column layouts:
//! - care areas: `ID,Xmin,Xmax,Ymin,Ymax`
//! - main fields: `ID,Xmin,Xmax,Ymin,Ymax`
//! - subfields: `ID,Xmin,Xmax,Ymin,Ymax,MainFieldID`
//!
//! The metadata file is the one exception: it carries a header row naming the
//! `Main Field Size` and `Sub Field size` columns, followed by a data row.
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::fields::{CareArea, FieldId, MainField, SubField};
use crate::geometry::Rect;

const MAIN_FIELD_SIZE_COLUMN: &str = "main field size";
const SUB_FIELD_SIZE_COLUMN: &str = "sub field size";

/// The two scalar sizes read from a metadata file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metadata {
    pub main_field_size: f64,
    pub sub_field_size: f64,
}

fn split_row(row: &str) -> Vec<&str> {
    row.split(',')
        .map(|cell| cell.trim().trim_matches('"').trim())
        .collect()
}

fn parse_f64(cell: &str, column: &str, line: usize) -> Result<f64> {
    cell.parse::<f64>().map_err(|_| Error::Parse {
        line,
        message: format!("{column}: '{cell}' is not a number"),
    })
}

/// Accepts `7` as well as integral floats such as `7.0`.
fn parse_id(cell: &str, line: usize) -> Result<FieldId> {
    if let Ok(id) = cell.parse::<FieldId>() {
        return Ok(id);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= FieldId::MAX as f64 => {
            Ok(v as FieldId)
        }
        _ => Err(Error::Parse {
            line,
            message: format!("ID: '{cell}' is not a non-negative integer"),
        }),
    }
}

/// Reads care areas, one per non-blank line.
///
/// Every rectangle is validated; the first degenerate one aborts the read.
pub fn read_care_areas(reader: impl BufRead) -> Result<Vec<CareArea>> {
    let mut care_areas = Vec::new();
    for (idx, row) in reader.lines().enumerate() {
        let row = row?;
        let line = idx + 1;
        if row.trim().is_empty() {
            continue;
        }
        let cells = split_row(&row);
        if cells.len() != 5 {
            return Err(Error::Parse {
                line,
                message: format!("expected 5 columns, found {}", cells.len()),
            });
        }
        let id = parse_id(cells[0], line)?;
        let rect = Rect::new(
            parse_f64(cells[1], "Xmin", line)?,
            parse_f64(cells[2], "Xmax", line)?,
            parse_f64(cells[3], "Ymin", line)?,
            parse_f64(cells[4], "Ymax", line)?,
        );
        care_areas.push(CareArea::try_new(id, rect)?);
    }
    debug!("Read {} care areas.", care_areas.len());
    Ok(care_areas)
}

/// Reads the main field and subfield sizes from a metadata file with a header row.
///
/// Column names are matched case-insensitively; other columns are ignored.
pub fn read_metadata(reader: impl BufRead) -> Result<Metadata> {
    let mut rows = reader
        .lines()
        .enumerate()
        .map(|(idx, row)| row.map(|r| (idx + 1, r)))
        .filter(|row| !matches!(row, Ok((_, r)) if r.trim().is_empty()));

    let (header_line, header) = rows.next().transpose()?.ok_or(Error::Parse {
        line: 1,
        message: "metadata is empty".into(),
    })?;
    let names: Vec<String> = split_row(&header)
        .into_iter()
        .map(str::to_ascii_lowercase)
        .collect();
    let column = |name: &str| {
        names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::Parse {
                line: header_line,
                message: format!("missing '{name}' column"),
            })
    };
    let main_col = column(MAIN_FIELD_SIZE_COLUMN)?;
    let sub_col = column(SUB_FIELD_SIZE_COLUMN)?;

    let (line, data) = rows.next().transpose()?.ok_or(Error::Parse {
        line: header_line + 1,
        message: "metadata has no data row".into(),
    })?;
    let cells = split_row(&data);
    let cell = |col: usize| {
        cells.get(col).copied().ok_or_else(|| Error::Parse {
            line,
            message: format!("expected at least {} columns", col + 1),
        })
    };

    Ok(Metadata {
        main_field_size: parse_f64(cell(main_col)?, "Main Field Size", line)?,
        sub_field_size: parse_f64(cell(sub_col)?, "Sub Field size", line)?,
    })
}

/// Writes main fields as `ID,Xmin,Xmax,Ymin,Ymax`, without a header.
pub fn write_main_fields(mut writer: impl Write, main_fields: &[MainField]) -> Result<()> {
    for f in main_fields {
        writeln!(
            writer,
            "{},{},{},{},{}",
            f.id, f.rect.xmin, f.rect.xmax, f.rect.ymin, f.rect.ymax
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes subfields as `ID,Xmin,Xmax,Ymin,Ymax,MainFieldID`, without a header.
pub fn write_sub_fields(mut writer: impl Write, sub_fields: &[SubField]) -> Result<()> {
    for f in sub_fields {
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            f.id, f.rect.xmin, f.rect.xmax, f.rect.ymin, f.rect.ymax, f.main_field_id
        )?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn reads_headerless_care_areas() {
        let csv = "0,0,10,0,10\n\n1.0, 20.5, 30 ,-4,6\n";
        let areas = read_care_areas(Cursor::new(csv)).unwrap();
        assert_eq!(
            areas,
            vec![
                CareArea::new(0, Rect::new(0.0, 10.0, 0.0, 10.0)),
                CareArea::new(1, Rect::new(20.5, 30.0, -4.0, 6.0)),
            ]
        );
    }

    #[test]
    fn rejects_short_rows_with_line_number() {
        let err = read_care_areas(Cursor::new("0,0,10,0,10\n1,2,3\n")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn rejects_fractional_or_negative_ids() {
        for row in ["1.5,0,1,0,1", "-1,0,1,0,1", "abc,0,1,0,1"] {
            let err = read_care_areas(Cursor::new(row)).unwrap_err();
            assert!(matches!(err, Error::Parse { line: 1, .. }), "{row}");
        }
    }

    #[test]
    fn rejects_degenerate_care_area() {
        let err = read_care_areas(Cursor::new("3,5,5,0,1")).unwrap_err();
        assert!(matches!(err, Error::InvalidRectangle { .. }));
    }

    #[test]
    fn reads_metadata_by_column_name() {
        let csv = "Run,Sub Field size,Main Field Size\nA,1.5,12\n";
        let meta = read_metadata(Cursor::new(csv)).unwrap();
        assert_eq!(
            meta,
            Metadata {
                main_field_size: 12.0,
                sub_field_size: 1.5,
            }
        );
    }

    #[test]
    fn metadata_requires_both_columns_and_a_row() {
        let missing = read_metadata(Cursor::new("Main Field Size\n4\n")).unwrap_err();
        assert!(
            matches!(missing, Error::Parse { line: 1, ref message } if message.contains("sub field size"))
        );

        let no_row =
            read_metadata(Cursor::new("Main Field Size,Sub Field size\n")).unwrap_err();
        assert!(matches!(no_row, Error::Parse { line: 2, .. }));

        let empty = read_metadata(Cursor::new("")).unwrap_err();
        assert!(matches!(empty, Error::Parse { .. }));
    }

    #[test]
    fn writes_headerless_rows() {
        let main = [MainField {
            id: 0,
            rect: Rect::new(-2.5, 12.5, -2.5, 12.5),
            care_area_id: 0,
        }];
        let sub = [SubField {
            id: 3,
            rect: Rect::new(0.0, 5.0, 5.0, 10.0),
            main_field_id: 0,
        }];

        let mut out = Vec::new();
        write_main_fields(&mut out, &main).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0,-2.5,12.5,-2.5,12.5\n");

        let mut out = Vec::new();
        write_sub_fields(&mut out, &sub).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3,0,5,5,10,0\n");
    }
}
