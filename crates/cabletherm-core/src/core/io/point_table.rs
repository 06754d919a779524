use crate::core::models::installation::Installation;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PointTableError {
    #[error("CSV error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// One row of the point table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub cable_id: String,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub length: f64,
    /// Distance along the cable at the far end of this point's span (m).
    pub distance_along: f64,
    /// W/m
    pub watt_loss: f64,
    /// °C
    pub temperature: f64,
}

/// Flattens every cable of the installation into rows, cables in insertion order.
pub fn point_records(installation: &Installation) -> Vec<PointRecord> {
    let mut records = Vec::with_capacity(installation.point_count());
    for (_, cable) in installation.cables() {
        let distances = cable.cumulative_lengths();
        for (index, point) in cable.points().iter().enumerate() {
            records.push(PointRecord {
                cable_id: cable.id().to_string(),
                index,
                x: point.position.x,
                y: point.position.y,
                z: point.position.z,
                length: point.length,
                distance_along: distances[index],
                watt_loss: cable.watt_losses()[index],
                temperature: cable.temperatures()[index],
            });
        }
    }
    records
}

pub fn write_point_table<W: Write>(
    installation: &Installation,
    writer: W,
) -> Result<(), PointTableError> {
    write_records(installation, csv::Writer::from_writer(writer), "<stream>")
}

pub fn write_point_table_to_path(
    installation: &Installation,
    path: &Path,
) -> Result<(), PointTableError> {
    let origin = path.to_string_lossy().to_string();
    let writer = csv::Writer::from_path(path).map_err(|e| PointTableError::Csv {
        path: origin.clone(),
        source: e,
    })?;
    write_records(installation, writer, &origin)
}

fn write_records<W: Write>(
    installation: &Installation,
    mut writer: csv::Writer<W>,
    origin: &str,
) -> Result<(), PointTableError> {
    let csv_error = |e: csv::Error| PointTableError::Csv {
        path: origin.to_string(),
        source: e,
    };
    for record in point_records(installation) {
        writer.serialize(record).map_err(csv_error)?;
    }
    writer
        .flush()
        .map_err(|e| csv_error(csv::Error::from(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cable::Cable;
    use crate::core::models::cable::tests::aluminium_params;
    use nalgebra::Point3;
    use tempfile::tempdir;

    fn installation() -> Installation {
        let mut installation = Installation::new(30.0, 3.5).unwrap();
        for (id, x) in [("a", 0.0), ("b", 0.5)] {
            let mut cable =
                Cable::new(aluminium_params(id, Point3::new(x, -1.0, 0.0), 0.4)).unwrap();
            cable.append_segment(Point3::new(x, -1.0, 1.0)).unwrap();
            installation.add_cable(cable).unwrap();
        }
        installation
    }

    #[test]
    fn records_follow_insertion_order_and_point_order() {
        let records = point_records(&installation());
        assert_eq!(records.len(), 6);
        assert_eq!(records[0].cable_id, "a");
        assert_eq!(records[3].cable_id, "b");
        assert_eq!(records[3].index, 0);
        assert_eq!(records[3].x, 0.5);
        assert!((records[2].length - 0.2).abs() < 1e-12);
        assert!((records[2].distance_along - 1.0).abs() < 1e-12);
        assert!(records.iter().all(|r| r.temperature == 90.0));
    }

    #[test]
    fn written_table_has_header_and_one_row_per_point() {
        let mut buffer = Vec::new();
        write_point_table(&installation(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("cable_id,index,x,y,z,length,distance_along,watt_loss,temperature")
        );
        assert_eq!(lines.count(), 6);
    }

    #[test]
    fn table_written_to_path_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.csv");
        write_point_table_to_path(&installation(), &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<PointRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows, point_records(&installation()));
    }

    #[test]
    fn writing_into_missing_directory_fails_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("points.csv");
        let err = write_point_table_to_path(&installation(), &path).unwrap_err();
        assert!(err.to_string().contains("points.csv"));
    }
}
