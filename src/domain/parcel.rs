use uuid::Uuid;

use super::Point;
use crate::error::LandError;
use crate::geometry::polygon_area;
use crate::units::{ThaiArea, convert_to_thai_units};

/// Minimum number of vertices for a parcel to enclose any area
pub const MIN_POLYGON_POINTS: usize = 3;

/// A survey point with a generated id for list operations
///
/// The id only keeps rows stable while editing; it never affects the area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub id: Uuid,
    pub point: Point,
}

/// Ordered boundary coordinates of one land parcel
#[derive(Debug, Clone, Default)]
pub struct Parcel {
    coordinates: Vec<Coordinate>,
}

impl Parcel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        let mut parcel = Self::new();
        for p in points {
            parcel.add(p);
        }
        parcel
    }

    /// Append a point and return its id
    pub fn add(&mut self, point: Point) -> Uuid {
        let id = Uuid::new_v4();
        self.coordinates.push(Coordinate { id, point });
        id
    }

    pub fn update(&mut self, id: Uuid, point: Point) -> Result<(), LandError> {
        let coord = self
            .coordinates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(LandError::UnknownCoordinate(id))?;
        coord.point = point;
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Point, LandError> {
        let index = self
            .coordinates
            .iter()
            .position(|c| c.id == id)
            .ok_or(LandError::UnknownCoordinate(id))?;
        Ok(self.coordinates.remove(index).point)
    }

    pub fn reset(&mut self) {
        self.coordinates.clear();
    }

    pub fn get(&self, id: Uuid) -> Option<&Coordinate> {
        self.coordinates.iter().find(|c| c.id == id)
    }

    /// Id of the coordinate at a 1-based row number, as shown to users
    pub fn id_at(&self, row: usize) -> Result<Uuid, LandError> {
        row.checked_sub(1)
            .and_then(|i| self.coordinates.get(i))
            .map(|c| c.id)
            .ok_or(LandError::RowOutOfRange {
                row,
                len: self.coordinates.len(),
            })
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn points(&self) -> Vec<Point> {
        self.coordinates.iter().map(|c| c.point).collect()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn has_enough_points(&self) -> bool {
        self.coordinates.len() >= MIN_POLYGON_POINTS
    }

    pub fn area_sq_meters(&self) -> f64 {
        polygon_area(&self.points())
    }

    /// Recomputed from scratch on every call
    pub fn area(&self) -> ThaiArea {
        convert_to_thai_units(self.area_sq_meters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Parcel {
        Parcel::from_points([
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 40.0),
            Point::new(0.0, 40.0),
        ])
    }

    #[test]
    fn test_area_follows_edits() {
        let mut parcel = square();
        assert_eq!(parcel.area().rai, 1);

        let id = parcel.id_at(3).unwrap();
        parcel.update(id, Point::new(40.0, 50.0)).unwrap();
        // 40x40 square with one corner raised by 10m adds a 200 m² triangle
        assert!((parcel.area_sq_meters() - 1800.0).abs() < 1e-9);
    }

    #[test]
    fn test_remove_drops_below_minimum() {
        let mut parcel = square();
        let id = parcel.id_at(1).unwrap();
        let removed = parcel.remove(id).unwrap();

        assert_eq!(removed, Point::new(0.0, 0.0));
        assert!(parcel.has_enough_points());
        assert!((parcel.area_sq_meters() - 800.0).abs() < 1e-9);

        let id = parcel.id_at(1).unwrap();
        parcel.remove(id).unwrap();
        assert!(!parcel.has_enough_points());
        assert_eq!(parcel.area(), ThaiArea::default());
    }

    #[test]
    fn test_ids_are_unique_and_stable() {
        let mut parcel = square();
        let ids: Vec<Uuid> = parcel.coordinates().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.iter().enumerate().all(|(i, a)| ids[i + 1..].iter().all(|b| a != b)));

        parcel.remove(ids[0]).unwrap();
        assert_eq!(parcel.id_at(1).unwrap(), ids[1]);
        assert!(parcel.get(ids[0]).is_none());
    }

    #[test]
    fn test_unknown_ids_and_rows() {
        let mut parcel = square();
        let stranger = Uuid::new_v4();

        assert_eq!(
            parcel.update(stranger, Point::default()),
            Err(LandError::UnknownCoordinate(stranger))
        );
        assert!(parcel.remove(stranger).is_err());
        assert_eq!(
            parcel.id_at(0),
            Err(LandError::RowOutOfRange { row: 0, len: 4 })
        );
        assert!(parcel.id_at(5).is_err());
    }

    #[test]
    fn test_reset() {
        let mut parcel = square();
        parcel.reset();
        assert!(parcel.is_empty());
        assert_eq!(parcel.area_sq_meters(), 0.0);
    }
}
