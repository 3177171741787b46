use uuid::Uuid;

use super::input::parse_coordinate;
use super::{Coordinate, Parcel};
use crate::error::LandError;

/// Raw text of a row being edited, kept as typed until it is saved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub x: String,
    pub y: String,
}

/// Inline row editing: `Idle -> Editing(id, draft) -> Idle`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RowEditor {
    #[default]
    Idle,
    Editing { id: Uuid, draft: Draft },
}

impl RowEditor {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Begin editing `coord`, seeding the draft with its current values.
    /// Any edit already in progress is discarded.
    pub fn start_edit(&mut self, coord: &Coordinate) {
        *self = RowEditor::Editing {
            id: coord.id,
            draft: Draft {
                x: coord.point.x.to_string(),
                y: coord.point.y.to_string(),
            },
        };
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        match self {
            RowEditor::Idle => None,
            RowEditor::Editing { id, .. } => Some(*id),
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            RowEditor::Idle => None,
            RowEditor::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, LandError> {
        match self {
            RowEditor::Idle => Err(LandError::NotEditing),
            RowEditor::Editing { draft, .. } => Ok(draft),
        }
    }

    pub fn set_x(&mut self, value: impl Into<String>) -> Result<(), LandError> {
        self.draft_mut()?.x = value.into();
        Ok(())
    }

    pub fn set_y(&mut self, value: impl Into<String>) -> Result<(), LandError> {
        self.draft_mut()?.y = value.into();
        Ok(())
    }

    pub fn cancel(&mut self) {
        *self = RowEditor::Idle;
    }

    /// Parse the draft and write it back into `parcel`.
    ///
    /// A draft that does not parse leaves the editor in `Editing` so the user
    /// can correct it; the parcel is untouched in that case.
    pub fn save(&mut self, parcel: &mut Parcel) -> Result<Uuid, LandError> {
        let RowEditor::Editing { id, draft } = self else {
            return Err(LandError::NotEditing);
        };

        let point = parse_coordinate(&draft.x, &draft.y)?;
        let id = *id;
        parcel.update(id, point)?;
        *self = RowEditor::Idle;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;
    use crate::error::Axis;

    fn parcel() -> Parcel {
        Parcel::from_points([
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ])
    }

    #[test]
    fn test_start_edit_seeds_draft() {
        let parcel = parcel();
        let coord = parcel.coordinates()[1];
        let mut editor = RowEditor::new();

        editor.start_edit(&coord);
        assert_eq!(editor.editing_id(), Some(coord.id));
        assert_eq!(
            editor.draft(),
            Some(&Draft {
                x: "4".to_string(),
                y: "0".to_string()
            })
        );
    }

    #[test]
    fn test_save_updates_and_returns_to_idle() {
        let mut parcel = parcel();
        let coord = parcel.coordinates()[1];
        let mut editor = RowEditor::new();

        editor.start_edit(&coord);
        editor.set_x("8").unwrap();
        assert_eq!(editor.save(&mut parcel).unwrap(), coord.id);

        assert_eq!(editor, RowEditor::Idle);
        assert_eq!(parcel.area_sq_meters(), 12.0);
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut parcel = parcel();
        let coord = parcel.coordinates()[1];
        let mut editor = RowEditor::new();

        editor.start_edit(&coord);
        editor.set_y("100").unwrap();
        editor.cancel();

        assert_eq!(editor, RowEditor::Idle);
        assert!(editor.save(&mut parcel).is_err());
        assert_eq!(parcel.area_sq_meters(), 6.0);
    }

    #[test]
    fn test_failed_save_stays_editing() {
        let mut parcel = parcel();
        let coord = parcel.coordinates()[0];
        let mut editor = RowEditor::new();

        editor.start_edit(&coord);
        editor.set_x("").unwrap();

        assert_eq!(
            editor.save(&mut parcel),
            Err(LandError::MissingValue(Axis::Easting))
        );
        assert_eq!(editor.editing_id(), Some(coord.id));
        assert_eq!(parcel.coordinates()[0].point, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_idle_rejects_draft_changes() {
        let mut editor = RowEditor::new();
        assert_eq!(editor.set_x("1"), Err(LandError::NotEditing));
        assert_eq!(editor.set_y("1"), Err(LandError::NotEditing));
        assert_eq!(editor.save(&mut parcel()), Err(LandError::NotEditing));
    }

    #[test]
    fn test_save_after_row_removed() {
        let mut parcel = parcel();
        let coord = parcel.coordinates()[2];
        let mut editor = RowEditor::new();

        editor.start_edit(&coord);
        parcel.remove(coord.id).unwrap();

        assert_eq!(
            editor.save(&mut parcel),
            Err(LandError::UnknownCoordinate(coord.id))
        );
    }
}
