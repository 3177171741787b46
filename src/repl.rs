//! Line-oriented parcel editor
//!
//! Every command that changes the parcel triggers an immediate recomputation
//! of the area, mirroring a live-updating table.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::domain::{MIN_POLYGON_POINTS, Parcel, Point, RowEditor, parse_pair};
use crate::error::LandError;
use crate::export::describe_area;

pub const HELP: &str = "\
Commands:
  add <x> <y>     append a point (Easting, Northing in meters)
  edit <n>        start editing row n
  x <value>       change the Easting of the row being edited
  y <value>       change the Northing of the row being edited
  save            apply the edit
  cancel          discard the edit
  delete <n>      remove row n
  list            show all points
  area            show the current area
  reset           remove all points
  help            show this text
  quit            leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Point),
    Edit(usize),
    SetX(String),
    SetY(String),
    Save,
    Cancel,
    Delete(usize),
    List,
    Area,
    Reset,
    Help,
    Quit,
}

fn parse_row(arg: &str, usage: &'static str) -> Result<usize, LandError> {
    arg.trim().parse().map_err(|_| LandError::Usage(usage))
}

impl FromStr for Command {
    type Err = LandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word.to_lowercase().as_str() {
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(LandError::Usage("add <x> <y>"));
                }
                Ok(Command::Add(parse_pair(rest)?))
            }
            "edit" | "e" => Ok(Command::Edit(parse_row(rest, "edit <n>")?)),
            "x" => Ok(Command::SetX(rest.to_string())),
            "y" => Ok(Command::SetY(rest.to_string())),
            "save" => Ok(Command::Save),
            "cancel" => Ok(Command::Cancel),
            "delete" | "del" | "rm" => Ok(Command::Delete(parse_row(rest, "delete <n>")?)),
            "list" | "ls" => Ok(Command::List),
            "area" => Ok(Command::Area),
            "reset" | "clear" => Ok(Command::Reset),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(LandError::UnknownCommand(line.to_string())),
        }
    }
}

/// What the runner should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The parcel changed; print the message followed by the new area
    Changed(String),
    /// Informational output only
    Info(String),
    Quit,
}

/// Parcel plus its inline editor
#[derive(Debug, Default)]
pub struct Session {
    pub parcel: Parcel,
    pub editor: RowEditor,
}

impl Session {
    pub fn new(parcel: Parcel) -> Self {
        Self {
            parcel,
            editor: RowEditor::Idle,
        }
    }

    fn row_of(&self, id: uuid::Uuid) -> Option<usize> {
        self.parcel
            .coordinates()
            .iter()
            .position(|c| c.id == id)
            .map(|i| i + 1)
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, LandError> {
        match command {
            Command::Add(point) => {
                self.parcel.add(point);
                Ok(Outcome::Changed(format!(
                    "P{}: {}, {}",
                    self.parcel.len(),
                    point.x,
                    point.y
                )))
            }
            Command::Edit(row) => {
                let id = self.parcel.id_at(row)?;
                if let Some(coord) = self.parcel.get(id) {
                    self.editor.start_edit(coord);
                }
                let draft = self.editor.draft().cloned().unwrap_or_default();
                Ok(Outcome::Info(format!(
                    "Editing P{}: x={} y={} (use x/y, then save or cancel)",
                    row, draft.x, draft.y
                )))
            }
            Command::SetX(value) => {
                self.editor.set_x(value)?;
                Ok(Outcome::Info(self.draft_line()))
            }
            Command::SetY(value) => {
                self.editor.set_y(value)?;
                Ok(Outcome::Info(self.draft_line()))
            }
            Command::Save => {
                let id = self.editor.save(&mut self.parcel)?;
                let row = self.row_of(id).unwrap_or_default();
                Ok(Outcome::Changed(format!("P{} updated", row)))
            }
            Command::Cancel => {
                self.editor.cancel();
                Ok(Outcome::Info("Edit cancelled".to_string()))
            }
            Command::Delete(row) => {
                let id = self.parcel.id_at(row)?;
                if self.editor.editing_id() == Some(id) {
                    self.editor.cancel();
                }
                self.parcel.remove(id)?;
                Ok(Outcome::Changed(format!("P{} deleted", row)))
            }
            Command::List => Ok(Outcome::Info(self.listing())),
            Command::Area => Ok(Outcome::Info(self.area_text())),
            Command::Reset => {
                self.editor.cancel();
                self.parcel.reset();
                Ok(Outcome::Changed("All points removed".to_string()))
            }
            Command::Help => Ok(Outcome::Info(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    fn draft_line(&self) -> String {
        match self.editor.draft() {
            Some(d) => format!("Draft: x={} y={}", d.x, d.y),
            None => String::new(),
        }
    }

    pub fn listing(&self) -> String {
        if self.parcel.is_empty() {
            return "No points yet. Add one with: add <x> <y>".to_string();
        }

        let editing = self.editor.editing_id();
        self.parcel
            .coordinates()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let marker = if Some(c.id) == editing { "*" } else { " " };
                format!("{}P{:<3} {:>16} {:>16}", marker, i + 1, c.point.x, c.point.y)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Current area, or a hint when the parcel cannot enclose one yet
    pub fn area_text(&self) -> String {
        let n = self.parcel.len();
        if n > 0 && n < MIN_POLYGON_POINTS {
            format!(
                "At least {} points are needed to compute the area ({} so far)",
                MIN_POLYGON_POINTS, n
            )
        } else {
            describe_area(&self.parcel.area())
        }
    }
}

/// Drive a session from `input`, writing prompts and results to `output`
pub fn run<R: BufRead, W: Write>(session: &mut Session, input: R, mut output: W) -> std::io::Result<()> {
    writeln!(output, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = line.parse::<Command>().and_then(|cmd| session.execute(cmd));
        match result {
            Ok(Outcome::Changed(msg)) => {
                log::debug!("{}", msg);
                writeln!(output, "{}", msg)?;
                writeln!(output, "{}", session.area_text())?;
            }
            Ok(Outcome::Info(msg)) => writeln!(output, "{}", msg)?,
            Ok(Outcome::Quit) => break,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "add 670000 1500000".parse::<Command>().unwrap(),
            Command::Add(Point::new(670000.0, 1500000.0))
        );
        assert_eq!(
            "ADD 1,2".parse::<Command>().unwrap(),
            Command::Add(Point::new(1.0, 2.0))
        );
        assert_eq!("edit 2".parse::<Command>().unwrap(), Command::Edit(2));
        assert_eq!(
            "x 12.5".parse::<Command>().unwrap(),
            Command::SetX("12.5".to_string())
        );
        assert_eq!("delete 1".parse::<Command>().unwrap(), Command::Delete(1));
        assert_eq!("  quit ".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "edit two".parse::<Command>(),
            Err(LandError::Usage("edit <n>"))
        );
        assert_eq!("add".parse::<Command>(), Err(LandError::Usage("add <x> <y>")));
        assert!(matches!(
            "jump 3".parse::<Command>(),
            Err(LandError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_session_edit_cycle() {
        let mut session = Session::default();
        for cmd in ["add 0 0", "add 4 0", "add 0 3"] {
            session.execute(cmd.parse().unwrap()).unwrap();
        }
        assert_eq!(session.parcel.area_sq_meters(), 6.0);

        session.execute(Command::Edit(2)).unwrap();
        session.execute(Command::SetX("8".to_string())).unwrap();
        assert_eq!(session.parcel.area_sq_meters(), 6.0);

        let outcome = session.execute(Command::Save).unwrap();
        assert_eq!(outcome, Outcome::Changed("P2 updated".to_string()));
        assert_eq!(session.parcel.area_sq_meters(), 12.0);
        assert_eq!(session.editor, RowEditor::Idle);
    }

    #[test]
    fn test_delete_row_being_edited_cancels_edit() {
        let mut session = Session::new(Parcel::from_points([
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ]));

        session.execute(Command::Edit(3)).unwrap();
        session.execute(Command::Delete(3)).unwrap();

        assert_eq!(session.editor, RowEditor::Idle);
        assert_eq!(session.parcel.len(), 2);
        assert!(session.area_text().starts_with("At least 3 points"));
    }

    #[test]
    fn test_run_prints_area_after_changes() {
        let mut session = Session::default();
        let input = "add 0 0\nadd 40 0\nadd 40 40\nadd 0 40\nbogus\nquit\nadd 1 1\n";
        let mut output = Vec::new();

        run(&mut session, input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("At least 3 points are needed"));
        assert!(text.contains("Area:   1 ไร่ 0 งาน 0.00 ตารางวา"));
        assert!(text.contains("Error: unknown command \"bogus\""));
        // Nothing after quit is processed
        assert_eq!(session.parcel.len(), 4);
    }
}
