//! Generic property access for the host's inspector and undo stack.
//!
//! Inside the crate the stem is used through its typed accessors; this
//! module only maps property ids onto them.

use serde::{Deserialize, Serialize};

use crate::error::StemError;
use crate::model::Direction;
use crate::stem::Stem;

/// Properties a stem exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pid {
    LineWidth,
    UserLen,
    StemDirection,
}

impl Pid {
    /// Tag name used for persistence.
    pub fn xml_name(&self) -> &'static str {
        match self {
            Pid::LineWidth => "lineWidth",
            Pid::UserLen => "userLen",
            Pid::StemDirection => "StemDirection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Real(f64),
    Direction(Direction),
}

impl PropertyValue {
    pub fn to_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Real(v) => Some(*v),
            PropertyValue::Direction(_) => None,
        }
    }

    pub fn to_direction(&self) -> Option<Direction> {
        match self {
            PropertyValue::Direction(d) => Some(*d),
            PropertyValue::Real(_) => None,
        }
    }
}

impl Stem {
    pub fn get_property(&self, pid: Pid) -> PropertyValue {
        match pid {
            Pid::LineWidth => PropertyValue::Real(self.line_width()),
            Pid::UserLen => PropertyValue::Real(self.user_length()),
            Pid::StemDirection => PropertyValue::Direction(self.direction_override()),
        }
    }

    /// Apply a property value; the geometry is recomputed on success.
    pub fn set_property(&mut self, pid: Pid, value: PropertyValue) -> Result<(), StemError> {
        match pid {
            Pid::LineWidth => {
                let v = value.to_real().ok_or(StemError::PropertyType { pid, expected: "a real" })?;
                self.set_line_width(v);
            }
            Pid::UserLen => {
                let v = value.to_real().ok_or(StemError::PropertyType { pid, expected: "a real" })?;
                self.set_user_length(v);
            }
            Pid::StemDirection => {
                let d = value
                    .to_direction()
                    .ok_or(StemError::PropertyType { pid, expected: "a direction" })?;
                self.set_direction_override(d);
            }
        }
        Ok(())
    }

    pub fn property_default(&self, pid: Pid) -> PropertyValue {
        match pid {
            Pid::LineWidth => PropertyValue::Real(self.styled_line_width()),
            Pid::UserLen => PropertyValue::Real(0.0),
            Pid::StemDirection => PropertyValue::Direction(Direction::Auto),
        }
    }

    /// Whether `pid` currently holds its default value.
    pub fn is_default(&self, pid: Pid) -> bool {
        match pid {
            Pid::LineWidth => self.is_line_width_styled(),
            _ => self.get_property(pid) == self.property_default(pid),
        }
    }
}
