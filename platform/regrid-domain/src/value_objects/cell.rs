/// One observation of a trend column.
///
/// Blank and non-numeric source cells both become `Invalid` at ingestion so
/// the resampling services never look at raw text again.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Cell {
    Valid(f64),
    #[default]
    Invalid,
}

impl Cell {
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Cell::Valid(value)
        } else {
            Cell::Invalid
        }
    }

    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Invalid;
        }
        trimmed
            .parse::<f64>()
            .map(Cell::from_f64)
            .unwrap_or(Cell::Invalid)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Valid(v) => Some(v),
            Cell::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Cell::Valid(_))
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::from_f64).unwrap_or(Cell::Invalid)
    }
}
