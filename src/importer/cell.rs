use calamine::Data;

/// A spreadsheet cell reduced to the shapes the importer cares about.
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// Text coercion. Whole numbers render without a fractional part so a
    /// numeric `2` reads back as `"2"`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{:.0}", n),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn trimmed(&self) -> String {
        self.as_text().trim().to_string()
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }

    /// Resolves an answer cell to an option index.
    ///
    /// A single letter `A`-`D` (any case) maps to 0-3, an integer string is
    /// taken as-is, and a numeric cell is floored. Anything else yields -1.
    pub fn as_answer_index(&self) -> i64 {
        match self {
            CellValue::Text(s) => {
                let s = s.trim();
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if ('A'..='D').contains(&c.to_ascii_uppercase()) => {
                        c.to_ascii_uppercase() as i64 - 'A' as i64
                    }
                    _ => s.parse::<i64>().unwrap_or(-1),
                }
            }
            CellValue::Number(n) if n.is_finite() => n.floor() as i64,
            CellValue::Number(_) | CellValue::Empty => -1,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(_) => CellValue::Empty,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}
