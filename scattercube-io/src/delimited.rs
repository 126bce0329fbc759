//! Delimited-text dataset support
//!
//! Reads labeled numeric tables in CSV-like formats:
//! - Auto-detection of delimiters (comma, space, tab, semicolon)
//! - Header detection and parsing
//! - A label column holding either integer class indices or class names
//! - Optional category names supplied by the caller

use crate::error::IoError;
use ndarray::Array2;
use scattercube_core::{Category, Dataset, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Supported delimiters for delimited text files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// Get the character representation of the delimiter
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }
    
    /// Detect delimiter from a line of text
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let counts = [
            (line.matches(',').count(), Delimiter::Comma),
            (line.trim().matches(' ').count(), Delimiter::Space),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.matches(';').count(), Delimiter::Semicolon),
        ];
        
        counts.iter()
            .filter(|(count, _)| *count > 0)
            .max_by_key(|(count, _)| *count)
            .map(|(_, delimiter)| *delimiter)
    }

    /// Split a line into trimmed fields; runs of whitespace count once
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space | Delimiter::Tab => line.split_whitespace().collect(),
            _ => line.split(self.as_char()).map(|s| s.trim()).collect(),
        }
    }
}

/// Which column carries the category label
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelColumn {
    #[default]
    Last,
    Index(usize),
    /// Header name, matched case-insensitively
    Name(String),
}

impl LabelColumn {
    fn resolve(&self, width: usize, header: Option<&[String]>) -> std::result::Result<usize, IoError> {
        let index = match self {
            LabelColumn::Last => width.checked_sub(1),
            LabelColumn::Index(i) => Some(*i),
            LabelColumn::Name(name) => header.and_then(|h| {
                h.iter().position(|column| column.eq_ignore_ascii_case(name))
            }),
        };
        index.filter(|&i| i < width).ok_or_else(|| IoError::InvalidFormat {
            format: format!("label column {:?} not present in {} columns", self, width),
        })
    }
}

/// Reader for labeled numeric tables
#[derive(Debug, Clone, Default)]
pub struct DatasetReader {
    delimiter: Option<Delimiter>,
    has_header: Option<bool>,
    label_column: LabelColumn,
    category_names: Option<Vec<String>>,
}

impl DatasetReader {
    /// Reader with auto-detected delimiter and header, label in the last column
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_label_column(mut self, label_column: LabelColumn) -> Self {
        self.label_column = label_column;
        self
    }

    /// Names for categories `0..n`; string labels must match one of them
    pub fn with_category_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Read a dataset from a file
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let file = File::open(path)?;
        debug!(path = %path.display(), "reading dataset");
        self.read(BufReader::new(file))
    }

    /// Read a dataset from in-memory text
    pub fn read_str(&self, text: &str) -> Result<Dataset> {
        self.read(text.as_bytes())
    }

    /// Read a dataset from any buffered source
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Dataset> {
        let mut lines = Vec::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(IoError::from)?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            lines.push((number + 1, trimmed.to_string()));
        }

        let (_, first) = lines.first().ok_or_else(|| IoError::InvalidFormat {
            format: "no data rows".to_string(),
        })?;

        let delimiter = match self.delimiter {
            Some(d) => d,
            None => Delimiter::detect_from_line(first).ok_or_else(|| IoError::InvalidFormat {
                format: "could not detect delimiter".to_string(),
            })?,
        };

        let first_fields = delimiter.split(first);
        let width = first_fields.len();
        if width < 2 {
            return Err(IoError::InvalidFormat {
                format: "need at least one feature column and one label column".to_string(),
            }
            .into());
        }

        let has_header = self
            .has_header
            .unwrap_or_else(|| Self::is_header_line(&first_fields, &self.label_column));
        let header: Option<Vec<String>> =
            has_header.then(|| first_fields.iter().map(|s| s.to_string()).collect());
        let label_index = self.label_column.resolve(width, header.as_deref())?;

        let rows = if has_header { &lines[1..] } else { &lines[..] };
        let mut values = Vec::with_capacity(rows.len() * (width - 1));
        let mut raw_labels = Vec::with_capacity(rows.len());

        for (number, line) in rows {
            let fields = delimiter.split(line);
            if fields.len() != width {
                return Err(IoError::ParseError {
                    line: *number,
                    message: format!("expected {} fields, found {}", width, fields.len()),
                }
                .into());
            }
            for (i, field) in fields.iter().enumerate() {
                if i == label_index {
                    raw_labels.push((*number, field.to_string()));
                    continue;
                }
                let value = field.parse::<f64>().map_err(|e| IoError::ParseError {
                    line: *number,
                    message: format!("field {} ({:?}): {}", i, field, e),
                })?;
                values.push(value);
            }
        }

        if raw_labels.is_empty() {
            return Err(IoError::InvalidFormat {
                format: "no data rows".to_string(),
            }
            .into());
        }

        let (labels, category_names) = self.intern_labels(&raw_labels)?;
        let features = Array2::from_shape_vec((raw_labels.len(), width - 1), values)
            .map_err(|e| scattercube_core::Error::InvalidData(e.to_string()))?;
        let feature_names = match header {
            Some(h) => h
                .into_iter()
                .enumerate()
                .filter(|(i, _)| *i != label_index)
                .map(|(_, name)| name)
                .collect(),
            None => (0..width - 1).map(|i| format!("f{}", i)).collect(),
        };

        debug!(
            rows = labels.len(),
            features = width - 1,
            categories = category_names.len(),
            header = has_header,
            "parsed dataset"
        );
        Dataset::new(features, labels, feature_names, category_names)
    }

    /// A first line is a header when any feature field is non-numeric
    fn is_header_line(fields: &[&str], label_column: &LabelColumn) -> bool {
        if let LabelColumn::Name(name) = label_column {
            if fields.iter().any(|f| f.eq_ignore_ascii_case(name)) {
                return true;
            }
        }
        let label_index = match label_column {
            LabelColumn::Index(i) => Some(*i),
            LabelColumn::Last => fields.len().checked_sub(1),
            LabelColumn::Name(_) => None,
        };
        fields
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != label_index)
            .any(|(_, f)| f.parse::<f64>().is_err())
    }

    /// Map raw label strings to categories and category names
    fn intern_labels(
        &self,
        raw: &[(usize, String)],
    ) -> std::result::Result<(Vec<Category>, Vec<String>), IoError> {
        let numeric: Option<Vec<usize>> = raw.iter().map(|(_, l)| l.parse::<usize>().ok()).collect();

        if let Some(indices) = numeric {
            // Numeric labels index the given names, or at most one class per row
            let limit = self
                .category_names
                .as_ref()
                .map_or(raw.len(), |names| names.len());
            if let Some(((line, _), index)) = raw
                .iter()
                .zip(&indices)
                .find(|(_, &index)| index >= limit)
            {
                return Err(IoError::ParseError {
                    line: *line,
                    message: format!(
                        "label {} out of range, expected fewer than {} categories",
                        index, limit
                    ),
                });
            }

            let names = match &self.category_names {
                Some(names) => names.clone(),
                None => {
                    let count = indices
                        .iter()
                        .max()
                        .and_then(|m| m.checked_add(1))
                        .unwrap_or(0);
                    (0..count).map(|i| format!("class {}", i)).collect()
                }
            };
            return Ok((indices.into_iter().map(Category).collect(), names));
        }

        let mut names: Vec<String> = self.category_names.clone().unwrap_or_default();
        let fixed = self.category_names.is_some();
        let mut lookup: HashMap<String, usize> =
            names.iter().enumerate().map(|(i, n)| (n.clone(), i)).collect();
        let mut labels = Vec::with_capacity(raw.len());

        for (line, label) in raw {
            let index = match lookup.get(label) {
                Some(&i) => i,
                None if fixed => {
                    return Err(IoError::ParseError {
                        line: *line,
                        message: format!("unknown category {:?}", label),
                    });
                }
                None => {
                    names.push(label.clone());
                    lookup.insert(label.clone(), names.len() - 1);
                    names.len() - 1
                }
            };
            labels.push(Category(index));
        }

        Ok((labels, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(Delimiter::detect_from_line("1,2,3"), Some(Delimiter::Comma));
        assert_eq!(Delimiter::detect_from_line("1 2 3"), Some(Delimiter::Space));
        assert_eq!(Delimiter::detect_from_line("1\t2\t3"), Some(Delimiter::Tab));
        assert_eq!(Delimiter::detect_from_line("1;2;3"), Some(Delimiter::Semicolon));
        assert_eq!(Delimiter::detect_from_line("123"), None);
    }

    #[test]
    fn test_whitespace_runs_split_once() {
        assert_eq!(Delimiter::Space.split("1.0   2.0 0"), vec!["1.0", "2.0", "0"]);
    }

    #[test]
    fn test_header_and_named_labels() {
        let text = "a,b,c,species\n1,2,3,cat\n4,5,6,dog\n7,8,9,cat\n";
        let dataset = DatasetReader::new().read_str(text).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.dimensions(), 3);
        assert_eq!(dataset.feature_names(), &["a", "b", "c"]);
        assert_eq!(dataset.category_names(), &["cat", "dog"]);
        assert_eq!(dataset.labels(), &[Category(0), Category(1), Category(0)]);
        assert_eq!(dataset.row(1).to_vec(), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_headerless_numeric_labels() {
        let text = "5.0 1.0 0.2 0\n7.0 6.0 2.5 1\n6.0 3.5 1.35 2\n";
        let dataset = DatasetReader::new().read_str(text).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.labels(), &[Category(0), Category(1), Category(2)]);
        assert_eq!(dataset.category_names(), &["class 0", "class 1", "class 2"]);
        assert_eq!(dataset.feature_names(), &["f0", "f1", "f2"]);
    }

    #[test]
    fn test_out_of_range_numeric_labels_are_rejected() {
        let result = DatasetReader::new().read_str("1,2,18446744073709551615\n");
        assert!(matches!(result, Err(scattercube_core::Error::Parse(_))));

        let result = DatasetReader::new().read_str("1,2,0\n3,4,4000000000\n");
        assert!(matches!(result, Err(scattercube_core::Error::Parse(_))));

        let result = DatasetReader::new()
            .with_category_names(["a", "b"])
            .read_str("1,2,0\n3,4,2\n");
        assert!(matches!(result, Err(scattercube_core::Error::Parse(_))));
    }

    #[test]
    fn test_label_column_by_name() {
        let text = "kind;x;y\nb;1;2\na;3;4\n";
        let dataset = DatasetReader::new()
            .with_label_column(LabelColumn::Name("KIND".to_string()))
            .with_category_names(["a", "b"])
            .read_str(text)
            .unwrap();

        assert_eq!(dataset.labels(), &[Category(1), Category(0)]);
        assert_eq!(dataset.row(0).to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_unknown_named_category_is_rejected() {
        let text = "1,2,c\n";
        let result = DatasetReader::new()
            .with_category_names(["a", "b"])
            .read_str(text);
        assert!(matches!(result, Err(scattercube_core::Error::Parse(_))));
    }

    #[test]
    fn test_ragged_row_reports_line() {
        let text = "x,y,label\n1,2,0\n3,0\n";
        let err = DatasetReader::new().read_str(text).unwrap_err();
        assert!(err.to_string().contains("line 3"), "{}", err);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# generated\n\n1,2,0\n\n3,4,1\n";
        let dataset = DatasetReader::new().read_str(text).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_read_path() {
        let path = std::env::temp_dir().join("scattercube_read_path.csv");
        fs::write(&path, "x,y,z,label\n1,2,3,0\n4,5,6,1\n").unwrap();

        let dataset = DatasetReader::new().read_path(&path).unwrap();
        assert_eq!(dataset.len(), 2);

        fs::remove_file(&path).unwrap();
        assert!(DatasetReader::new().read_path(&path).is_err());
    }
}
