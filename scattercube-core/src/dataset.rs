//! Labeled dataset container

use crate::error::{Error, Result};
use crate::point::{Category, Record};
use ndarray::{Array2, ArrayView1, Axis};

/// A fixed-width table of numeric features with one category per row
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Vec<Category>,
    feature_names: Vec<String>,
    category_names: Vec<String>,
}

impl Dataset {
    /// Create a dataset, validating shape, labels and values
    pub fn new(
        features: Array2<f64>,
        labels: Vec<Category>,
        feature_names: Vec<String>,
        category_names: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(Error::InvalidData(format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            )));
        }

        if feature_names.len() != features.ncols() {
            return Err(Error::InvalidData(format!(
                "{} feature columns but {} feature names",
                features.ncols(),
                feature_names.len()
            )));
        }

        if let Some((row, _)) = features
            .rows()
            .into_iter()
            .enumerate()
            .find(|(_, row)| row.iter().any(|v| !v.is_finite()))
        {
            return Err(Error::InvalidData(format!("Non-finite feature value in row {}", row)));
        }

        if let Some(label) = labels.iter().find(|c| c.index() >= category_names.len()) {
            return Err(Error::InvalidData(format!(
                "Category {} has no name ({} names given)",
                label,
                category_names.len()
            )));
        }

        Ok(Self {
            features,
            labels,
            feature_names,
            category_names,
        })
    }

    /// Build a dataset from records, naming features `f0..fN`
    pub fn from_records(records: &[Record], category_names: Vec<String>) -> Result<Self> {
        let features = feature_table(records)?;
        let labels = records.iter().map(|r| r.category).collect();
        let feature_names = (0..features.ncols()).map(|i| format!("f{}", i)).collect();

        Self::new(features, labels, feature_names, category_names)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of feature columns
    pub fn dimensions(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn labels(&self) -> &[Category] {
        &self.labels
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn category_names(&self) -> &[String] {
        &self.category_names
    }

    /// Distinct categories in ascending order
    pub fn categories(&self) -> Vec<Category> {
        (0..self.category_names.len()).map(Category).collect()
    }

    /// Feature row of record `index`
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.features.row(index)
    }

    /// Keep only the given feature columns, in the given order
    pub fn select_features(&self, columns: &[usize]) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidData("No feature columns selected".to_string()));
        }
        if let Some(&bad) = columns.iter().find(|&&c| c >= self.dimensions()) {
            return Err(Error::InvalidData(format!(
                "Feature column {} out of range (dataset has {})",
                bad,
                self.dimensions()
            )));
        }

        let features = self.features.select(Axis(1), columns);
        let feature_names = columns.iter().map(|&c| self.feature_names[c].clone()).collect();

        Ok(Self {
            features,
            labels: self.labels.clone(),
            feature_names,
            category_names: self.category_names.clone(),
        })
    }

    /// Materialize rows as records, in row order
    pub fn records(&self) -> Vec<Record> {
        self.features
            .rows()
            .into_iter()
            .zip(&self.labels)
            .map(|(row, &category)| Record {
                features: row.to_vec(),
                category,
            })
            .collect()
    }

    /// Number of rows carrying the given category
    pub fn count_category(&self, category: Category) -> usize {
        self.labels.iter().filter(|&&c| c == category).count()
    }
}

/// Stack record feature vectors into a row-major table
pub fn feature_table(records: &[Record]) -> Result<Array2<f64>> {
    let first = records.first().ok_or(Error::EmptyDataset)?;
    let dims = first.dimensions();

    let mut values = Vec::with_capacity(records.len() * dims);
    for (index, record) in records.iter().enumerate() {
        if record.dimensions() != dims {
            return Err(Error::DimensionMismatch {
                index,
                expected: dims,
                found: record.dimensions(),
            });
        }
        values.extend_from_slice(&record.features);
    }

    Array2::from_shape_vec((records.len(), dims), values)
        .map_err(|e| Error::InvalidData(e.to_string()))
}
