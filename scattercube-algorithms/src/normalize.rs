//! Min-max feature scaling
//!
//! Rescales every feature column independently so that the smallest value
//! seen while fitting lands on the lower bound of the target range and the
//! largest on the upper bound. Columns with zero variance collapse onto
//! the midpoint of the range.

use itertools::{Itertools, MinMaxResult};
use ndarray::{Array1, Array2};
use scattercube_core::{feature_table, Error, NormalizedPoint, Point3f, Record, Result};
use tracing::debug;

/// Default target range: a unit cube centered on the origin
pub const DEFAULT_RANGE: (f64, f64) = (-0.5, 0.5);

/// Per-column extrema learned by [`MinMaxScaler::fit`]
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBounds {
    pub min: Array1<f64>,
    pub max: Array1<f64>,
}

impl ColumnBounds {
    pub fn dimensions(&self) -> usize {
        self.min.len()
    }
}

/// Linear per-dimension rescaler
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    range: (f64, f64),
    clip: bool,
    bounds: Option<ColumnBounds>,
}

impl MinMaxScaler {
    /// Scaler targeting [`DEFAULT_RANGE`]
    pub fn new() -> Self {
        Self {
            range: DEFAULT_RANGE,
            clip: false,
            bounds: None,
        }
    }

    /// Scaler targeting `[lo, hi]`
    pub fn with_range(lo: f64, hi: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(Error::Configuration(format!(
                "Invalid feature range [{}, {}]",
                lo, hi
            )));
        }
        Ok(Self {
            range: (lo, hi),
            ..Self::new()
        })
    }

    /// Clamp transformed values of unseen data into the target range
    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Bounds learned by the last `fit`, if any
    pub fn bounds(&self) -> Option<&ColumnBounds> {
        self.bounds.as_ref()
    }

    /// Learn per-column minimum and maximum from the training rows
    pub fn fit(&mut self, data: &Array2<f64>) -> Result<&mut Self> {
        if data.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }

        let mut min = Array1::zeros(data.ncols());
        let mut max = Array1::zeros(data.ncols());

        for (d, column) in data.columns().into_iter().enumerate() {
            let (lo, hi) = match column.iter().copied().minmax() {
                MinMaxResult::OneElement(v) => (v, v),
                MinMaxResult::MinMax(lo, hi) => (lo, hi),
                MinMaxResult::NoElements => return Err(Error::EmptyDataset),
            };
            if !(lo.is_finite() && hi.is_finite()) {
                return Err(Error::InvalidData(format!(
                    "Non-finite value in feature column {}",
                    d
                )));
            }
            min[d] = lo;
            max[d] = hi;
        }

        debug!(rows = data.nrows(), dims = data.ncols(), "fitted min-max scaler");
        self.bounds = Some(ColumnBounds { min, max });
        Ok(self)
    }

    /// Rescale rows with the fitted bounds
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>> {
        let bounds = self
            .bounds
            .as_ref()
            .ok_or_else(|| Error::Configuration("MinMaxScaler used before fit".to_string()))?;

        if data.ncols() != bounds.dimensions() {
            return Err(Error::DimensionMismatch {
                index: 0,
                expected: bounds.dimensions(),
                found: data.ncols(),
            });
        }

        let (lo, hi) = self.range;
        let mid = (lo + hi) / 2.0;
        let mut out = data.clone();

        for (d, mut column) in out.columns_mut().into_iter().enumerate() {
            let (min, max) = (bounds.min[d], bounds.max[d]);
            let span = max - min;
            // Bounds near f64::MAX overflow the span; halve both sides instead
            let halved = !span.is_finite();
            column.mapv_inplace(|v| {
                if span == 0.0 {
                    return mid;
                }
                let t = if halved {
                    (v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
                } else {
                    (v - min) / span
                };
                let scaled = t * (hi - lo) + lo;
                if self.clip {
                    scaled.clamp(lo, hi)
                } else {
                    scaled
                }
            });
        }

        Ok(out)
    }

    /// Fit on `data` and rescale it in one step
    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(data)?;
        self.transform(data)
    }
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map 3D records into the `[-0.5, 0.5]` cube, preserving order
pub fn normalize(records: &[Record]) -> Result<Vec<NormalizedPoint>> {
    let data = feature_table(records)?;
    if data.ncols() != 3 {
        return Err(Error::DimensionMismatch {
            index: 0,
            expected: 3,
            found: data.ncols(),
        });
    }

    let scaled = MinMaxScaler::new().fit_transform(&data)?;

    Ok(scaled
        .rows()
        .into_iter()
        .zip(records)
        .map(|(row, record)| {
            NormalizedPoint::new(
                Point3f::new(row[0] as f32, row[1] as f32, row[2] as f32),
                record.category,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::Rng;

    fn reference_records() -> Vec<Record> {
        vec![
            Record::new(vec![5.0, 1.0, 0.2], 0),
            Record::new(vec![7.0, 6.0, 2.5], 1),
            Record::new(vec![6.0, 3.5, 1.35], 2),
        ]
    }

    #[test]
    fn test_extremes_map_to_bounds() {
        let points = normalize(&reference_records()).unwrap();
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0].position, Point3f::new(-0.5, -0.5, -0.5));
        assert_relative_eq!(points[1].position, Point3f::new(0.5, 0.5, 0.5));
        assert_relative_eq!(points[2].position, Point3f::new(0.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_order_and_categories_preserved() {
        let records = reference_records();
        let points = normalize(&records).unwrap();
        for (point, record) in points.iter().zip(&records) {
            assert_eq!(point.category, record.category);
        }
    }

    #[test]
    fn test_zero_variance_maps_to_midpoint() {
        let records = vec![
            Record::new(vec![1.0, 4.0, 9.0], 0),
            Record::new(vec![2.0, 4.0, 8.0], 0),
            Record::new(vec![3.0, 4.0, 7.0], 1),
        ];
        let points = normalize(&records).unwrap();
        for p in &points {
            assert_eq!(p.position.y, 0.0);
        }
        assert_relative_eq!(points[0].position.z, 0.5);
        assert_relative_eq!(points[2].position.z, -0.5);
    }

    #[test]
    fn test_single_record_is_centered() {
        let points = normalize(&[Record::new(vec![3.0, -1.0, 8.0], 0)]).unwrap();
        assert_eq!(points[0].position, Point3f::origin());
    }

    #[test]
    fn test_random_data_stays_in_cube() {
        let mut rng = rand::thread_rng();
        let records: Vec<Record> = (0..200)
            .map(|i| {
                Record::new(
                    vec![
                        rng.gen_range(-100.0..100.0),
                        rng.gen_range(0.0..1e-3),
                        rng.gen_range(1e6..2e6),
                    ],
                    i % 3,
                )
            })
            .collect();

        for p in normalize(&records).unwrap() {
            for d in 0..3 {
                assert!((-0.5..=0.5).contains(&p.position[d]), "{:?}", p.position);
            }
        }
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(normalize(&[]), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_wrong_dimension_is_rejected() {
        let records = vec![Record::new(vec![1.0, 2.0], 0)];
        assert!(matches!(
            normalize(&records),
            Err(Error::DimensionMismatch { expected: 3, found: 2, .. })
        ));
    }

    #[test]
    fn test_scaler_generalizes_to_n_dimensions() {
        let data = array![[0.0, 10.0, 1.0, 5.0, -2.0], [4.0, 20.0, 1.0, 5.0, 2.0]];
        let scaled = MinMaxScaler::new().fit_transform(&data).unwrap();
        assert_eq!(scaled.row(0).to_vec(), vec![-0.5, -0.5, 0.0, 0.0, -0.5]);
        assert_eq!(scaled.row(1).to_vec(), vec![0.5, 0.5, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_transform_unseen_data_with_clip() {
        let mut scaler = MinMaxScaler::with_range(0.0, 1.0).unwrap();
        scaler.fit(&array![[0.0], [10.0]]).unwrap();

        let unseen = array![[20.0], [5.0]];
        assert_relative_eq!(scaler.transform(&unseen).unwrap()[[0, 0]], 2.0);

        let clipped = scaler.clone().with_clip(true).transform(&unseen).unwrap();
        assert_relative_eq!(clipped[[0, 0]], 1.0);
        assert_relative_eq!(clipped[[1, 0]], 0.5);

        assert!(scaler.transform(&array![[1.0, 2.0]]).is_err());
    }

    #[test]
    fn test_extreme_magnitudes_stay_in_cube() {
        let records = vec![
            Record::new(vec![-1e308, 0.0, 0.0], 0),
            Record::new(vec![1e308, 1.0, 1.0], 1),
            Record::new(vec![0.0, 0.5, 0.5], 2),
        ];
        let points = normalize(&records).unwrap();

        for point in &points {
            for c in point.position.iter() {
                assert!((-0.5..=0.5).contains(c), "out of cube: {:?}", point.position);
            }
        }
        assert_relative_eq!(points[0].position.x, -0.5);
        assert_relative_eq!(points[1].position.x, 0.5);
        assert_relative_eq!(points[2].position.x, 0.0);
    }

    #[test]
    fn test_invalid_range_and_unfitted_use() {
        assert!(MinMaxScaler::with_range(1.0, 1.0).is_err());
        assert!(MinMaxScaler::new().transform(&array![[1.0]]).is_err());
    }
}
