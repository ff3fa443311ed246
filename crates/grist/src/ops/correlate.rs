//! Pairwise Pearson correlation over numeric columns.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};

/// Correlation coefficient for one unordered column pair.
#[derive(Debug, Clone, Serialize)]
pub struct PairCorrelation {
    pub left: String,
    pub right: String,
    /// `None` when the coefficient is undefined (fewer than 2 complete pairs
    /// or zero variance in the complete-pair subset).
    pub r: Option<f64>,
}

/// Pearson's r for every unordered pair among the requested columns, using
/// pairwise-complete observations: a row counts for a pair only when both
/// columns hold a non-null number there.
pub fn correlation(dataset: &Dataset, columns: &[String]) -> Result<Vec<PairCorrelation>> {
    if columns.len() < 2 {
        return Err(EngineError::InvalidRequest(
            "correlation requires at least 2 columns".to_string(),
        ));
    }

    // Resolve and validate every column up front: existence first, then a
    // total absence of numeric data, which is a hard error per column.
    let mut resolved = Vec::with_capacity(columns.len());
    for name in columns {
        let col = dataset.column(name)?;
        if !col.values.iter().any(|c| c.as_number().is_some()) {
            return Err(EngineError::NonNumericColumn(name.clone()));
        }
        resolved.push(col);
    }

    let mut pairs = Vec::new();
    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            let (xs, ys): (Vec<f64>, Vec<f64>) = resolved[i]
                .values
                .iter()
                .zip(&resolved[j].values)
                .filter_map(|(a, b)| Some((a.as_number()?, b.as_number()?)))
                .unzip();

            pairs.push(PairCorrelation {
                left: resolved[i].name.clone(),
                right: resolved[j].name.clone(),
                r: pearson(&xs, &ys),
            });
        }
    }

    Ok(pairs)
}

/// Sample Pearson coefficient; `None` when undefined rather than NaN/Inf.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 {
        return None;
    }

    let nf = n as f64;
    let mx = xs.iter().sum::<f64>() / nf;
    let my = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    // The (n−1) normalization cancels in the ratio; only zero variance makes
    // the coefficient undefined.
    if vx == 0.0 || vy == 0.0 {
        return None;
    }
    Some(cov / (vx.sqrt() * vy.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_str;

    #[test]
    fn test_self_correlation_is_one() {
        let ds = load_str("a,b\n1,1\n2,2\n3,3\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "a".into()]).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].r.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative() {
        let ds = load_str("a,b\n1,3\n2,2\n3,1\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "b".into()]).unwrap();
        assert!((pairs[0].r.unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        // Row 2 is incomplete for the (a, b) pair and must be excluded.
        let ds = load_str("a,b\n1,2\n2,\n3,6\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "b".into()]).unwrap();
        assert!((pairs[0].r.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_undefined() {
        let ds = load_str("a,b\n1,5\n2,5\n3,5\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "b".into()]).unwrap();
        assert!(pairs[0].r.is_none());
    }

    #[test]
    fn test_too_few_complete_pairs_undefined() {
        let ds = load_str("a,b\n1,2\n2,\n3,\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "b".into()]).unwrap();
        assert!(pairs[0].r.is_none());
    }

    #[test]
    fn test_all_unordered_pairs() {
        let ds = load_str("a,b,c\n1,2,3\n2,4,5\n3,6,9\n").unwrap();
        let pairs = correlation(&ds, &["a".into(), "b".into(), "c".into()]).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!((pairs[0].left.as_str(), pairs[0].right.as_str()), ("a", "b"));
        assert_eq!((pairs[2].left.as_str(), pairs[2].right.as_str()), ("b", "c"));
    }

    #[test]
    fn test_fewer_than_two_columns() {
        let ds = load_str("a\n1\n").unwrap();
        let err = correlation(&ds, &["a".into()]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRequest(_)));
    }

    #[test]
    fn test_non_numeric_column_rejected() {
        let ds = load_str("a,name\n1,x\n2,y\n").unwrap();
        let err = correlation(&ds, &["a".into(), "name".into()]).unwrap_err();
        assert!(matches!(err, EngineError::NonNumericColumn(_)));
    }
}
