//! Capability report for one parameter against its specification limits

use std::fmt;

use serde::{Deserialize, Serialize};
use spc_core::config::CapabilityConfig;
use spc_core::moments;
use spc_core::{Result, TabularDataset};

use crate::indices::{classify, CapabilityClass, CapabilityIndex, CapabilityIndices};
use crate::limits::SpecLimits;

/// Minimum number of measurements for a capability report
pub const MIN_CAPABILITY_SAMPLES: usize = 2;

/// Control-chart framing chosen for presentation
///
/// Only the framing changes; the formulas behind the report do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartStyle {
    /// Individual measurements (small samples)
    Individuals,
    /// Subgroup averages (large samples)
    SubgroupAverages,
}

/// Capability of one parameter against its specification limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityReport {
    pub mean: f64,
    /// Sample standard deviation (n − 1)
    pub std_dev: f64,
    pub cp: CapabilityIndex,
    pub cpu: CapabilityIndex,
    pub cpl: CapabilityIndex,
    pub cpk: CapabilityIndex,
    pub ppk: CapabilityIndex,
    pub cpm: CapabilityIndex,
    /// mean + 3σ
    pub ucl: f64,
    /// mean − 3σ
    pub lcl: f64,
    pub sample_size: usize,
    pub within_spec_count: usize,
    pub out_of_spec_count: usize,
    pub classification: CapabilityClass,
    pub chart_style: ChartStyle,
    pub limits: SpecLimits,
}

impl CapabilityReport {
    /// Share of measurements inside [LSL, USL], in percent
    pub fn percent_within_spec(&self) -> f64 {
        if self.sample_size == 0 {
            0.0
        } else {
            100.0 * self.within_spec_count as f64 / self.sample_size as f64
        }
    }
}

impl fmt::Display for CapabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Capability Report:")?;
        writeln!(f, "  n={}, mean={:.4}, sd={:.4}", self.sample_size, self.mean, self.std_dev)?;
        writeln!(f, "  Cp={}, Cpk={}, Ppk={}, Cpm={}", self.cp, self.cpk, self.ppk, self.cpm)?;
        writeln!(f, "  UCL={:.4}, LCL={:.4}", self.ucl, self.lcl)?;
        writeln!(
            f,
            "  within spec={} ({:.1}%), out of spec={}",
            self.within_spec_count,
            self.percent_within_spec(),
            self.out_of_spec_count
        )?;
        write!(f, "  Classification: {}", self.classification)
    }
}

/// Result of a capability analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CapabilityOutcome {
    /// Enough measurements to compute a report
    Report(CapabilityReport),
    /// Fewer than two usable measurements
    InsufficientSample { sample_size: usize },
}

impl CapabilityOutcome {
    /// Get the report, if one was produced
    pub fn report(&self) -> Option<&CapabilityReport> {
        match self {
            CapabilityOutcome::Report(report) => Some(report),
            CapabilityOutcome::InsufficientSample { .. } => None,
        }
    }

    /// Consume the outcome into its report
    pub fn into_report(self) -> Option<CapabilityReport> {
        match self {
            CapabilityOutcome::Report(report) => Some(report),
            CapabilityOutcome::InsufficientSample { .. } => None,
        }
    }
}

/// Capability analyzer with configurable classification thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityAnalyzer {
    config: CapabilityConfig,
}

impl CapabilityAnalyzer {
    /// Create an analyzer with the given thresholds
    pub fn new(config: CapabilityConfig) -> Self {
        Self { config }
    }

    /// Chart framing for a sample size
    pub fn chart_style(&self, sample_size: usize) -> ChartStyle {
        if sample_size > self.config.subgroup_chart_min_samples {
            ChartStyle::SubgroupAverages
        } else {
            ChartStyle::Individuals
        }
    }

    fn insufficient(sample_size: usize) -> CapabilityOutcome {
        tracing::debug!(sample_size, "Capability analysis skipped: insufficient sample");
        CapabilityOutcome::InsufficientSample { sample_size }
    }

    /// Analyze measurements of one parameter
    ///
    /// Non-finite measurements are ignored.
    ///
    /// # Errors
    ///
    /// Only invalid specification limits are an error; a short sample is
    /// reported as [`CapabilityOutcome::InsufficientSample`].
    pub fn analyze(&self, values: &[f64], limits: &SpecLimits) -> Result<CapabilityOutcome> {
        limits.validate()?;

        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let sample_size = values.len();
        if sample_size < MIN_CAPABILITY_SAMPLES {
            return Ok(Self::insufficient(sample_size));
        }
        let (Some(mean), Some(variance)) = (
            moments::mean(&values),
            moments::sample_variance(&values),
        ) else {
            return Ok(Self::insufficient(sample_size));
        };
        let std_dev = variance.sqrt();

        let indices = CapabilityIndices::compute(mean, std_dev, limits);
        let within_spec_count = values.iter().filter(|&&v| limits.contains(v)).count();

        Ok(CapabilityOutcome::Report(CapabilityReport {
            mean,
            std_dev,
            cp: indices.cp,
            cpu: indices.cpu,
            cpl: indices.cpl,
            cpk: indices.cpk,
            ppk: indices.ppk,
            cpm: indices.cpm,
            ucl: mean + 3.0 * std_dev,
            lcl: mean - 3.0 * std_dev,
            sample_size,
            within_spec_count,
            out_of_spec_count: sample_size - within_spec_count,
            classification: classify(indices.cpk, &self.config),
            chart_style: self.chart_style(sample_size),
            limits: *limits,
        }))
    }

    /// Analyze a parameter column of a dataset, optionally restricted to a row subset
    ///
    /// # Errors
    ///
    /// Returns [`spc_core::Error::InvalidColumn`] when the column is missing,
    /// or an invalid-parameter error for bad limits.
    pub fn analyze_column(
        &self,
        dataset: &TabularDataset,
        column: &str,
        rows: Option<&[usize]>,
        limits: &SpecLimits,
    ) -> Result<CapabilityOutcome> {
        let values = match rows {
            Some(rows) => dataset.numeric_values_in_rows(column, rows)?,
            None => dataset.numeric_values(column)?,
        };
        self.analyze(&values, limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spc_core::Value;

    fn limits() -> SpecLimits {
        SpecLimits::new(9.0, 11.0).unwrap()
    }

    #[test]
    fn test_basic_report() {
        let data = [9.5, 10.0, 10.2, 9.8, 10.1, 10.3, 9.9, 10.0, 11.5];
        let report = CapabilityAnalyzer::default()
            .analyze(&data, &limits())
            .unwrap()
            .into_report()
            .unwrap();

        assert_eq!(report.sample_size, 9);
        assert_eq!(report.within_spec_count, 8);
        assert_eq!(report.out_of_spec_count, 1);
        assert_relative_eq!(report.ucl, report.mean + 3.0 * report.std_dev);
        assert_relative_eq!(report.lcl, report.mean - 3.0 * report.std_dev);
        assert_eq!(report.ppk, report.cpk);
        assert_eq!(report.chart_style, ChartStyle::Individuals);
        assert_relative_eq!(report.percent_within_spec(), 800.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_dev_used() {
        let report = CapabilityAnalyzer::default()
            .analyze(&[9.0, 11.0], &limits())
            .unwrap()
            .into_report()
            .unwrap();
        // sample sd of [9, 11] is √2, not 1
        assert_relative_eq!(report.std_dev, 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_insufficient_sample() {
        let analyzer = CapabilityAnalyzer::default();
        assert_eq!(
            analyzer.analyze(&[10.0], &limits()).unwrap(),
            CapabilityOutcome::InsufficientSample { sample_size: 1 }
        );
        assert_eq!(
            analyzer.analyze(&[f64::NAN, 10.0], &limits()).unwrap(),
            CapabilityOutcome::InsufficientSample { sample_size: 1 }
        );
        assert!(analyzer.analyze(&[], &limits()).unwrap().report().is_none());
    }

    #[test]
    fn test_constant_measurements() {
        let report = CapabilityAnalyzer::default()
            .analyze(&[10.0; 5], &limits())
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.std_dev, 0.0);
        assert!(report.cp.is_not_computable());
        assert!(report.cpk.is_not_computable());
        assert_eq!(report.classification, CapabilityClass::NotComputable);
        assert_eq!(report.ucl, 10.0);
        assert_eq!(report.within_spec_count, 5);
    }

    #[test]
    fn test_constant_decimal_measurements() {
        let limits = SpecLimits::new(0.0, 1.0).unwrap();
        let report = CapabilityAnalyzer::default()
            .analyze(&[0.1, 0.1, 0.1], &limits)
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(report.mean, 0.1);
        assert_eq!(report.std_dev, 0.0);
        assert!(report.cp.is_not_computable());
        assert!(report.cpk.is_not_computable());
        assert!(report.cpm.is_not_computable());
        assert_eq!(report.classification, CapabilityClass::NotComputable);
    }

    #[test]
    fn test_chart_style_threshold() {
        let analyzer = CapabilityAnalyzer::default();
        assert_eq!(analyzer.chart_style(30), ChartStyle::Individuals);
        assert_eq!(analyzer.chart_style(31), ChartStyle::SubgroupAverages);
    }

    #[test]
    fn test_invalid_limits_rejected() {
        let bad = SpecLimits {
            lower_spec_limit: 5.0,
            upper_spec_limit: 1.0,
            target: 3.0,
        };
        assert!(CapabilityAnalyzer::default().analyze(&[1.0, 2.0], &bad).is_err());
    }

    #[test]
    fn test_analyze_column_with_row_subset() {
        let ds = TabularDataset::from_columns(vec![
            ("width", vec![Value::from(10.0), Value::from(10.4), Value::from(50.0), Value::from(9.6)]),
        ])
        .unwrap();
        let analyzer = CapabilityAnalyzer::default();

        let subset = analyzer
            .analyze_column(&ds, "width", Some(&[0, 1, 3]), &limits())
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(subset.sample_size, 3);
        assert_eq!(subset.out_of_spec_count, 0);

        let all = analyzer
            .analyze_column(&ds, "width", None, &limits())
            .unwrap()
            .into_report()
            .unwrap();
        assert_eq!(all.out_of_spec_count, 1);

        assert!(analyzer.analyze_column(&ds, "height", None, &limits()).is_err());
    }
}
