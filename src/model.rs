//! Synthetic performance model for Spark, SciSpark and ClimateSpark.
//!
//! Each (system, query mode) pair maps the number of queried states to a
//! simulated execution time through a closed-form curve. Curves are evaluated
//! once over the fixed state axis `STATE_MIN..=STATE_MAX` and never change
//! afterwards.
//!
//! # Curve Shapes
//!
//! - Spark: linear, insensitive to query scope
//! - SciSpark: super-quadratic growth, worse on regional queries
//! - ClimateSpark: sub-quadratic growth, faster on regional queries

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Smallest number of queried states on the x-axis.
pub const STATE_MIN: u32 = 1;
/// Largest number of queried states on the x-axis.
pub const STATE_MAX: u32 = 50;
/// Number of samples per curve.
pub const STATE_COUNT: usize = (STATE_MAX - STATE_MIN + 1) as usize;

/// Mode shown when the figure first loads.
pub const INITIAL_MODE: QueryMode = QueryMode::Global;

/// The state axis, `STATE_MIN..=STATE_MAX`.
pub fn states() -> Vec<u32> {
    (STATE_MIN..=STATE_MAX).collect()
}

// ============================================================================
// Systems and Query Modes
// ============================================================================

/// A benchmarked processing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum System {
    Spark,
    SciSpark,
    ClimateSpark,
}

impl System {
    /// All systems, in trace order.
    pub const ALL: [System; 3] = [Self::Spark, Self::SciSpark, Self::ClimateSpark];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Spark => "Spark",
            Self::SciSpark => "SciSpark",
            Self::ClimateSpark => "ClimateSpark",
        }
    }

    /// Position within [`System::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::Spark => 0,
            Self::SciSpark => 1,
            Self::ClimateSpark => 2,
        }
    }
}

/// Spatial scope of a simulated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryMode {
    Global,
    Regional,
}

impl QueryMode {
    /// All modes, in dropdown order.
    pub const ALL: [QueryMode; 2] = [Self::Global, Self::Regional];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Regional => "Regional",
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::Global => 0,
            Self::Regional => 1,
        }
    }
}

// ============================================================================
// Curve Formulas
// ============================================================================

/// Element-wise curve: number of states -> execution time.
pub type CurveFn = fn(f64) -> f64;

#[inline]
fn spark_global(n: f64) -> f64 {
    1.0 + 0.02 * n
}

// Spark barely notices query scope.
#[inline]
fn spark_regional(n: f64) -> f64 {
    1.0 + 0.02 * n
}

#[inline]
fn scispark_global(n: f64) -> f64 {
    1.5 + 0.0005 * n.powf(2.3)
}

#[inline]
fn scispark_regional(n: f64) -> f64 {
    1.8 + 0.0008 * n.powf(2.35)
}

#[inline]
fn climatespark_global(n: f64) -> f64 {
    0.7 + 0.006 * n.powf(1.55)
}

#[inline]
fn climatespark_regional(n: f64) -> f64 {
    0.6 + 0.004 * n.powf(1.45)
}

/// Curve formula for a system under a query mode.
pub fn formula(system: System, mode: QueryMode) -> CurveFn {
    match (system, mode) {
        (System::Spark, QueryMode::Global) => spark_global,
        (System::Spark, QueryMode::Regional) => spark_regional,
        (System::SciSpark, QueryMode::Global) => scispark_global,
        (System::SciSpark, QueryMode::Regional) => scispark_regional,
        (System::ClimateSpark, QueryMode::Global) => climatespark_global,
        (System::ClimateSpark, QueryMode::Regional) => climatespark_regional,
    }
}

/// Simulated execution time for `n` queried states.
#[inline]
pub fn execution_time(system: System, mode: QueryMode, n: u32) -> f64 {
    formula(system, mode)(n as f64)
}

// ============================================================================
// Curves and Dataset
// ============================================================================

/// Execution times sampled at each point of a state axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    values: Vec<f64>,
}

impl Curve {
    /// Evaluate the (system, mode) formula at every state count.
    pub fn generate(system: System, mode: QueryMode, states: &[u32]) -> Self {
        Self {
            values: states.iter().map(|&n| execution_time(system, mode, n)).collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First `len` samples (clamped to the curve length).
    pub fn prefix(&self, len: usize) -> &[f64] {
        &self.values[..len.min(self.values.len())]
    }

    /// Value at `n` queried states, if `n` lies on the default axis.
    pub fn at(&self, n: u32) -> Option<f64> {
        n.checked_sub(STATE_MIN)
            .and_then(|i| self.values.get(i as usize))
            .copied()
    }
}

impl Serialize for Curve {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

/// All six curves over the shared state axis, indexed by mode then system.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    states: Vec<u32>,
    curves: [[Curve; 3]; 2],
}

impl Dataset {
    /// Evaluate every (system, mode) curve over [`states`].
    pub fn generate() -> Self {
        let states = states();
        let curves = QueryMode::ALL
            .map(|mode| System::ALL.map(|system| Curve::generate(system, mode, &states)));
        Self { states, curves }
    }

    pub fn states(&self) -> &[u32] {
        &self.states
    }

    pub fn curve(&self, mode: QueryMode, system: System) -> &Curve {
        &self.curves[mode.index()][system.index()]
    }

    /// The three curves for `mode`, in [`System::ALL`] order.
    pub fn mode(&self, mode: QueryMode) -> [&Curve; 3] {
        let row = &self.curves[mode.index()];
        [&row[0], &row[1], &row[2]]
    }

    /// One CSV row per (mode, state) pair, modes in dropdown order.
    pub fn rows(&self) -> Vec<DatasetRow> {
        let mut rows = Vec::with_capacity(QueryMode::ALL.len() * STATE_COUNT);
        for mode in QueryMode::ALL {
            let [spark, scispark, climatespark] = self.mode(mode);
            for (i, &state) in self.states.iter().enumerate() {
                rows.push(DatasetRow {
                    state,
                    mode,
                    spark: spark.values()[i],
                    scispark: scispark.values()[i],
                    climatespark: climatespark.values()[i],
                });
            }
        }
        rows
    }
}

/// Serializes as `{"states": [...], "Global": {"Spark": [...], ...}, "Regional": {...}}`.
impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + QueryMode::ALL.len()))?;
        map.serialize_entry("states", &self.states)?;
        for mode in QueryMode::ALL {
            map.serialize_entry(mode.name(), &ModeCurves { dataset: self, mode })?;
        }
        map.end()
    }
}

struct ModeCurves<'a> {
    dataset: &'a Dataset,
    mode: QueryMode,
}

impl Serialize for ModeCurves<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(System::ALL.len()))?;
        for system in System::ALL {
            map.serialize_entry(system.name(), self.dataset.curve(self.mode, system))?;
        }
        map.end()
    }
}

/// Execution times of all systems at one state count.
#[derive(Debug, Clone, Copy)]
pub struct DatasetRow {
    pub state: u32,
    pub mode: QueryMode,
    pub spark: f64,
    pub scispark: f64,
    pub climatespark: f64,
}

impl DatasetRow {
    /// CSV header.
    pub fn csv_header() -> &'static str {
        "state,mode,spark,scispark,climatespark"
    }

    /// Format as CSV row.
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{:.6},{:.6},{:.6}",
            self.state,
            self.mode.name(),
            self.spark,
            self.scispark,
            self.climatespark
        )
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Line dash pattern, using plotly's names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dot,
    Dash,
}

impl Dash {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dot => "dot",
            Self::Dash => "dash",
        }
    }
}

/// Visual style of one system's trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: &'static str,
    pub marker_size: u32,
    pub dash: Dash,
}

impl Style {
    pub fn for_system(system: System) -> Self {
        match system {
            System::Spark => Self { color: "#1f77b4", marker_size: 9, dash: Dash::Solid },
            System::SciSpark => Self { color: "#d62728", marker_size: 9, dash: Dash::Dot },
            System::ClimateSpark => Self { color: "#2ca02c", marker_size: 9, dash: Dash::Dash },
        }
    }
}

/// Styles for all systems, in [`System::ALL`] order.
pub fn styles() -> [Style; 3] {
    System::ALL.map(Style::for_system)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_axis() {
        let s = states();
        assert_eq!(s.len(), STATE_COUNT);
        assert_eq!(s.first(), Some(&1));
        assert_eq!(s.last(), Some(&50));
    }

    #[test]
    fn test_climatespark_global_at_ten() {
        let t = execution_time(System::ClimateSpark, QueryMode::Global, 10);
        // 0.7 + 0.006 * 10^1.55
        assert!((t - 0.9129).abs() < 1e-3, "got {}", t);
    }

    #[test]
    fn test_spark_linear() {
        assert!((execution_time(System::Spark, QueryMode::Global, 1) - 1.02).abs() < 1e-12);
        assert!((execution_time(System::Spark, QueryMode::Global, 50) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_order_matches_index() {
        for (i, system) in System::ALL.iter().enumerate() {
            assert_eq!(system.index(), i);
        }
        for (i, mode) in QueryMode::ALL.iter().enumerate() {
            assert_eq!(mode.index(), i);
        }
        assert_eq!(INITIAL_MODE, QueryMode::ALL[0]);
    }

    #[test]
    fn test_generate_uses_execution_time() {
        let curve = Curve::generate(System::SciSpark, QueryMode::Regional, &[3, 7]);
        assert_eq!(
            curve.values(),
            [
                execution_time(System::SciSpark, QueryMode::Regional, 3),
                execution_time(System::SciSpark, QueryMode::Regional, 7),
            ]
        );
    }

    #[test]
    fn test_curve_at_and_prefix() {
        let dataset = Dataset::generate();
        let curve = dataset.curve(QueryMode::Regional, System::SciSpark);
        assert_eq!(curve.at(1), Some(curve.values()[0]));
        assert_eq!(curve.at(50), Some(curve.values()[49]));
        assert_eq!(curve.at(0), None);
        assert_eq!(curve.at(51), None);
        assert_eq!(curve.prefix(3).len(), 3);
        assert_eq!(curve.prefix(500).len(), STATE_COUNT);
    }

    #[test]
    fn test_rows_and_csv() {
        let rows = Dataset::generate().rows();
        assert_eq!(rows.len(), 2 * STATE_COUNT);
        assert_eq!(rows[0].mode, QueryMode::Global);
        assert_eq!(rows[STATE_COUNT].mode, QueryMode::Regional);
        assert!(rows[0].to_csv().starts_with("1,Global,1.020000,"));
        assert_eq!(DatasetRow::csv_header().split(',').count(), rows[0].to_csv().split(',').count());
    }

    #[test]
    fn test_dataset_json_shape() {
        let value = serde_json::to_value(Dataset::generate()).unwrap();
        assert_eq!(value["states"].as_array().unwrap().len(), STATE_COUNT);
        for mode in QueryMode::ALL {
            for system in System::ALL {
                let ys = value[mode.name()][system.name()].as_array().unwrap();
                assert_eq!(ys.len(), STATE_COUNT);
            }
        }
    }

    #[test]
    fn test_styles_distinct() {
        let s = styles();
        assert_ne!(s[0].color, s[1].color);
        assert_ne!(s[1].color, s[2].color);
        assert_ne!(s[0].dash, s[1].dash);
        assert_ne!(s[1].dash, s[2].dash);
        assert!(s.iter().all(|style| style.marker_size == 9));
    }
}
