/// Amplitude cut-offs used by the curve classifier.
///
/// A curve is positive strictly above `positive_above` (and only when it carries
/// no anomaly tags), negative strictly below `negative_below`, and indeterminate
/// in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationThresholds {
    pub positive_above: f64,
    pub negative_below: f64,
}

impl ClassificationThresholds {
    pub fn default_v1() -> Self {
        Self {
            positive_above: 500.0,
            negative_below: 400.0,
        }
    }
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}
