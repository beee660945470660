use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationLabel {
    Positive,
    Negative,
    Indeterminate,
}

impl ClassificationLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassificationLabel::Positive => "POSITIVE",
            ClassificationLabel::Negative => "NEGATIVE",
            ClassificationLabel::Indeterminate => "INDETERMINATE",
        }
    }
}

impl std::fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub indeterminate: usize,
}

impl LabelCounts {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = ClassificationLabel>,
    {
        let mut counts = Self::default();
        for label in labels {
            counts.add(label);
        }
        counts
    }

    pub fn add(&mut self, label: ClassificationLabel) {
        self.total += 1;
        match label {
            ClassificationLabel::Positive => self.positive += 1,
            ClassificationLabel::Negative => self.negative += 1,
            ClassificationLabel::Indeterminate => self.indeterminate += 1,
        }
    }

    pub fn merge(&mut self, other: &LabelCounts) {
        self.total += other.total;
        self.positive += other.positive;
        self.negative += other.negative;
        self.indeterminate += other.indeterminate;
    }

    pub fn positive_percentage(&self) -> f64 {
        percentage(self.positive, self.total)
    }
}

pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}
