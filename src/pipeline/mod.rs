pub mod stage1_resolve;
pub mod stage2_classify;
pub mod stage3_combine;
pub mod stage4_controls;
pub mod stage5_sessions;
pub mod stage6_trends;
pub mod stage7_report;

use crate::model::controls::ControlLayout;
use crate::model::thresholds::ClassificationThresholds;
use crate::targets::TargetLibrary;

/// Read-only inputs shared by every stage. Built once per run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub library: &'a TargetLibrary,
    pub thresholds: ClassificationThresholds,
    pub control_layout: &'a ControlLayout,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(library: &'a TargetLibrary, control_layout: &'a ControlLayout) -> Self {
        Self {
            library,
            thresholds: ClassificationThresholds::default_v1(),
            control_layout,
        }
    }
}
