use crate::db::models::{
    DamageType, Feedback, ImageRow, JobReport, RepairEstimate, SeverityLevel, TruckSection,
    Vehicle, VehiclePart,
};
use serde::Serialize;

/// An uploaded damage photograph with its label associations resolved.
#[derive(Debug, Clone, Serialize)]
pub struct LabeledImage {
    #[serde(flatten)]
    pub image: ImageRow,
    pub section: Option<TruckSection>,
    pub severity: Option<SeverityLevel>,
    pub parts: Vec<VehiclePart>,
    pub damage_types: Vec<DamageType>,
}

/// A job with everything the inspection UI shows: the decoded vehicle, the
/// labeled photographs, estimates newest-first and expert-correction feedback.
#[derive(Debug, Clone, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: JobReport,
    pub vehicle: Option<Vehicle>,
    pub images: Vec<LabeledImage>,
    pub estimates: Vec<RepairEstimate>,
    pub corrections: Vec<Feedback>,
}
