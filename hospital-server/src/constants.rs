pub const AUTH_TAG: &str = "identity";
pub const MEDICAL_TAG: &str = "clinical-records";
