use chrono::NaiveDate;
use common::entities::{DoctorEntity, PatientEntity, StaffEntity, UserEntity};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registration payload. Required keys are validated by hand so a missing
/// one yields `Missing required field: <name>` instead of a serde error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    // patient
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_info: Option<String>,
    // doctor
    pub license_number: Option<String>,
    pub specialization: Option<String>,
    pub years_of_experience: Option<i32>,
    pub qualification: Option<String>,
    pub consultation_fee: Option<f64>,
    // staff family
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Whitelisted profile-update fields; anything else in the body is ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    // patient
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_info: Option<String>,
    // doctor (license_number is deliberately not updatable)
    pub specialization: Option<String>,
    pub years_of_experience: Option<i32>,
    pub qualification: Option<String>,
    pub consultation_fee: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TestReportRequest {
    pub appointment_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub test_name: Option<String>,
    pub test_type: Option<String>,
    pub result: Option<String>,
    pub normal_range: Option<String>,
    pub units: Option<String>,
    pub comments: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VitalSignsRequest {
    pub patient_id: Option<i64>,
    pub blood_pressure_systolic: Option<i32>,
    pub blood_pressure_diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub respiratory_rate: Option<i32>,
    pub temperature: Option<f64>,
    pub oxygen_saturation: Option<f64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub blood_sugar: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MedicalRecordRequest {
    pub patient_id: Option<i64>,
    pub record_type: Option<String>,
    pub description: Option<String>,
    /// RFC3339 or bare ISO-8601 datetime; defaults to now.
    pub date_recorded: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PatientQuery {
    pub patient_id: Option<i64>,
}

/// Base user fields merged with the profile matching the user's role.
#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: UserEntity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<PatientEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_info: Option<DoctorEntity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staff_info: Option<StaffEntity>,
}

impl UserView {
    pub fn base(user: UserEntity) -> Self {
        Self {
            user,
            patient_info: None,
            doctor_info: None,
            staff_info: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::roles::Role;

    fn sample_user(role: Role) -> UserEntity {
        UserEntity {
            id: 9,
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            phone: None,
            address: None,
            date_of_birth: None,
            gender: None,
            role,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn view_flattens_user_and_attaches_patient_info() {
        let mut view = UserView::base(sample_user(Role::Patient));
        view.patient_info = Some(PatientEntity {
            id: 3,
            user_id: 9,
            blood_group: None,
            emergency_contact: None,
            insurance_info: None,
        });

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "patient");
        assert_eq!(json["patient_info"]["id"], 3);
        // registered without a blood group: the key is present but null
        assert!(json["patient_info"]["blood_group"].is_null());
        assert!(json.get("doctor_info").is_none());
        assert!(json.get("staff_info").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn unknown_body_fields_are_ignored() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{"first_name":"New","role":"doctor","is_active":false}"#,
        )
        .unwrap();
        assert_eq!(req.first_name.as_deref(), Some("New"));
        // role and is_active are not whitelisted and silently dropped
    }
}
