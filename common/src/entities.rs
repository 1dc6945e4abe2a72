use crate::roles::Role;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// user.rs
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserEntity {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// patient.rs
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PatientEntity {
    pub id: i64,
    pub user_id: i64,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_info: Option<String>,
}

// doctor.rs
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DoctorEntity {
    pub id: i64,
    pub user_id: i64,
    pub license_number: Option<String>,
    pub specialization: Option<String>,
    pub years_of_experience: Option<i32>,
    pub qualification: Option<String>,
    pub consultation_fee: f64,
}

// staff.rs
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffEntity {
    pub id: i64,
    pub user_id: i64,
    pub staff_type: String,
    pub department: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TestReportEntity {
    pub id: i64,
    pub appointment_id: i64,
    pub patient_id: i64,
    pub test_name: String,
    pub test_type: String,
    pub result: Option<String>,
    pub normal_range: Option<String>,
    pub units: Option<String>,
    pub comments: Option<String>,
    pub performed_by: i64,
    pub status: String,
    pub completed_date: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VitalSignsEntity {
    pub id: i64,
    pub patient_id: i64,
    pub recorded_by: i64,
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
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MedicalRecordEntity {
    pub id: i64,
    pub patient_id: i64,
    pub record_type: String,
    pub description: String,
    pub date_recorded: DateTime<Utc>,
    pub recorded_by: i64,
}

// Appointments are managed elsewhere; clinical records only reference them.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppointmentEntity {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub receiver_id: i64,
    pub sender_id: i64,
    pub notification_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = UserEntity {
            id: 1,
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: None,
            address: None,
            date_of_birth: None,
            gender: None,
            role: Role::Patient,
            is_active: true,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["role"], "patient");
    }
}
