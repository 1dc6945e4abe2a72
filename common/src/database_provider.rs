use crate::entities::{
    AppointmentEntity, DoctorEntity, MedicalRecordEntity, NewNotification, PatientEntity,
    StaffEntity, TestReportEntity, UserEntity, VitalSignsEntity,
};
use crate::roles::Role;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: Role,
}

/// Role-specific profile row created atomically with the user. Exactly one
/// variant applies per role: Patient, Doctor, or Staff for the whole
/// staff family (`staff_type` mirrors the exact role value).
#[derive(Debug, Clone)]
pub enum NewProfile {
    Patient {
        blood_group: Option<String>,
        emergency_contact: Option<String>,
        insurance_info: Option<String>,
    },
    Doctor {
        license_number: Option<String>,
        specialization: Option<String>,
        years_of_experience: Option<i32>,
        qualification: Option<String>,
        consultation_fee: f64,
    },
    Staff {
        staff_type: Role,
        department: Option<String>,
    },
}

/// Partial update of base user fields. `None` means "leave unchanged";
/// an explicit JSON null in the request collapses to `None` as well, so
/// a stored value cannot be cleared through this path.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PatientUpdate {
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub insurance_info: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorUpdate {
    pub specialization: Option<String>,
    pub years_of_experience: Option<i32>,
    pub qualification: Option<String>,
    pub consultation_fee: Option<f64>,
}

#[derive(Debug, Clone)]
pub enum ProfileUpdate {
    Patient(PatientUpdate),
    Doctor(DoctorUpdate),
    None,
}

#[derive(Debug, Clone)]
pub struct NewTestReport {
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

/// Visibility scope for test-report listings, resolved from the caller's
/// role before the query runs.
#[derive(Debug, Clone, Copy)]
pub enum TestReportScope {
    /// All reports of one patient.
    Patient(i64),
    /// Reports whose appointment belongs to this doctor.
    DoctorAppointments(i64),
    /// Reports personally performed by this user.
    Performer(i64),
}

#[derive(Debug, Clone)]
pub struct NewVitalSigns {
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

#[derive(Debug, Clone)]
pub struct NewMedicalRecord {
    pub patient_id: i64,
    pub record_type: String,
    pub description: String,
    pub date_recorded: DateTime<Utc>,
    pub recorded_by: i64,
}

#[async_trait]
pub trait DbProvider: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserEntity>, DbError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<UserEntity>, DbError>;

    /// Inserts the user and its role profile in one transaction; a partially
    /// created account must never be observable.
    async fn create_user_with_profile(
        &self,
        user: NewUser,
        profile: NewProfile,
    ) -> Result<UserEntity, DbError>;

    /// Applies a partial update to the base user row and, when applicable,
    /// its role profile, in one transaction. Returns the updated user.
    async fn update_user_profile(
        &self,
        user_id: i64,
        base: UserUpdate,
        profile: ProfileUpdate,
    ) -> Result<UserEntity, DbError>;

    async fn get_patient_by_user(&self, user_id: i64) -> Result<Option<PatientEntity>, DbError>;

    async fn get_doctor_by_user(&self, user_id: i64) -> Result<Option<DoctorEntity>, DbError>;

    async fn get_staff_by_user(&self, user_id: i64) -> Result<Option<StaffEntity>, DbError>;

    async fn get_patient(&self, id: i64) -> Result<Option<PatientEntity>, DbError>;

    async fn get_doctor(&self, id: i64) -> Result<Option<DoctorEntity>, DbError>;

    async fn get_appointment(&self, id: i64) -> Result<Option<AppointmentEntity>, DbError>;

    async fn doctor_has_appointment_with(
        &self,
        doctor_id: i64,
        patient_id: i64,
    ) -> Result<bool, DbError>;

    async fn insert_test_report(
        &self,
        report: NewTestReport,
    ) -> Result<TestReportEntity, DbError>;

    /// Reports within the scope, newest completed_date first.
    async fn list_test_reports(
        &self,
        scope: TestReportScope,
    ) -> Result<Vec<TestReportEntity>, DbError>;

    async fn insert_vital_signs(
        &self,
        vitals: NewVitalSigns,
    ) -> Result<VitalSignsEntity, DbError>;

    /// Readings for one patient, newest recorded_at first.
    async fn list_vital_signs(&self, patient_id: i64)
        -> Result<Vec<VitalSignsEntity>, DbError>;

    async fn insert_medical_record(
        &self,
        record: NewMedicalRecord,
    ) -> Result<MedicalRecordEntity, DbError>;

    async fn insert_notification(&self, note: NewNotification) -> Result<(), DbError>;
}
