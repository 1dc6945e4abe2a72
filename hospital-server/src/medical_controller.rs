use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::json;
use slog::{info, warn};

use crate::api_error::ApiError;
use crate::api_models::{MedicalRecordRequest, PatientQuery, TestReportRequest, VitalSignsRequest};
use crate::common_utils::current_user;
use crate::constants::MEDICAL_TAG;
use crate::AppState;
use common::database_provider::{
    NewMedicalRecord, NewTestReport, NewVitalSigns, TestReportScope,
};
use common::entities::{NewNotification, TestReportEntity, UserEntity};
use common::roles::{Operation, Role};

const REPORT_STATUS_COMPLETED: &str = "completed";

/// Accepts RFC3339 as well as bare ISO-8601 local datetimes.
fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Notifies the patient and the appointment's doctor that a report is
/// ready. Fire-and-forget: an unresolved appointment or a failed insert is
/// logged and swallowed, never failing the upload.
async fn notify_report_ready(state: &AppState, report: &TestReportEntity, actor: &UserEntity) {
    let log = &state.log;

    let appointment = match state.db.get_appointment(report.appointment_id).await {
        Ok(Some(appointment)) => appointment,
        Ok(None) => return,
        Err(e) => {
            warn!(log, "appointment lookup failed, skipping notifications";
                  "appointment_id" => report.appointment_id, "error" => format!("{}", e));
            return;
        }
    };

    let patient = match state.db.get_patient(appointment.patient_id).await {
        Ok(Some(patient)) => patient,
        _ => return,
    };
    let doctor = match state.db.get_doctor(appointment.doctor_id).await {
        Ok(Some(doctor)) => doctor,
        _ => return,
    };
    let patient_first_name = match state.db.find_user_by_id(patient.user_id).await {
        Ok(Some(user)) => user.first_name,
        _ => return,
    };

    let to_patient = NewNotification {
        title: "Test Report Available".to_string(),
        message: format!("Your {} test results are available", report.test_name),
        receiver_id: patient.user_id,
        sender_id: actor.id,
        notification_type: "test_report".to_string(),
    };
    if let Err(e) = state.notifier.notify(to_patient).await {
        warn!(log, "patient notification failed"; "error" => format!("{}", e));
    }

    let to_doctor = NewNotification {
        title: "Test Report Available".to_string(),
        message: format!("Test results for {} are available", patient_first_name),
        receiver_id: doctor.user_id,
        sender_id: actor.id,
        notification_type: "test_report".to_string(),
    };
    if let Err(e) = state.notifier.notify(to_doctor).await {
        warn!(log, "doctor notification failed"; "error" => format!("{}", e));
    }
}

#[utoipa::path(
    post,
    request_body = TestReportRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 201, description = "Test report stored as completed"),
        (status = 400, description = "Missing required field"),
        (status = 403, description = "Caller is neither lab technician nor doctor")
    ),
    tag = MEDICAL_TAG,
    description = "Upload a completed lab test report",
)]
#[post("/test-reports")]
pub async fn upload_test_report(
    req: HttpRequest,
    body: web::Json<TestReportRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;
    if !user.role.may(Operation::UploadTestReport) {
        return Err(ApiError::Forbidden);
    }

    let data = body.into_inner();
    let appointment_id = data
        .appointment_id
        .ok_or(ApiError::MissingField("appointment_id"))?;
    let patient_id = data.patient_id.ok_or(ApiError::MissingField("patient_id"))?;
    let test_name = data.test_name.ok_or(ApiError::MissingField("test_name"))?;
    let test_type = data.test_type.ok_or(ApiError::MissingField("test_type"))?;

    let report = app_state
        .db
        .insert_test_report(NewTestReport {
            appointment_id,
            patient_id,
            test_name,
            test_type,
            result: data.result,
            normal_range: data.normal_range,
            units: data.units,
            comments: data.comments,
            performed_by: user.id,
            status: REPORT_STATUS_COMPLETED.to_string(),
            completed_date: Utc::now(),
        })
        .await?;

    info!(app_state.log, "test report uploaded";
          "report_id" => report.id, "patient_id" => report.patient_id, "performed_by" => user.id);

    notify_report_ready(&app_state, &report, &user).await;

    Ok(HttpResponse::Created().json(json!({
        "message": "Test report uploaded successfully",
        "test_report": report,
    })))
}

#[utoipa::path(
    get,
    params(
        ("patient_id" = Option<i64>, Query, description = "Restrict to one patient (doctors only)"),
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 200, description = "Reports visible to the caller, newest first"),
        (status = 403, description = "Role has no test-report visibility")
    ),
    tag = MEDICAL_TAG,
    description = "List test reports under role-scoped visibility",
)]
#[get("/test-reports")]
pub async fn get_test_reports(
    req: HttpRequest,
    query: web::Query<PatientQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;

    let scope = match user.role {
        Role::Patient => {
            let patient = app_state
                .db
                .get_patient_by_user(user.id)
                .await?
                .ok_or(ApiError::NotFound("Patient profile not found"))?;
            TestReportScope::Patient(patient.id)
        }
        Role::Doctor => {
            let doctor = app_state
                .db
                .get_doctor_by_user(user.id)
                .await?
                .ok_or(ApiError::NotFound("Doctor profile not found"))?;
            match query.patient_id {
                Some(patient_id) => {
                    // only patients the doctor actually treats
                    if !app_state
                        .db
                        .doctor_has_appointment_with(doctor.id, patient_id)
                        .await?
                    {
                        return Err(ApiError::Forbidden);
                    }
                    TestReportScope::Patient(patient_id)
                }
                None => TestReportScope::DoctorAppointments(doctor.id),
            }
        }
        Role::LabTechnician => TestReportScope::Performer(user.id),
        _ => return Err(ApiError::Forbidden),
    };

    let reports = app_state.db.list_test_reports(scope).await?;
    Ok(HttpResponse::Ok().json(json!({ "test_reports": reports })))
}

#[utoipa::path(
    post,
    request_body = VitalSignsRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 201, description = "Vital signs recorded"),
        (status = 400, description = "Missing patient_id"),
        (status = 403, description = "Caller is neither nurse nor doctor")
    ),
    tag = MEDICAL_TAG,
    description = "Record a point-in-time vitals reading; all measurements optional",
)]
#[post("/vital-signs")]
pub async fn record_vital_signs(
    req: HttpRequest,
    body: web::Json<VitalSignsRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;
    if !user.role.may(Operation::RecordVitalSigns) {
        return Err(ApiError::Forbidden);
    }

    let data = body.into_inner();
    let patient_id = data.patient_id.ok_or(ApiError::MissingField("patient_id"))?;

    let vitals = app_state
        .db
        .insert_vital_signs(NewVitalSigns {
            patient_id,
            recorded_by: user.id,
            blood_pressure_systolic: data.blood_pressure_systolic,
            blood_pressure_diastolic: data.blood_pressure_diastolic,
            heart_rate: data.heart_rate,
            respiratory_rate: data.respiratory_rate,
            temperature: data.temperature,
            oxygen_saturation: data.oxygen_saturation,
            weight: data.weight,
            height: data.height,
            blood_sugar: data.blood_sugar,
            notes: data.notes,
            recorded_at: Utc::now(),
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Vital signs recorded successfully",
        "vital_signs": vitals,
    })))
}

#[utoipa::path(
    get,
    params(
        ("patient_id" = Option<i64>, Query, description = "Required for doctors and nurses"),
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 200, description = "Readings visible to the caller, newest first"),
        (status = 400, description = "patient_id missing for doctor/nurse"),
        (status = 403, description = "Role has no vitals visibility")
    ),
    tag = MEDICAL_TAG,
    description = "List vital signs under role-scoped visibility",
)]
#[get("/vital-signs")]
pub async fn get_vital_signs(
    req: HttpRequest,
    query: web::Query<PatientQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;

    let patient_id = match user.role {
        Role::Patient => {
            let patient = app_state
                .db
                .get_patient_by_user(user.id)
                .await?
                .ok_or(ApiError::NotFound("Patient profile not found"))?;
            patient.id
        }
        Role::Doctor | Role::Nurse => query
            .patient_id
            .ok_or_else(|| ApiError::Validation("Patient ID is required".to_string()))?,
        _ => return Err(ApiError::Forbidden),
    };

    let readings = app_state.db.list_vital_signs(patient_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "vital_signs": readings })))
}

#[utoipa::path(
    post,
    request_body = MedicalRecordRequest,
    params(
        ("Authorization" = String, Header, description = "Bearer access token")
    ),
    responses(
        (status = 201, description = "Medical record added"),
        (status = 400, description = "Missing field or unparseable date_recorded"),
        (status = 403, description = "Caller is neither doctor nor nurse")
    ),
    tag = MEDICAL_TAG,
    description = "Append a free-text clinical note to a patient's record",
)]
#[post("/medical-records")]
pub async fn add_medical_record(
    req: HttpRequest,
    body: web::Json<MedicalRecordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req, &app_state).await?;
    if !user.role.may(Operation::AddMedicalRecord) {
        return Err(ApiError::Forbidden);
    }

    let data = body.into_inner();
    let patient_id = data.patient_id.ok_or(ApiError::MissingField("patient_id"))?;
    let record_type = data
        .record_type
        .ok_or(ApiError::MissingField("record_type"))?;
    let description = data
        .description
        .ok_or(ApiError::MissingField("description"))?;

    let date_recorded = match data.date_recorded {
        Some(raw) => parse_datetime(&raw)
            .ok_or_else(|| ApiError::Validation(format!("Invalid date_recorded: {}", raw)))?,
        None => Utc::now(),
    };

    let record = app_state
        .db
        .insert_medical_record(NewMedicalRecord {
            patient_id,
            record_type,
            description,
            date_recorded,
            recorded_by: user.id,
        })
        .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Medical record added successfully",
        "medical_record": record,
    })))
}
