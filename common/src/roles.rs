use serde::{Deserialize, Serialize};
use std::fmt;

/// Account category. The wire value is the lowercase snake_case name
/// (e.g. `lab_technician`); every staff-family role shares the Staff
/// profile table with `staff_type` recording the exact role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Doctor,
    Nurse,
    LabTechnician,
    Pharmacist,
    WardManager,
    FinancialManager,
    Staff,
}

/// Role-gated mutating operations. Listing visibility is scoped per role
/// inside the handlers instead, since it is not a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    UploadTestReport,
    RecordVitalSigns,
    AddMedicalRecord,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::LabTechnician => "lab_technician",
            Role::Pharmacist => "pharmacist",
            Role::WardManager => "ward_manager",
            Role::FinancialManager => "financial_manager",
            Role::Staff => "staff",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "patient" => Some(Role::Patient),
            "doctor" => Some(Role::Doctor),
            "nurse" => Some(Role::Nurse),
            "lab_technician" => Some(Role::LabTechnician),
            "pharmacist" => Some(Role::Pharmacist),
            "ward_manager" => Some(Role::WardManager),
            "financial_manager" => Some(Role::FinancialManager),
            "staff" => Some(Role::Staff),
            _ => None,
        }
    }

    /// Staff-family roles all get a Staff profile row at registration.
    pub fn is_staff_family(&self) -> bool {
        matches!(
            self,
            Role::Staff
                | Role::Nurse
                | Role::LabTechnician
                | Role::Pharmacist
                | Role::WardManager
                | Role::FinancialManager
        )
    }

    /// Pure permission policy consulted at the top of each mutating handler.
    pub fn may(&self, operation: Operation) -> bool {
        match operation {
            Operation::UploadTestReport => {
                matches!(self, Role::LabTechnician | Role::Doctor)
            }
            Operation::RecordVitalSigns => matches!(self, Role::Nurse | Role::Doctor),
            Operation::AddMedicalRecord => matches!(self, Role::Doctor | Role::Nurse),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_wire_value() {
        let all = [
            Role::Patient,
            Role::Doctor,
            Role::Nurse,
            Role::LabTechnician,
            Role::Pharmacist,
            Role::WardManager,
            Role::FinancialManager,
            Role::Staff,
        ];
        for role in all {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("PATIENT"), None);
    }

    #[test]
    fn serde_uses_snake_case_values() {
        assert_eq!(
            serde_json::to_string(&Role::LabTechnician).unwrap(),
            "\"lab_technician\""
        );
        let parsed: Role = serde_json::from_str("\"ward_manager\"").unwrap();
        assert_eq!(parsed, Role::WardManager);
    }

    #[test]
    fn staff_family_membership() {
        assert!(Role::Nurse.is_staff_family());
        assert!(Role::FinancialManager.is_staff_family());
        assert!(!Role::Patient.is_staff_family());
        assert!(!Role::Doctor.is_staff_family());
    }

    #[test]
    fn permission_matrix() {
        assert!(Role::LabTechnician.may(Operation::UploadTestReport));
        assert!(Role::Doctor.may(Operation::UploadTestReport));
        assert!(!Role::Nurse.may(Operation::UploadTestReport));

        assert!(Role::Nurse.may(Operation::RecordVitalSigns));
        assert!(Role::Doctor.may(Operation::RecordVitalSigns));
        assert!(!Role::LabTechnician.may(Operation::RecordVitalSigns));

        assert!(Role::Doctor.may(Operation::AddMedicalRecord));
        assert!(Role::Nurse.may(Operation::AddMedicalRecord));
        assert!(!Role::Pharmacist.may(Operation::AddMedicalRecord));
        assert!(!Role::Patient.may(Operation::AddMedicalRecord));
    }
}
