//! Analysis, clinical records, patient registration, lookup and sharing.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub case_text: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Differential {
    pub condition: String,
    #[serde(default)]
    pub probability: Option<String>,
    #[serde(default)]
    pub rationale: String,
}

/// Suggested test. Lookup records name the fields `test`/`reason`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SuggestedTest {
    #[serde(alias = "test")]
    pub name: String,
    #[serde(default, alias = "reason")]
    pub rationale: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub differentials: Vec<Differential>,
    #[serde(default)]
    pub tests: Vec<SuggestedTest>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Entry of `/clinical-records/my-history` or `/clinical-records/my-patients`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClinicalRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub doctor_id: Option<String>,
    #[serde(default)]
    pub case_text: String,
    #[serde(default)]
    pub differentials: Vec<Differential>,
    #[serde(default)]
    pub tests: Vec<SuggestedTest>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub records: Vec<ClinicalRecord>,
}

/// Vital signs captured at registration. Every reading is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub blood_pressure_systolic: Option<f64>,
    #[serde(default)]
    pub blood_pressure_diastolic: Option<f64>,
    #[serde(default)]
    pub respiratory_rate: Option<f64>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub oxygen_saturation: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub blood_glucose: Option<f64>,
    #[serde(default)]
    pub waist_circumference: Option<f64>,
    #[serde(default)]
    pub pain_scale: Option<f64>,
    /// Computed by the server; never sent.
    #[serde(default, skip_serializing)]
    pub bmi: Option<f64>,
}

/// Payload of `POST /patients/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PatientRegistration {
    pub full_name: String,
    pub date_of_birth: String,
    pub phone: Option<String>,
    pub emergency_contact: Option<String>,
    pub vital_signs: VitalSigns,
    pub allergies: Option<Vec<String>>,
    pub current_medications: Option<Vec<String>>,
    pub past_history: Option<String>,
    pub family_history: Option<String>,
    pub reason_for_visit: Option<String>,
    pub physical_examination: Option<String>,
    pub assessment: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment_plan: Option<String>,
    pub follow_up: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RegisteredPatient {
    #[serde(default)]
    pub message: Option<String>,
    pub patient_code: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub record_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LookupPatient {
    pub name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct LookupRecord {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub reason_for_visit: Option<String>,
    #[serde(default)]
    pub vital_signs: Option<VitalSigns>,
    #[serde(default)]
    pub allergies: Option<Vec<String>>,
    #[serde(default)]
    pub current_medications: Option<Vec<String>>,
    #[serde(default)]
    pub physical_examination: Option<String>,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub differentials: Vec<Differential>,
    #[serde(default)]
    pub tests: Vec<SuggestedTest>,
}

/// Answer to the public `GET /patients/lookup/{code}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LookupResponse {
    pub patient: LookupPatient,
    #[serde(default)]
    pub records: Vec<LookupRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShareRequest {
    pub patient_id: String,
    pub doctor_email: String,
    pub access_level: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShareResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DoctorSummary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub full_name: String,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct DoctorList {
    #[serde(default)]
    pub doctors: Vec<DoctorSummary>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Id {
    Text(String),
    Number(i64),
}

impl From<Id> for String {
    fn from(id: Id) -> Self {
        match id {
            Id::Text(s) => s,
            Id::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Id::deserialize(d).map(String::from)
}

pub(crate) fn opt_string_or_number<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<String>, D::Error> {
    Option::<Id>::deserialize(d).map(|id| id.map(String::from))
}
