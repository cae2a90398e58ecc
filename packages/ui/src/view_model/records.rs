//! Record cards for the history and my-patients lists and the public lookup.

use api::models::{ClinicalRecord, LookupPatient, LookupRecord, LookupResponse, VitalSigns};

use super::analysis::{differential_line, test_line};
use super::{format_date, format_number, format_time};

/// Whose identifier the card's badge shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordAudience {
    /// A patient reading their own history; the badge names the doctor.
    Patient,
    /// A doctor reading the records they can see; the badge names the patient.
    Doctor,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordCard {
    pub key: String,
    pub title: String,
    pub badge: String,
    pub case_text: String,
    pub differentials: Vec<String>,
    pub tests: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordListView {
    pub cards: Vec<RecordCard>,
    pub empty_message: Option<String>,
}

pub fn record_card(record: &ClinicalRecord, audience: RecordAudience) -> RecordCard {
    let title = match record.created_at.as_deref() {
        Some(created) => format!("Record of {}", format_date(created)),
        None => "Record".to_string(),
    };
    let badge = match audience {
        RecordAudience::Patient => record
            .doctor_id
            .as_deref()
            .map(|id| format!("Doctor: {id}")),
        RecordAudience::Doctor => record
            .patient_id
            .as_deref()
            .map(|id| format!("Patient: {id}")),
    }
    .unwrap_or_else(|| format!("ID: {}", record.id));

    RecordCard {
        key: record.id.clone(),
        title,
        badge,
        case_text: record.case_text.clone(),
        differentials: record.differentials.iter().map(differential_line).collect(),
        tests: record.tests.iter().map(test_line).collect(),
    }
}

pub fn record_list(records: &[ClinicalRecord], audience: RecordAudience) -> RecordListView {
    RecordListView {
        cards: records.iter().map(|r| record_card(r, audience)).collect(),
        empty_message: records
            .is_empty()
            .then(|| "No clinical records found.".to_string()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionBody {
    Text(String),
    List(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisitCard {
    pub title: String,
    pub time: String,
    pub vitals: Vec<String>,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LookupView {
    pub name: String,
    pub birth_date: String,
    pub phone: String,
    pub emergency_contact: String,
    pub visits: Vec<VisitCard>,
    pub empty_message: Option<String>,
}

/// Vital sign chips; pairs (blood pressure, weight/height) only show when complete.
pub fn vital_chips(vitals: &VitalSigns) -> Vec<String> {
    let mut chips = Vec::new();
    if let Some(hr) = vitals.heart_rate {
        chips.push(format!("HR: {} bpm", format_number(hr)));
    }
    if let (Some(sys), Some(dia)) = (
        vitals.blood_pressure_systolic,
        vitals.blood_pressure_diastolic,
    ) {
        chips.push(format!(
            "BP: {}/{} mmHg",
            format_number(sys),
            format_number(dia)
        ));
    }
    if let Some(rr) = vitals.respiratory_rate {
        chips.push(format!("RR: {} rpm", format_number(rr)));
    }
    if let Some(t) = vitals.temperature {
        chips.push(format!("Temp.: {} °C", format_number(t)));
    }
    if let Some(spo2) = vitals.oxygen_saturation {
        chips.push(format!("SpO2: {}%", format_number(spo2)));
    }
    if let (Some(w), Some(h)) = (vitals.weight, vitals.height) {
        chips.push(format!(
            "Weight: {} kg, Height: {} cm",
            format_number(w),
            format_number(h)
        ));
    }
    if let Some(bmi) = vitals.bmi {
        chips.push(format!("BMI: {}", format_number(bmi)));
    }
    if let Some(glucose) = vitals.blood_glucose {
        chips.push(format!("Glucose: {} mg/dL", format_number(glucose)));
    }
    if let Some(pain) = vitals.pain_scale {
        chips.push(format!("Pain: {}/10", format_number(pain)));
    }
    chips
}

fn text_section(heading: &'static str, value: &Option<String>) -> Option<Section> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| Section {
            heading,
            body: SectionBody::Text(v.to_string()),
        })
}

fn joined_section(heading: &'static str, values: &Option<Vec<String>>) -> Option<Section> {
    values
        .as_ref()
        .filter(|v| !v.is_empty())
        .map(|v| Section {
            heading,
            body: SectionBody::Text(v.join(", ")),
        })
}

fn list_section(heading: &'static str, items: Vec<String>) -> Option<Section> {
    (!items.is_empty()).then(|| Section {
        heading,
        body: SectionBody::List(items),
    })
}

pub fn visit_card(record: &LookupRecord) -> VisitCard {
    let created = record.created_at.as_deref().unwrap_or("");
    let sections = [
        text_section("Reason for visit", &record.reason_for_visit),
        joined_section("Allergies", &record.allergies),
        joined_section("Current medications", &record.current_medications),
        text_section("Physical examination", &record.physical_examination),
        text_section("Assessment", &record.assessment),
        text_section("Diagnosis", &record.diagnosis),
        text_section("Treatment plan", &record.treatment_plan),
        text_section("Follow-up", &record.follow_up),
        list_section(
            "Differential diagnoses",
            record.differentials.iter().map(differential_line).collect(),
        ),
        list_section(
            "Suggested tests",
            record.tests.iter().map(test_line).collect(),
        ),
    ]
    .into_iter()
    .flatten()
    .collect();

    VisitCard {
        title: if created.is_empty() {
            "Visit".to_string()
        } else {
            format!("Visit of {}", format_date(created))
        },
        time: format_time(created),
        vitals: record.vital_signs.as_ref().map(vital_chips).unwrap_or_default(),
        sections,
    }
}

fn or_placeholder(value: &Option<String>, placeholder: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| placeholder.to_string())
}

pub fn lookup_view(response: &LookupResponse) -> LookupView {
    let LookupPatient {
        name,
        date_of_birth,
        phone,
        emergency_contact,
    } = &response.patient;
    LookupView {
        name: name.clone(),
        birth_date: date_of_birth
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(format_date)
            .unwrap_or_else(|| "Not specified".to_string()),
        phone: or_placeholder(phone, "Not specified"),
        emergency_contact: or_placeholder(emergency_contact, "Not specified"),
        visits: response.records.iter().map(visit_card).collect(),
        empty_message: response
            .records
            .is_empty()
            .then(|| "No medical records found.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> ClinicalRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_badges_follow_audience() {
        let r = record(
            r#"{"id":"r1","patient_id":"p1","doctor_id":"d1","case_text":"dolor","created_at":"2024-05-01T10:00:00",
                "differentials":[{"condition":"Angina","rationale":"dolor"}],"tests":[{"name":"ECG"}]}"#,
        );
        let for_patient = record_card(&r, RecordAudience::Patient);
        assert_eq!(for_patient.badge, "Doctor: d1");
        assert_eq!(for_patient.title, "Record of 2024-05-01");
        assert_eq!(for_patient.differentials, vec!["Angina: dolor"]);
        assert_eq!(record_card(&r, RecordAudience::Doctor).badge, "Patient: p1");

        let bare = record(r#"{"id":"r2"}"#);
        assert_eq!(record_card(&bare, RecordAudience::Doctor).badge, "ID: r2");
        assert_eq!(record_card(&bare, RecordAudience::Doctor).title, "Record");
    }

    #[test]
    fn test_empty_list_message() {
        let view = record_list(&[], RecordAudience::Patient);
        assert!(view.cards.is_empty());
        assert_eq!(view.empty_message.as_deref(), Some("No clinical records found."));
    }

    #[test]
    fn test_vital_pairs_need_both_values() {
        let vitals = VitalSigns {
            heart_rate: Some(72.0),
            blood_pressure_systolic: Some(120.0),
            weight: Some(70.0),
            height: Some(175.0),
            oxygen_saturation: Some(98.0),
            ..Default::default()
        };
        assert_eq!(
            vital_chips(&vitals),
            vec![
                "HR: 72 bpm",
                "SpO2: 98%",
                "Weight: 70 kg, Height: 175 cm"
            ]
        );
    }

    #[test]
    fn test_lookup_view() {
        let response: LookupResponse = serde_json::from_str(
            r#"{
                "patient": {"name": "Luis", "date_of_birth": null, "phone": "", "emergency_contact": "Ana 555"},
                "records": [{
                    "created_at": "2024-05-01T09:15:00",
                    "reason_for_visit": "Control",
                    "allergies": ["penicilina", "látex"],
                    "current_medications": [],
                    "diagnosis": "  ",
                    "tests": [{"test": "Hemograma", "reason": "anemia"}]
                }]
            }"#,
        )
        .unwrap();
        let view = lookup_view(&response);
        assert_eq!(view.birth_date, "Not specified");
        assert_eq!(view.phone, "Not specified");
        assert_eq!(view.emergency_contact, "Ana 555");
        assert!(view.empty_message.is_none());

        let visit = &view.visits[0];
        assert_eq!(visit.title, "Visit of 2024-05-01");
        assert_eq!(visit.time, "09:15");
        let headings: Vec<_> = visit.sections.iter().map(|s| s.heading).collect();
        assert_eq!(headings, vec!["Reason for visit", "Allergies", "Suggested tests"]);
        assert_eq!(
            visit.sections[1].body,
            SectionBody::Text("penicilina, látex".into())
        );
        assert_eq!(
            visit.sections[2].body,
            SectionBody::List(vec!["Hemograma: anemia".into()])
        );
    }
}
