//! # Client-side validation and payload builders
//!
//! Every form collects raw strings from the page and turns them into a wire payload
//! here. A [`FormError`] means the input was rejected before any network call.
//!
//! | Form | Rule |
//! |------|------|
//! | login | e-mail and password non-empty |
//! | registration | e-mail, password, full name and role required; role-specific fields only for that role; blanks become `null` |
//! | analyze | trimmed case text of at least [`MIN_CLINICAL_TEXT`] characters |
//! | ICD suggest | same length rule; optional review threshold in `[0, 1]` |
//! | share | doctor e-mail non-empty |
//! | patient registration | name and birth date required; vitals parsed as numbers (blank is `null`); lists split on commas |
//! | lookup | code upper-cased, non-alphanumerics stripped, non-empty |
//! | calculator | per-tool inputs, see [`calculator_fields`] |
//! | adjustment | field, new value and reason required; rejecting a request requires a rationale |

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use store::Role;

use crate::error::FormError;
use crate::models::{
    AdjustmentDecisionRequest, AdjustmentStatus, AnalyzeRequest, CalculatorTool,
    CreateAdjustmentRequest, IcdSuggestRequest, LoginRequest, PatientRegistration,
    RegisterRequest, RoleField, ShareRequest, VitalSigns,
};

/// Minimum length of free-text clinical input.
pub const MIN_CLINICAL_TEXT: usize = 10;

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(trimmed.to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clinical_text(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_CLINICAL_TEXT {
        return Err(FormError::TooShort {
            field,
            min: MIN_CLINICAL_TEXT,
        });
    }
    Ok(trimmed.to_string())
}

/// Parse an optional number; blank input is `None`.
pub fn parse_optional_number(field: &'static str, value: &str) -> Result<Option<f64>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or(FormError::NotANumber(field))
}

fn in_range(field: &'static str, value: Option<f64>, min: f64, max: f64) -> Result<Option<f64>, FormError> {
    match value {
        Some(v) if v < min || v > max => Err(FormError::OutOfRange { field, min, max }),
        other => Ok(other),
    }
}

/// Split a comma-separated list, dropping blanks. Empty input is `None`.
pub fn split_list(value: &str) -> Option<Vec<String>> {
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    (!items.is_empty()).then_some(items)
}

/// Normalize a patient code as typed into the lookup box.
pub fn normalize_patient_code(raw: &str) -> Result<String, FormError> {
    let code: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if code.is_empty() {
        return Err(FormError::Required("patient code"));
    }
    Ok(code)
}

pub fn login_request(email: &str, password: &str) -> Result<LoginRequest, FormError> {
    let email = required("email", email)?;
    if password.is_empty() {
        return Err(FormError::Required("password"));
    }
    Ok(LoginRequest {
        email,
        password: password.to_string(),
    })
}

/// Raw fields of the account registration form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
    pub license_number: String,
    pub specialization: String,
    pub date_of_birth: String,
    pub phone: String,
}

impl RegistrationForm {
    pub fn build(&self) -> Result<RegisterRequest, FormError> {
        let email = required("email", &self.email)?;
        if self.password.is_empty() {
            return Err(FormError::Required("password"));
        }
        let full_name = required("full name", &self.full_name)?;
        let role = Role::from(required("account type", &self.role)?);
        if !role.is_known() {
            return Err(FormError::InvalidChoice("account type"));
        }

        let doctor = role == Role::Doctor;
        let patient = role == Role::Patient;
        Ok(RegisterRequest {
            email,
            password: self.password.clone(),
            full_name,
            license_number: RoleField::for_role(doctor, optional(&self.license_number)),
            specialization: RoleField::for_role(doctor, optional(&self.specialization)),
            date_of_birth: RoleField::for_role(patient, optional(&self.date_of_birth)),
            phone: RoleField::for_role(patient, optional(&self.phone)),
            user_type: role,
        })
    }
}

pub fn analyze_request(case_text: &str) -> Result<AnalyzeRequest, FormError> {
    Ok(AnalyzeRequest {
        case_text: clinical_text("case text", case_text)?,
    })
}

pub fn icd_request(text: &str, review_threshold: &str) -> Result<IcdSuggestRequest, FormError> {
    let text = clinical_text("clinical text", text)?;
    let threshold = parse_optional_number("review threshold", review_threshold)?;
    Ok(IcdSuggestRequest {
        text,
        review_threshold: in_range("review threshold", threshold, 0.0, 1.0)?,
    })
}

pub fn share_request(patient_id: &str, doctor_email: &str) -> Result<ShareRequest, FormError> {
    Ok(ShareRequest {
        patient_id: patient_id.to_string(),
        doctor_email: required("doctor email", doctor_email)?,
        access_level: "read".to_string(),
    })
}

/// Raw fields of the patient registration form, vitals included.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientForm {
    pub full_name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub emergency_contact: String,
    pub heart_rate: String,
    pub blood_pressure_systolic: String,
    pub blood_pressure_diastolic: String,
    pub respiratory_rate: String,
    pub temperature: String,
    pub oxygen_saturation: String,
    pub weight: String,
    pub height: String,
    pub blood_glucose: String,
    pub waist_circumference: String,
    pub pain_scale: String,
    pub allergies: String,
    pub current_medications: String,
    pub past_history: String,
    pub family_history: String,
    pub reason_for_visit: String,
    pub physical_examination: String,
    pub assessment: String,
    pub diagnosis: String,
    pub treatment_plan: String,
    pub follow_up: String,
}

impl PatientForm {
    pub fn build(&self) -> Result<PatientRegistration, FormError> {
        let full_name = required("full name", &self.full_name)?;
        let date_of_birth = required("date of birth", &self.date_of_birth)?;

        let vital_signs = VitalSigns {
            heart_rate: parse_optional_number("heart rate", &self.heart_rate)?,
            blood_pressure_systolic: parse_optional_number(
                "systolic pressure",
                &self.blood_pressure_systolic,
            )?,
            blood_pressure_diastolic: parse_optional_number(
                "diastolic pressure",
                &self.blood_pressure_diastolic,
            )?,
            respiratory_rate: parse_optional_number("respiratory rate", &self.respiratory_rate)?,
            temperature: parse_optional_number("temperature", &self.temperature)?,
            oxygen_saturation: in_range(
                "oxygen saturation",
                parse_optional_number("oxygen saturation", &self.oxygen_saturation)?,
                0.0,
                100.0,
            )?,
            weight: parse_optional_number("weight", &self.weight)?,
            height: parse_optional_number("height", &self.height)?,
            blood_glucose: parse_optional_number("blood glucose", &self.blood_glucose)?,
            waist_circumference: parse_optional_number(
                "waist circumference",
                &self.waist_circumference,
            )?,
            pain_scale: in_range(
                "pain scale",
                parse_optional_number("pain scale", &self.pain_scale)?,
                0.0,
                10.0,
            )?,
            bmi: None,
        };

        Ok(PatientRegistration {
            full_name,
            date_of_birth,
            phone: optional(&self.phone),
            emergency_contact: optional(&self.emergency_contact),
            vital_signs,
            allergies: split_list(&self.allergies),
            current_medications: split_list(&self.current_medications),
            past_history: optional(&self.past_history),
            family_history: optional(&self.family_history),
            reason_for_visit: optional(&self.reason_for_visit),
            physical_examination: optional(&self.physical_examination),
            assessment: optional(&self.assessment),
            diagnosis: optional(&self.diagnosis),
            treatment_plan: optional(&self.treatment_plan),
            follow_up: optional(&self.follow_up),
        })
    }
}

/// Raw fields of a patient's amendment request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjustmentForm {
    pub order_id: String,
    pub field_path: String,
    pub new_value: String,
    pub reason: String,
}

impl AdjustmentForm {
    pub fn build(&self, patient_id: &str) -> Result<CreateAdjustmentRequest, FormError> {
        Ok(CreateAdjustmentRequest {
            patient_id: patient_id.to_string(),
            order_id: optional(&self.order_id),
            field_path: required("field", &self.field_path)?,
            new_value: required("new value", &self.new_value)?,
            reason: required("reason", &self.reason)?,
        })
    }
}

/// Doctor's decision on an amendment request. Rejections need a rationale.
pub fn decision_request(approve: bool, rationale: &str) -> Result<AdjustmentDecisionRequest, FormError> {
    let rationale = optional(rationale);
    if !approve && rationale.is_none() {
        return Err(FormError::Required("rationale"));
    }
    Ok(AdjustmentDecisionRequest {
        status: if approve {
            AdjustmentStatus::Approved
        } else {
            AdjustmentStatus::Rejected
        },
        rationale,
    })
}

/// How a calculator input is entered and encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Strictly positive number.
    Number,
    /// Checkbox; encoded as a JSON boolean.
    Flag,
    /// One of a fixed set of lowercase values.
    Choice(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalculatorField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
}

const SEX: InputKind = InputKind::Choice(&["male", "female"]);

const fn number(key: &'static str, label: &'static str) -> CalculatorField {
    CalculatorField {
        key,
        label,
        kind: InputKind::Number,
        required: true,
    }
}

const fn flag(key: &'static str, label: &'static str) -> CalculatorField {
    CalculatorField {
        key,
        label,
        kind: InputKind::Flag,
        required: true,
    }
}

const BMI_FIELDS: &[CalculatorField] = &[
    number("weight_kg", "Weight (kg)"),
    number("height_cm", "Height (cm)"),
];

const EGFR_FIELDS: &[CalculatorField] = &[
    number("creatinine_mg_dl", "Creatinine (mg/dL)"),
    number("age", "Age"),
    CalculatorField {
        key: "sex",
        label: "Sex",
        kind: SEX,
        required: true,
    },
    CalculatorField {
        key: "race",
        label: "Race",
        kind: InputKind::Choice(&["black", "other"]),
        required: false,
    },
];

const CHA2DS2_VASC_FIELDS: &[CalculatorField] = &[
    number("age", "Age"),
    CalculatorField {
        key: "sex",
        label: "Sex",
        kind: SEX,
        required: true,
    },
    flag("congestive_heart_failure", "Congestive heart failure"),
    flag("hypertension", "Hypertension"),
    flag("diabetes", "Diabetes"),
    flag("stroke_tia", "Stroke / TIA"),
    flag("vascular_disease", "Vascular disease"),
];

const CURB_65_FIELDS: &[CalculatorField] = &[
    flag("confusion", "Confusion"),
    number("urea_mmol_l", "Urea (mmol/L)"),
    number("respiratory_rate", "Respiratory rate"),
    number("systolic_bp", "Systolic BP"),
    number("diastolic_bp", "Diastolic BP"),
    number("age", "Age"),
];

/// Inputs a calculator expects, in display order.
pub fn calculator_fields(tool: CalculatorTool) -> &'static [CalculatorField] {
    match tool {
        CalculatorTool::Bmi => BMI_FIELDS,
        CalculatorTool::Egfr => EGFR_FIELDS,
        CalculatorTool::Cha2ds2Vasc => CHA2DS2_VASC_FIELDS,
        CalculatorTool::Curb65 => CURB_65_FIELDS,
    }
}

fn is_checked(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "yes" | "1"
    )
}

/// Validate raw calculator inputs and encode them as the JSON object the server expects.
pub fn calculator_inputs(
    tool: CalculatorTool,
    values: &BTreeMap<String, String>,
) -> Result<Value, FormError> {
    let mut inputs = Map::new();
    for field in calculator_fields(tool) {
        let raw = values.get(field.key).map(String::as_str).unwrap_or("");
        match field.kind {
            InputKind::Flag => {
                inputs.insert(field.key.to_string(), Value::Bool(is_checked(raw)));
            }
            InputKind::Number => match parse_optional_number(field.label, raw)? {
                Some(n) if n > 0.0 => {
                    inputs.insert(field.key.to_string(), Value::from(n));
                }
                Some(_) => {
                    return Err(FormError::OutOfRange {
                        field: field.label,
                        min: 0.0,
                        max: f64::MAX,
                    })
                }
                None if field.required => return Err(FormError::Required(field.label)),
                None => {}
            },
            InputKind::Choice(options) => {
                let choice = raw.trim().to_ascii_lowercase();
                if choice.is_empty() {
                    if field.required {
                        return Err(FormError::Required(field.label));
                    }
                    continue;
                }
                if !options.contains(&choice.as_str()) {
                    return Err(FormError::InvalidChoice(field.label));
                }
                inputs.insert(field.key.to_string(), Value::String(choice));
            }
        }
    }
    Ok(Value::Object(inputs))
}

/// Look up a calculator by its wire name.
pub fn calculator_tool(name: &str) -> Result<CalculatorTool, FormError> {
    CalculatorTool::parse(name).ok_or_else(|| FormError::UnknownTool(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_length_boundary() {
        assert_eq!(
            analyze_request("123456789"),
            Err(FormError::TooShort {
                field: "case text",
                min: 10
            })
        );
        assert_eq!(
            analyze_request("  1234567890  ").unwrap().case_text,
            "1234567890"
        );
        // Whitespace does not count towards the minimum.
        assert!(analyze_request("123456789          ").is_err());
    }

    #[test]
    fn test_analyze_counts_characters_not_bytes() {
        assert!(analyze_request("dolor tórax").is_ok());
        assert!(analyze_request("ñññññññññ").is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(login_request(" ", "pw"), Err(FormError::Required("email")));
        assert_eq!(login_request("doc@x.com", ""), Err(FormError::Required("password")));
        let req = login_request(" doc@x.com ", "pw").unwrap();
        assert_eq!(req.email, "doc@x.com");
        assert_eq!(req.password, "pw");
    }

    #[test]
    fn test_registration_role_fields() {
        let form = RegistrationForm {
            email: "ana@x.com".into(),
            password: "pw".into(),
            full_name: "Ana".into(),
            role: "doctor".into(),
            license_number: " 123 ".into(),
            date_of_birth: "1990-01-01".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(form.build().unwrap()).unwrap();
        assert_eq!(body["user_type"], "doctor");
        assert_eq!(body["license_number"], "123");
        assert!(body["specialization"].is_null());
        assert!(body.get("specialization").is_some());
        assert!(body.get("date_of_birth").is_none());
        assert!(body.get("phone").is_none());
    }

    #[test]
    fn test_registration_rejects_unknown_role() {
        let form = RegistrationForm {
            email: "a@x.com".into(),
            password: "pw".into(),
            full_name: "A".into(),
            role: "admin".into(),
            ..Default::default()
        };
        assert_eq!(form.build(), Err(FormError::InvalidChoice("account type")));
    }

    #[test]
    fn test_icd_threshold() {
        assert!(icd_request("dolor torácico opresivo", "").unwrap().review_threshold.is_none());
        assert_eq!(
            icd_request("dolor torácico opresivo", "0.4").unwrap().review_threshold,
            Some(0.4)
        );
        assert!(matches!(
            icd_request("dolor torácico opresivo", "1.5"),
            Err(FormError::OutOfRange { .. })
        ));
        assert_eq!(
            icd_request("dolor torácico opresivo", "abc"),
            Err(FormError::NotANumber("review threshold"))
        );
    }

    #[test]
    fn test_patient_code_normalization() {
        assert_eq!(normalize_patient_code(" ab-12 c3 ").unwrap(), "AB12C3");
        assert_eq!(
            normalize_patient_code("--"),
            Err(FormError::Required("patient code"))
        );
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("penicilina, , látex ,"),
            Some(vec!["penicilina".to_string(), "látex".to_string()])
        );
        assert_eq!(split_list(" , "), None);
        assert_eq!(split_list(""), None);
    }

    #[test]
    fn test_patient_form() {
        let form = PatientForm {
            full_name: "Luis".into(),
            date_of_birth: "1990-01-01".into(),
            heart_rate: "72".into(),
            temperature: "36.6".into(),
            allergies: "penicilina".into(),
            ..Default::default()
        };
        let reg = form.build().unwrap();
        assert_eq!(reg.vital_signs.heart_rate, Some(72.0));
        assert_eq!(reg.vital_signs.temperature, Some(36.6));
        assert_eq!(reg.vital_signs.weight, None);
        assert_eq!(reg.allergies, Some(vec!["penicilina".to_string()]));
        assert_eq!(reg.current_medications, None);
        assert_eq!(reg.phone, None);
    }

    #[test]
    fn test_patient_form_errors() {
        let mut form = PatientForm {
            full_name: "Luis".into(),
            ..Default::default()
        };
        assert_eq!(form.build(), Err(FormError::Required("date of birth")));
        form.date_of_birth = "1990-01-01".into();
        form.heart_rate = "setenta".into();
        assert_eq!(form.build(), Err(FormError::NotANumber("heart rate")));
        form.heart_rate.clear();
        form.pain_scale = "11".into();
        assert!(matches!(form.build(), Err(FormError::OutOfRange { field: "pain scale", .. })));
    }

    #[test]
    fn test_decision_requires_rationale_on_reject() {
        assert_eq!(decision_request(false, "  "), Err(FormError::Required("rationale")));
        let reject = decision_request(false, "Not supported by the last labs").unwrap();
        assert_eq!(reject.status, AdjustmentStatus::Rejected);
        let approve = decision_request(true, "").unwrap();
        assert_eq!(approve.status, AdjustmentStatus::Approved);
        assert!(approve.rationale.is_none());
    }

    #[test]
    fn test_adjustment_form() {
        let form = AdjustmentForm {
            field_path: "medications.0.dose".into(),
            new_value: "5 mg".into(),
            reason: "".into(),
            ..Default::default()
        };
        assert_eq!(form.build("p1"), Err(FormError::Required("reason")));
    }

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_bmi_inputs() {
        let inputs = calculator_inputs(
            CalculatorTool::Bmi,
            &values(&[("weight_kg", "70"), ("height_cm", "175")]),
        )
        .unwrap();
        assert_eq!(inputs, serde_json::json!({"weight_kg": 70.0, "height_cm": 175.0}));

        assert_eq!(
            calculator_inputs(CalculatorTool::Bmi, &values(&[("weight_kg", "70")])),
            Err(FormError::Required("Height (cm)"))
        );
    }

    #[test]
    fn test_cha2ds2_vasc_flags_and_sex() {
        let inputs = calculator_inputs(
            CalculatorTool::Cha2ds2Vasc,
            &values(&[("age", "70"), ("sex", "Female"), ("hypertension", "on")]),
        )
        .unwrap();
        assert_eq!(inputs["sex"], "female");
        assert_eq!(inputs["hypertension"], true);
        assert_eq!(inputs["diabetes"], false);

        assert_eq!(
            calculator_inputs(CalculatorTool::Cha2ds2Vasc, &values(&[("age", "70"), ("sex", "x")])),
            Err(FormError::InvalidChoice("Sex"))
        );
    }

    #[test]
    fn test_egfr_optional_race() {
        let inputs = calculator_inputs(
            CalculatorTool::Egfr,
            &values(&[("creatinine_mg_dl", "1.1"), ("age", "50"), ("sex", "male")]),
        )
        .unwrap();
        assert!(inputs.get("race").is_none());
    }

    #[test]
    fn test_calculator_tool_lookup() {
        assert_eq!(calculator_tool("CURB-65").unwrap(), CalculatorTool::Curb65);
        assert_eq!(
            calculator_tool("apgar"),
            Err(FormError::UnknownTool("apgar".into()))
        );
    }
}
