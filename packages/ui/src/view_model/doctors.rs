use api::models::DoctorSummary;

#[derive(Clone, Debug, PartialEq)]
pub struct DoctorCard {
    pub key: String,
    pub name: String,
    pub specialization: String,
    pub license: String,
}

fn filled(value: &Option<String>, placeholder: &str) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

pub fn doctor_cards(doctors: &[DoctorSummary]) -> Vec<DoctorCard> {
    doctors
        .iter()
        .map(|d| DoctorCard {
            key: d.id.clone(),
            name: format!("Dr. {}", d.full_name),
            specialization: filled(&d.specialization, "Not specified"),
            license: filled(&d.license_number, "Not provided"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        let doctors: Vec<DoctorSummary> = serde_json::from_str(
            r#"[{"id":1,"full_name":"Ana","specialization":"Cardiología","license_number":null}]"#,
        )
        .unwrap();
        let cards = doctor_cards(&doctors);
        assert_eq!(cards[0].key, "1");
        assert_eq!(cards[0].name, "Dr. Ana");
        assert_eq!(cards[0].specialization, "Cardiología");
        assert_eq!(cards[0].license, "Not provided");
    }
}
