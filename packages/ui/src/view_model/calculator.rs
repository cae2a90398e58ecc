use api::models::{CalculatorResult, CalculatorTool};

use super::format_number;

#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorView {
    pub headline: String,
    pub flags: Vec<String>,
}

pub fn calculator_view(result: &CalculatorResult) -> CalculatorView {
    let name = CalculatorTool::parse(&result.tool)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| result.tool.clone());
    let headline = match (result.value, result.units.as_deref()) {
        (Some(v), Some(units)) if !units.is_empty() => {
            format!("{name}: {} {units}", format_number(v))
        }
        (Some(v), _) => format!("{name}: {}", format_number(v)),
        (None, _) => format!("{name}: no result"),
    };
    CalculatorView {
        headline,
        flags: result.flags.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline() {
        let result: CalculatorResult = serde_json::from_str(
            r#"{"tool":"cha2ds2-vasc","value":3,"units":"points","flags":["high"]}"#,
        )
        .unwrap();
        let view = calculator_view(&result);
        assert_eq!(view.headline, "CHA2DS2-VASc: 3 points");
        assert_eq!(view.flags, vec!["high"]);

        let empty: CalculatorResult = serde_json::from_str(r#"{"tool":"bmi"}"#).unwrap();
        assert_eq!(calculator_view(&empty).headline, "BMI: no result");
    }
}
