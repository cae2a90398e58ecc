use serde::Deserialize;

/// Calculators the server evaluates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalculatorTool {
    Bmi,
    Egfr,
    Cha2ds2Vasc,
    Curb65,
}

impl CalculatorTool {
    pub const ALL: [CalculatorTool; 4] = [
        CalculatorTool::Bmi,
        CalculatorTool::Egfr,
        CalculatorTool::Cha2ds2Vasc,
        CalculatorTool::Curb65,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorTool::Bmi => "bmi",
            CalculatorTool::Egfr => "egfr",
            CalculatorTool::Cha2ds2Vasc => "cha2ds2-vasc",
            CalculatorTool::Curb65 => "curb-65",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CalculatorTool::Bmi => "BMI",
            CalculatorTool::Egfr => "eGFR",
            CalculatorTool::Cha2ds2Vasc => "CHA2DS2-VASc",
            CalculatorTool::Curb65 => "CURB-65",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

/// Answer to `GET /calculate`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CalculatorResult {
    pub tool: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
}
