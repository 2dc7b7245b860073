//! Everyday calculations: tips and temperature conversion.

use crate::tools::registry::{parse_args, Tool};
use crate::types::{Result, ToolError, ToolOutcome};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TIP_PERCENTAGE: f64 = 15.0;

/// Render a number the way it was supplied: integral values keep one
/// decimal place (`15.0`), everything else prints in full (`12.5`).
pub(crate) fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

// ============= Tip Calculator =============

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipBreakdown {
    pub bill: f64,
    pub percentage: f64,
    pub tip: f64,
    pub total: f64,
}

impl fmt::Display for TipBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bill Amount: ${:.2}", self.bill)?;
        writeln!(f, "Tip ({}%): ${:.2}", display_number(self.percentage), self.tip)?;
        write!(f, "Total: ${:.2}", self.total)
    }
}

/// Compute tip and total. Nothing is rounded here; only display rounds.
pub fn tip(bill_amount: f64, tip_percentage: f64) -> ToolOutcome<TipBreakdown> {
    if bill_amount < 0.0 {
        return Err(ToolError::NegativeBill);
    }
    if !(0.0..=100.0).contains(&tip_percentage) {
        return Err(ToolError::TipPercentageOutOfRange(tip_percentage));
    }

    let tip = bill_amount * (tip_percentage / 100.0);
    Ok(TipBreakdown {
        bill: bill_amount,
        percentage: tip_percentage,
        tip,
        total: bill_amount + tip,
    })
}

/// String boundary for [`tip`].
pub fn calculate_tip(bill_amount: f64, tip_percentage: f64) -> String {
    tip(bill_amount, tip_percentage).map_or_else(|e| e.to_string(), |b| b.to_string())
}

// ============= Temperature Converter =============

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
            Self::Kelvin => "K",
        }
    }

    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }

    fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ToolError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(Self::Celsius),
            "f" | "fahrenheit" => Ok(Self::Fahrenheit),
            "k" | "kelvin" => Ok(Self::Kelvin),
            _ => Err(ToolError::UnknownTemperatureUnit(s.to_string())),
        }
    }
}

/// Convert via Celsius. Values below absolute zero are converted as-is.
pub fn convert(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    to.from_celsius(from.to_celsius(value))
}

/// String boundary for [`convert`].
pub fn convert_temperature(value: f64, from_unit: &str, to_unit: &str) -> String {
    let units = from_unit
        .parse::<TemperatureUnit>()
        .and_then(|from| Ok((from, to_unit.parse::<TemperatureUnit>()?)));

    match units {
        Ok((from, to)) => format!(
            "{}°{} = {:.2}°{}",
            display_number(value),
            from,
            convert(value, from, to),
            to
        ),
        Err(e) => e.to_string(),
    }
}

// ============= Tool Wrappers =============

fn default_tip_percentage() -> f64 {
    DEFAULT_TIP_PERCENTAGE
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TipArgs {
    /// The original bill amount in dollars
    pub bill_amount: f64,
    /// The tip percentage, between 0 and 100
    #[serde(default = "default_tip_percentage")]
    pub tip_percentage: f64,
}

pub struct TipCalculator;

#[async_trait]
impl Tool for TipCalculator {
    fn name(&self) -> &str {
        "calculate_tip"
    }

    fn description(&self) -> &str {
        "Calculate the tip and total for a bill"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(TipArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: TipArgs = parse_args(self.name(), args)?;
        Ok(Value::String(calculate_tip(
            args.bill_amount,
            args.tip_percentage,
        )))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct TemperatureArgs {
    /// The temperature value to convert
    pub value: f64,
    /// The source unit: 'C', 'F' or 'K'
    pub from_unit: String,
    /// The target unit: 'C', 'F' or 'K'
    pub to_unit: String,
}

pub struct TemperatureConverter;

#[async_trait]
impl Tool for TemperatureConverter {
    fn name(&self) -> &str {
        "convert_temperature"
    }

    fn description(&self) -> &str {
        "Convert a temperature between Celsius (C), Fahrenheit (F) and Kelvin (K)"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(TemperatureArgs)).unwrap_or_default()
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let args: TemperatureArgs = parse_args(self.name(), args)?;
        Ok(Value::String(convert_temperature(
            args.value,
            &args.from_unit,
            &args.to_unit,
        )))
    }
}
