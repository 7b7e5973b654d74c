use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::data::catalog::load_units;
use crate::data::unit::Unit;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_catalog_file(path: impl AsRef<Path>) -> Result<ValidationReport> {
    let units = load_units(path)?;
    Ok(validate_units(&units))
}

pub fn validate_units(units: &[Unit]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    if units.is_empty() {
        report.push(
            ValidationSeverity::Info,
            "catalog",
            "catalog is empty; optimized armies will be empty",
        );
    }

    for (index, unit) in units.iter().enumerate() {
        let context = format!("units[{index}] name='{}'", unit.name);

        if unit.name.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("units[{index}].name"),
                "missing non-empty 'name'",
            );
        }

        if unit.point_cost <= 0 {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.point_cost"),
                format!("point_cost must be positive, got {}", unit.point_cost),
            );
        }

        for (field, value) in unit.ratios() {
            if !(0.0..=1.0).contains(&value) {
                report.push(
                    ValidationSeverity::Error,
                    format!("{context}.{field}"),
                    format!("ratio out of range [0, 1]: {value}"),
                );
            }
        }

        if unit.effectiveness() == 0.0 {
            report.push(
                ValidationSeverity::Warning,
                context.clone(),
                "effectiveness is zero; the optimizer will never select this unit",
            );
        }

        match first_seen.get(unit.name.as_str()) {
            Some(first) => report.push(
                ValidationSeverity::Info,
                context,
                format!("duplicate name (first seen at units[{first}]); treated as a separate slot"),
            ),
            None => {
                first_seen.insert(unit.name.as_str(), index);
            }
        }
    }

    report
}
