//! Unit catalog: the built-in codex plus JSON/YAML loading.
//! Loading does not validate; callers run [crate::data::validate] or let the optimizer reject.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::army::Army;
use crate::data::unit::Unit;
use crate::error::{Result, WarbandError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Self::Yaml)
            }
            _ => None,
        }
    }
}

/// Accepts either a bare list of units or `{ "units": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Unit>),
    Wrapped { units: Vec<Unit> },
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    units: Vec<Arc<Unit>>,
}

impl Catalog {
    pub fn from_units(units: Vec<Unit>) -> Self {
        Self {
            units: units.into_iter().map(Arc::new).collect(),
        }
    }

    /// The stock roster used when no catalog file is given.
    pub fn default_codex() -> Self {
        Self::from_units(vec![
            Unit::new("Marine", 6, 10, 0.9, 0.85, 18, 0.75, 12, 80),
            Unit::new("Assault Marine", 7, 8, 0.85, 0.8, 16, 0.8, 14, 90),
            Unit::new("Terminator", 5, 12, 0.95, 0.9, 20, 0.7, 18, 120),
            Unit::new("Scout", 8, 6, 0.7, 0.65, 12, 0.6, 10, 60),
        ])
    }

    pub fn units(&self) -> &[Arc<Unit>] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// First unit whose name matches case-insensitively.
    pub fn find(&self, name: &str) -> Option<Arc<Unit>> {
        self.units
            .iter()
            .find(|unit| unit.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
    }

    /// Army of the named units in order; None if any name is missing.
    pub fn army(&self, names: &[&str]) -> Option<Army> {
        names
            .iter()
            .map(|name| self.find(name))
            .collect::<Option<Vec<_>>>()
            .map(Army::from_units)
    }
}

pub fn parse_catalog_str(raw: &str, format: CatalogFormat, path: &str) -> Result<Vec<Unit>> {
    let parsed: CatalogFile = match format {
        CatalogFormat::Json => serde_json::from_str(raw).map_err(|err| err.to_string()),
        CatalogFormat::Yaml => serde_yaml::from_str(raw).map_err(|err| err.to_string()),
    }
    .map_err(|message| WarbandError::CatalogParse {
        path: path.to_string(),
        message,
    })?;
    Ok(match parsed {
        CatalogFile::List(units) | CatalogFile::Wrapped { units } => units,
    })
}

/// Read raw unit records from a `.json`, `.yaml` or `.yml` file.
pub fn load_units(path: impl AsRef<Path>) -> Result<Vec<Unit>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| WarbandError::UnsupportedCatalogFormat(display.clone()))?;
    let raw = fs::read_to_string(path).map_err(|source| WarbandError::CatalogRead {
        path: display.clone(),
        source,
    })?;
    parse_catalog_str(&raw, format, &display)
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let units = load_units(path.as_ref())?;
    tracing::debug!(
        "loaded {} unit(s) from {}",
        units.len(),
        path.as_ref().display()
    );
    Ok(Catalog::from_units(units))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_codex_has_four_units_in_order() {
        let codex = Catalog::default_codex();
        let names: Vec<_> = codex.units().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Marine", "Assault Marine", "Terminator", "Scout"]);
    }

    #[test]
    fn parses_wrapped_and_bare_json() {
        let unit = r#"{"name":"Scout","speed":8,"wounds":6,"armor":0.7,"shooting_accuracy":0.65,
            "shooting_damage":12,"close_combat_accuracy":0.6,"close_combat_damage":10,"point_cost":60}"#;
        let bare = format!("[{unit}]");
        let wrapped = format!("{{\"units\":[{unit},{unit}]}}");

        let from_bare = parse_catalog_str(&bare, CatalogFormat::Json, "bare.json").unwrap();
        let from_wrapped = parse_catalog_str(&wrapped, CatalogFormat::Json, "w.json").unwrap();
        assert_eq!(from_bare.len(), 1);
        assert_eq!(from_wrapped.len(), 2);
        assert_eq!(from_bare[0].point_cost, 60);
    }

    #[test]
    fn parses_yaml_list() {
        let yaml = "units:\n  - name: Marine\n    speed: 6\n    wounds: 10\n    armor: 0.9\n    shooting_accuracy: 0.85\n    shooting_damage: 18\n    close_combat_accuracy: 0.75\n    close_combat_damage: 12\n    point_cost: 80\n";
        let units = parse_catalog_str(yaml, CatalogFormat::Yaml, "c.yaml").unwrap();
        assert_eq!(units[0].name, "Marine");
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_units("catalog.txt").unwrap_err();
        assert!(matches!(err, WarbandError::UnsupportedCatalogFormat(_)));
    }

    #[test]
    fn find_is_case_insensitive() {
        let codex = Catalog::default_codex();
        assert_eq!(codex.find("terminator").map(|u| u.point_cost), Some(120));
        assert!(codex.find("Dreadnought").is_none());
    }

    #[test]
    fn army_keeps_name_order_and_repeats() {
        let codex = Catalog::default_codex();
        let army = codex.army(&["Scout", "terminator", "Scout"]).unwrap();
        assert_eq!(army.unit_names(), ["Scout", "Terminator", "Scout"]);
        assert_eq!(army.total_points(), 240);
        assert!(codex.army(&["Scout", "Dreadnought"]).is_none());
    }
}
