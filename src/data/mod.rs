pub mod army;
pub mod catalog;
pub mod unit;
pub mod validate;

pub use army::{Army, ArmySummary, EFFECTIVENESS_DISPLAY_DIVISOR};
pub use catalog::{load_catalog, load_units, Catalog, CatalogFormat};
pub use unit::Unit;
pub use validate::{validate_catalog_file, validate_units, ValidationReport, ValidationSeverity};
