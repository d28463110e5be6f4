//! Lookup tables from vspec type and unit names to ontology IRIs.
//!
//! The built-in tables ([`Registry::vss`]) cover the VSS primitive types and
//! unit vocabulary. A TOML overrides file can replace the namespaces and add
//! or replace individual entries:
//!
//! ```toml
//! [namespaces]
//! ontology = "https://example.org/vsso#"
//!
//! [ontology]
//! version = "2.0.0"
//!
//! [datatypes]
//! float16 = "float"             # local name in the XSD namespace
//!
//! [units]
//! "mm/s" = "millimetrePerSecond" # local name in the unit namespace
//! "kWh/100km" = "https://example.org/units#kWhPer100km"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::iris::XSD;
use crate::vocab::Concept;

/// Default ontology namespace.
pub const VSSO_NS: &str = "https://github.com/w3c/vsso#";
/// Default unit namespace (QU units).
pub const UNIT_NS: &str = "http://purl.oclc.org/NET/ssnx/qu/unit#";
/// Default compound datatype namespace.
pub const CDT_NS: &str = "http://w3id.org/lindt/custom_datatypes#";
/// Ontology imported by the header.
pub const QU_REC20: &str = "http://purl.oclc.org/NET/ssnx/qu/qu-rec20";

/// Primitive vspec types and their XSD local names.
const DATATYPES: &[(&str, &str)] = &[
    ("uint8", "unsignedByte"),
    ("int8", "byte"),
    ("uint16", "unsignedShort"),
    ("int16", "short"),
    ("uint32", "unsignedInt"),
    ("int32", "int"),
    ("uint64", "unsignedLong"),
    ("int64", "long"),
    ("boolean", "boolean"),
    ("float", "float"),
    ("double", "double"),
    ("string", "string"),
];

/// vspec unit names and their local names in the unit namespace.
const UNITS: &[(&str, &str)] = &[
    // length
    ("mm", "millimetre"),
    ("cm", "centimetre"),
    ("m", "metre"),
    ("km", "kilometre"),
    ("inch", "inch"),
    // speed and acceleration
    ("km/h", "kilometrePerHour"),
    ("m/s", "metrePerSecond"),
    ("cm/s", "centimetrePerSecond"),
    ("m/s^2", "metrePerSecondSquared"),
    // volume and consumption
    ("l", "litre"),
    ("ml", "millilitre"),
    ("cm^3", "cubicCentimetre"),
    ("l/100km", "litrePer100Kilometre"),
    ("ml/100km", "millilitrePer100Kilometre"),
    ("l/h", "litrePerHour"),
    ("km/l", "kilometrePerLitre"),
    // temperature and pressure
    ("celsius", "degreeCelsius"),
    ("mbar", "millibar"),
    ("Pa", "pascal"),
    ("kPa", "kilopascal"),
    // mass and flow
    ("g", "gram"),
    ("kg", "kilogram"),
    ("g/s", "gramPerSecond"),
    ("g/km", "gramPerKilometre"),
    ("kg/h", "kilogramPerHour"),
    // power, energy, electrical
    ("W", "watt"),
    ("kW", "kilowatt"),
    ("Wh", "wattHour"),
    ("kWh", "kilowattHour"),
    ("Wh/km", "wattHourPerKilometre"),
    ("V", "volt"),
    ("A", "ampere"),
    ("mA", "milliampere"),
    ("Ah", "ampereHour"),
    ("Ohm", "ohm"),
    // time
    ("ms", "millisecond"),
    ("s", "second"),
    ("min", "minuteUnitOfTime"),
    ("h", "hour"),
    ("day", "day"),
    ("weeks", "week"),
    ("months", "month"),
    ("years", "year"),
    ("UNIX Timestamp", "unixTimestamp"),
    ("iso8601", "iso8601"),
    // angle and rotation
    ("degrees", "degreeUnitOfAngle"),
    ("degrees/s", "degreePerSecond"),
    ("rad/s", "radianPerSecond"),
    ("rpm", "revolutionPerMinute"),
    ("Hz", "hertz"),
    // force and torque
    ("N", "newton"),
    ("Nm", "newtonMetre"),
    // ratios
    ("percent", "percent"),
    ("%", "percent"),
    ("ratio", "ratio"),
    ("stars", "star"),
    ("dBm", "decibelMilliwatt"),
];

/// Static lookup tables consumed by the bootstrap and the mapper.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Ontology namespace; node identifiers live here.
    pub namespace: String,
    /// Unit namespace.
    pub unit_namespace: String,
    /// Compound datatype namespace.
    pub cdt_namespace: String,
    /// `owl:versionInfo` of the generated ontology.
    pub version: String,
    /// `rdfs:label` of the generated ontology.
    pub label: String,
    /// `owl:imports` of the generated ontology.
    pub imports: Vec<String>,
    /// Name of the conventional root node.
    pub root_name: String,
    /// Identifier given to the conventional root node.
    pub root_entity: String,
    datatypes: BTreeMap<String, String>,
    units: BTreeMap<String, String>,
}

impl Registry {
    /// Returns the built-in VSS tables.
    #[must_use]
    pub fn vss() -> Self {
        Self::with_namespaces(VSSO_NS, UNIT_NS, CDT_NS)
    }

    /// Builds the built-in tables against custom namespaces.
    #[must_use]
    pub fn with_namespaces(namespace: &str, unit_namespace: &str, cdt_namespace: &str) -> Self {
        Self {
            namespace: namespace.to_owned(),
            unit_namespace: unit_namespace.to_owned(),
            cdt_namespace: cdt_namespace.to_owned(),
            version: "1.0.0".to_owned(),
            label: "COVESA VSS ontology".to_owned(),
            imports: vec![QU_REC20.to_owned()],
            root_name: "Vehicle".to_owned(),
            root_entity: "VehicleEntity".to_owned(),
            datatypes: DATATYPES
                .iter()
                .map(|(name, local)| ((*name).to_owned(), format!("{XSD}{local}")))
                .collect(),
            units: UNITS
                .iter()
                .map(|(name, local)| ((*name).to_owned(), format!("{unit_namespace}{local}")))
                .collect(),
        }
    }

    /// Built-in tables with the overrides of a parsed config applied.
    #[must_use]
    pub fn from_config(config: RegistryConfig) -> Self {
        let ns = config.namespaces;
        let mut registry = Self::with_namespaces(
            ns.ontology.as_deref().unwrap_or(VSSO_NS),
            ns.unit.as_deref().unwrap_or(UNIT_NS),
            ns.cdt.as_deref().unwrap_or(CDT_NS),
        );
        let meta = config.ontology;
        if let Some(version) = meta.version {
            registry.version = version;
        }
        if let Some(label) = meta.label {
            registry.label = label;
        }
        if let Some(imports) = meta.imports {
            registry.imports = imports;
        }
        for (name, iri) in config.datatypes {
            let iri = qualify(&iri, XSD);
            registry.datatypes.insert(name, iri);
        }
        for (name, iri) in config.units {
            let iri = qualify(&iri, &registry.unit_namespace);
            registry.units.insert(name, iri);
        }
        registry
    }

    /// Parses a TOML overrides document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is not valid TOML or has unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RegistryConfig = toml::from_str(text)?;
        Ok(Self::from_config(config))
    }

    /// Reads a TOML overrides file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Toml`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Full IRI of an ontology term.
    #[must_use]
    pub fn concept(&self, concept: Concept) -> String {
        format!("{}{}", self.namespace, concept.local_name())
    }

    /// Full IRI of a generated individual or datatype.
    #[must_use]
    pub fn entity(&self, name: &str) -> String {
        format!("{}{name}", self.namespace)
    }

    /// Full IRI of a local name in the unit namespace.
    #[must_use]
    pub fn unit_term(&self, local: &str) -> String {
        format!("{}{local}", self.unit_namespace)
    }

    /// IRI of a primitive vspec type.
    #[must_use]
    pub fn datatype(&self, name: &str) -> Option<&str> {
        self.datatypes.get(name).map(String::as_str)
    }

    /// IRI of a vspec unit.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    /// All primitive type entries, sorted by name.
    pub fn datatypes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.datatypes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// All unit entries, sorted by name.
    pub fn units(&self) -> impl Iterator<Item = (&str, &str)> {
        self.units.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::vss()
    }
}

fn qualify(value: &str, namespace: &str) -> String {
    if value.contains(':') {
        value.to_owned()
    } else {
        format!("{namespace}{value}")
    }
}

/// Registry overrides as read from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Namespace overrides.
    pub namespaces: NamespaceConfig,
    /// Ontology header overrides.
    pub ontology: OntologyConfig,
    /// Extra or replacement primitive types (name → IRI or XSD local name).
    pub datatypes: BTreeMap<String, String>,
    /// Extra or replacement units (name → IRI or unit local name).
    pub units: BTreeMap<String, String>,
}

/// `[namespaces]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamespaceConfig {
    /// Ontology namespace.
    pub ontology: Option<String>,
    /// Unit namespace.
    pub unit: Option<String>,
    /// Compound datatype namespace.
    pub cdt: Option<String>,
}

/// `[ontology]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OntologyConfig {
    /// `owl:versionInfo`.
    pub version: Option<String>,
    /// `rdfs:label`.
    pub label: Option<String>,
    /// `owl:imports`.
    pub imports: Option<Vec<String>>,
}
