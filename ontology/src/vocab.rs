//! Terms of the VSS ontology (VSSo).

/// Every ontology term the converter declares or references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concept {
    /// The ontology resource itself (the bare namespace IRI).
    Ontology,

    /// Links a property to the component it belongs to.
    BelongsTo,
    /// Links a numeric property to its unit.
    Unit,
    /// Links a property to its datatype.
    DataType,
    /// Links an array datatype to its element datatype.
    BaseDataType,
    /// Links an enumerated property to one of its values.
    HasEnumerationValue,
    /// Links an enumerated property to its default value.
    HasDefaultEnumerationValue,
    /// Links a component to the component containing it.
    PartOfComponent,
    /// Name of a property.
    PropertyName,
    /// Name of a component.
    ComponentName,
    /// Lower bound of a numeric property.
    Min,
    /// Upper bound of a numeric property.
    Max,
    /// Resolution of a numeric property.
    Resolution,
    /// Name of an enumeration value.
    EnumerationName,
    /// Description of an enumeration value.
    EnumerationDescription,

    /// Any property of a vehicle.
    VehicleProperty,
    /// Property whose value changes over time.
    DynamicVehicleProperty,
    /// Property whose value is fixed.
    StaticVehicleProperty,
    /// Property with a unit.
    NumericVehicleProperty,
    /// Property restricted to a list of values.
    EnumeratedVehicleProperty,
    /// One allowed value of an enumerated property.
    EnumerationValue,
    /// Structural part of a vehicle.
    VehicleComponent,
    /// Readable dynamic property.
    VehicleSignal,
    /// Writable dynamic property.
    VehicleActuator,
    /// Datatype of homogeneous arrays.
    ArrayType,
}

impl Concept {
    /// Local name within the ontology namespace.
    #[must_use]
    pub fn local_name(self) -> &'static str {
        match self {
            Concept::Ontology => "",
            Concept::BelongsTo => "belongsTo",
            Concept::Unit => "unit",
            Concept::DataType => "dataType",
            Concept::BaseDataType => "baseDataType",
            Concept::HasEnumerationValue => "hasEnumerationValue",
            Concept::HasDefaultEnumerationValue => "hasDefaultEnumerationValue",
            Concept::PartOfComponent => "partOfComponent",
            Concept::PropertyName => "propertyName",
            Concept::ComponentName => "componentName",
            Concept::Min => "min",
            Concept::Max => "max",
            Concept::Resolution => "resolution",
            Concept::EnumerationName => "enumerationName",
            Concept::EnumerationDescription => "enumerationDescription",
            Concept::VehicleProperty => "VehicleProperty",
            Concept::DynamicVehicleProperty => "DynamicVehicleProperty",
            Concept::StaticVehicleProperty => "StaticVehicleProperty",
            Concept::NumericVehicleProperty => "NumericVehicleProperty",
            Concept::EnumeratedVehicleProperty => "EnumeratedVehicleProperty",
            Concept::EnumerationValue => "EnumerationValue",
            Concept::VehicleComponent => "VehicleComponent",
            Concept::VehicleSignal => "VehicleSignal",
            Concept::VehicleActuator => "VehicleActuator",
            Concept::ArrayType => "ArrayType",
        }
    }
}
