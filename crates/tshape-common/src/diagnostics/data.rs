//! Message table for the checks the validator performs.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const TYPE_NOT_ASSIGNABLE: u32 = 2322;
    pub const EXCESS_PROPERTY: u32 = 2353;
    pub const PROPERTY_MISSING: u32 = 2741;
    pub const NO_COMMON_PROPERTIES: u32 = 2559;
    pub const CONVERSION_MAY_BE_MISTAKE: u32 = 2352;
    pub const EXPECTED_TYPE_FROM_PROPERTY: u32 = 6500;
    pub const PROPERTY_DECLARED_HERE: u32 = 2728;
}

pub mod diagnostic_messages {
    pub const TYPE_NOT_ASSIGNABLE: &str = "Type '{0}' is not assignable to type '{1}'.";
    pub const EXCESS_PROPERTY: &str = "Object literal may only specify known properties, and '{0}' does not exist in type '{1}'.";
    pub const PROPERTY_MISSING: &str =
        "Property '{0}' is missing in type '{1}' but required in type '{2}'.";
    pub const NO_COMMON_PROPERTIES: &str = "Type '{0}' has no properties in common with type '{1}'.";
    pub const CONVERSION_MAY_BE_MISTAKE: &str = "Conversion of type '{0}' to type '{1}' may be a mistake because neither type sufficiently overlaps with the other. If this was intentional, convert the expression to 'unknown' first.";
    pub const EXPECTED_TYPE_FROM_PROPERTY: &str =
        "The expected type comes from property '{0}' which is declared here on type '{1}'";
    pub const PROPERTY_DECLARED_HERE: &str = "'{0}' is declared here.";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_NOT_ASSIGNABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_NOT_ASSIGNABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXCESS_PROPERTY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXCESS_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_MISSING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::PROPERTY_MISSING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_COMMON_PROPERTIES,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_COMMON_PROPERTIES,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONVERSION_MAY_BE_MISTAKE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONVERSION_MAY_BE_MISTAKE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TYPE_FROM_PROPERTY,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::EXPECTED_TYPE_FROM_PROPERTY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_DECLARED_HERE,
        category: DiagnosticCategory::Message,
        message: diagnostic_messages::PROPERTY_DECLARED_HERE,
    },
];
