//! OpenAPI components for the documents the engine reads and publishes

use utoipa::OpenApi;

use crate::check::{CheckId, Severity, ValidationFailure};
use crate::condition::StatusCondition;
use crate::mapping::ResourceMappings;
use crate::vm::VirtualMachine;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            VirtualMachine,
            ResourceMappings,
            StatusCondition,
            ValidationFailure,
            CheckId,
            Severity,
        )
    ),
    info(
        title = "VM Import Validation",
        description = "VM descriptors, resource mappings and published import conditions",
        version = "1.0.0"
    )
)]
pub struct ImportApiDoc;

/// Schema document for every input and output type
pub fn document() -> utoipa::openapi::OpenApi {
    ImportApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_inputs_and_outputs() {
        let document = document();
        let schemas = document.components.expect("components").schemas;

        for name in ["VirtualMachine", "ResourceMappings", "StatusCondition", "CheckId"] {
            assert!(schemas.contains_key(name), "missing {}", name);
        }
    }
}
