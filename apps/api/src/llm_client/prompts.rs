// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it and appends these where needed.

/// Closing line for every structured-output instruction.
/// The response schema constrains the shape; this keeps the model from
/// wrapping the JSON in prose.
pub const JSON_RESPONSE_INSTRUCTION: &str = "Return the response in JSON format.";
