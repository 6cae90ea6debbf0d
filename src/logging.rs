/// Standardized logging macros for consistent field names and message patterns across the application
///
/// These macros ensure:
/// - Consistent field naming conventions
/// - Appropriate logging levels for different scenarios
/// - Structured logging with context

// ============================================================================
// API Operation Logging Macros
// ============================================================================

/// Log the start of an API operation with consistent fields
#[macro_export]
macro_rules! log_api_start {
    ($operation:expr, topic = $topic:expr) => {
        tracing::debug!(
            operation = $operation,
            topic = %$topic,
            "API operation started"
        );
    };
    ($operation:expr, input_length = $length:expr) => {
        tracing::debug!(
            operation = $operation,
            input_length = $length,
            "API operation started"
        );
    };
    ($operation:expr) => {
        tracing::debug!(
            operation = $operation,
            "API operation started"
        );
    };
}

/// Log successful completion of an API operation
#[macro_export]
macro_rules! log_api_success {
    ($operation:expr, count = $count:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            count = $count,
            "API operation completed: {}", $msg
        );
    };
    ($operation:expr, $msg:expr) => {
        tracing::info!(
            operation = $operation,
            "API operation completed: {}", $msg
        );
    };
}

/// Log API warnings with context
#[macro_export]
macro_rules! log_api_warn {
    ($operation:expr, $msg:expr) => {
        tracing::warn!(
            operation = $operation,
            "API operation warning: {}", $msg
        );
    };
}

// ============================================================================
// LLM Gateway Logging Macros
// ============================================================================

/// Log model gateway operations with provider context
#[macro_export]
macro_rules! log_llm_operation {
    (start, $operation:expr, provider = $provider:expr, model = $model:expr, max_tokens = $tokens:expr) => {
        tracing::info!(
            component = "model_gateway",
            operation = $operation,
            provider = %$provider,
            model = %$model,
            max_tokens = ?$tokens,
            "LLM operation started"
        );
    };
    (success, $operation:expr, provider = $provider:expr, duration_ms = $duration:expr, response_length = $length:expr) => {
        tracing::info!(
            component = "model_gateway",
            operation = $operation,
            provider = %$provider,
            duration_ms = $duration,
            response_length = $length,
            "LLM operation completed successfully"
        );
    };
    (error, $operation:expr, provider = $provider:expr, error = $error:expr) => {
        tracing::error!(
            component = "model_gateway",
            operation = $operation,
            provider = %$provider,
            error = %$error,
            "LLM operation failed"
        );
    };
    (warn, $operation:expr, $msg:expr) => {
        tracing::warn!(
            component = "model_gateway",
            operation = $operation,
            "LLM operation warning: {}", $msg
        );
    };
}

/// Log that a request is being answered with static fallback content
#[macro_export]
macro_rules! log_fallback {
    ($operation:expr, reason = $reason:expr) => {
        tracing::warn!(
            component = "study_service",
            operation = $operation,
            reason = %$reason,
            "Serving fallback content"
        );
    };
}

// ============================================================================
// System Event Logging Macros
// ============================================================================

/// Log system startup and configuration events
#[macro_export]
macro_rules! log_system_event {
    (startup, component = $component:expr, $msg:expr) => {
        tracing::info!(
            event_type = "startup",
            component = $component,
            "System event: {}",
            $msg
        );
    };
    (config, $msg:expr) => {
        tracing::info!(event_type = "configuration", "System event: {}", $msg);
    };
}

// ============================================================================
// Validation Logging Macros
// ============================================================================

/// Log validation results consistently
#[macro_export]
macro_rules! log_validation {
    (success, $component:expr, $msg:expr) => {
        tracing::debug!(
            event_type = "validation",
            component = $component,
            result = "success",
            "Validation completed: {}", $msg
        );
    };
    (failure, $component:expr, error = $error:expr) => {
        tracing::warn!(
            event_type = "validation",
            component = $component,
            result = "failure",
            error = %$error,
            "Validation failed"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_logging_macros_compile() {
        let error = anyhow::anyhow!("test error");

        // Test that all macro variants compile successfully
        log_api_start!("explain", topic = "Deadlock");
        log_api_start!("summarize_text", input_length = 120);
        log_api_start!("home");

        log_api_success!("quiz", count = 5, "questions generated");
        log_api_success!("explain", "explanation generated");
        log_api_warn!("summarize_pdf", "empty upload");

        log_llm_operation!(
            start,
            "generate",
            provider = "Gemini",
            model = "gemini-1.5-flash",
            max_tokens = Some(400)
        );
        log_llm_operation!(
            success,
            "generate",
            provider = "Gemini",
            duration_ms = 1500,
            response_length = 1000
        );
        log_llm_operation!(error, "generate", provider = "Gemini", error = error);
        log_llm_operation!(warn, "discover_model", "listing failed");

        log_fallback!("get_quiz", reason = "model gateway disabled");

        log_system_event!(startup, component = "server", "server starting");
        log_system_event!(config, "configuration loaded successfully");

        log_validation!(success, "configuration", "configuration validated");
        log_validation!(failure, "configuration", error = "port is zero");
    }
}
