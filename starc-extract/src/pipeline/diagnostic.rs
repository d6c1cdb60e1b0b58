//! Diagnostics collected while extracting.
//!
//! Warnings are always kept. Informational entries form the classification
//! trace and are only recorded when tracing is enabled.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// A fatal error that prevents further processing.
    Error,
    /// Something was skipped but extraction continued.
    Warning,
    /// A trace entry describing one decision.
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }

    pub fn is_info(&self) -> bool {
        matches!(self, Severity::Info)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A diagnostic message from an extraction phase.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
    /// Source position (`file:line:col`), when the message concerns one.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, phase, message)
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, phase, message)
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, phase, message)
    }

    fn new(severity: Severity, phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            phase: phase.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

/// Render the informational entries as trace text, one line each.
pub fn render_trace(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diag in diagnostics.iter().filter(|d| d.severity.is_info()) {
        if let Some(loc) = &diag.location {
            out.push_str(loc);
            out.push_str(": ");
        }
        out.push_str(&diag.message);
        out.push('\n');
    }
    out
}

/// Diagnostic sink for one phase.
pub struct Trace<'a> {
    phase: &'static str,
    enabled: bool,
    sink: &'a mut Vec<Diagnostic>,
}

impl<'a> Trace<'a> {
    pub fn new(phase: &'static str, enabled: bool, sink: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            phase,
            enabled,
            sink,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn info(&mut self, message: impl Into<String>) {
        if self.enabled {
            self.sink.push(Diagnostic::info(self.phase, message));
        }
    }

    pub fn info_at(&mut self, location: impl ToString, message: impl Into<String>) {
        if self.enabled {
            self.sink
                .push(Diagnostic::info(self.phase, message).at(location.to_string()));
        }
    }

    pub fn warning_at(&mut self, location: impl ToString, message: impl Into<String>) {
        self.sink
            .push(Diagnostic::warning(self.phase, message).at(location.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_error() {
        let diag = Diagnostic::error("classify", "missing identifiers");
        assert!(diag.severity.is_error());
        assert_eq!(diag.phase, "classify");
    }

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning("scan", "unexpected argument").at("main.go:12:3");
        assert_eq!(diag.location.as_deref(), Some("main.go:12:3"));
        assert_eq!(
            diag.to_string(),
            "warning: unexpected argument (at main.go:12:3)"
        );
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
    }

    #[test]
    fn test_trace_disabled_keeps_warnings() {
        let mut sink = Vec::new();
        let mut trace = Trace::new("scan", false, &mut sink);
        trace.info("skipped");
        trace.info_at("main.go:1:1", "skipped");
        trace.warning_at("main.go:2:1", "kept");

        assert_eq!(sink.len(), 1);
        assert!(sink[0].severity.is_warning());
    }

    #[test]
    fn test_render_trace() {
        let mut sink = Vec::new();
        let mut trace = Trace::new("classify", true, &mut sink);
        trace.info("CHECKING DEFS");
        trace.info_at("main.go:3:6", "Foo defines func Foo()");
        trace.warning_at("main.go:9:2", "not in trace");

        assert_eq!(
            render_trace(&sink),
            "CHECKING DEFS\nmain.go:3:6: Foo defines func Foo()\n"
        );
    }
}
