//! Console message capture and filtering.
//!
//! This module provides strongly-typed console messages that preserve the
//! severity level, timestamp, and source location. The `ConsoleCapture` type
//! accumulates messages during a run and provides filtering/querying.
//!
//! Uncaught page exceptions (`Runtime.exceptionThrown`) land in the same
//! buffer as `Error`-level messages, so a single list holds every error in
//! the order the browser reported it.
//!
//! The buffer is a plain `Arc<Mutex<Vec<_>>>`: it is read more than once and
//! must keep page order.

use chromiumoxide::cdp::js_protocol::runtime::{
    EventConsoleApiCalled, EventExceptionThrown, RemoteObject,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

/// The severity level of a console message.
///
/// Maps directly to JavaScript console methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsoleLevel {
    /// `console.log()`
    Log,
    /// `console.info()`
    Info,
    /// `console.warn()`
    Warning,
    /// `console.error()` and uncaught exceptions
    Error,
    /// `console.debug()`
    Debug,
    /// Catch-all for other console APIs
    Other,
}

impl ConsoleLevel {
    /// Returns true if this is an error-level message.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ConsoleLevel::Error)
    }

    /// Returns true if this is a warning or error.
    #[must_use]
    pub fn is_warning_or_error(&self) -> bool {
        matches!(self, ConsoleLevel::Warning | ConsoleLevel::Error)
    }
}

impl From<&str> for ConsoleLevel {
    fn from(s: &str) -> Self {
        match s {
            "log" => ConsoleLevel::Log,
            "info" => ConsoleLevel::Info,
            "warning" | "warn" => ConsoleLevel::Warning,
            "error" => ConsoleLevel::Error,
            "debug" => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

impl From<&EventConsoleApiCalled> for ConsoleLevel {
    /// Pattern matches on the generated `ConsoleApiCalledType` variants directly;
    /// the set of helper conversions differs between chromiumoxide versions.
    fn from(event: &EventConsoleApiCalled) -> Self {
        use chromiumoxide::cdp::js_protocol::runtime::ConsoleApiCalledType;

        match event.r#type {
            ConsoleApiCalledType::Log => ConsoleLevel::Log,
            ConsoleApiCalledType::Info => ConsoleLevel::Info,
            ConsoleApiCalledType::Warning => ConsoleLevel::Warning,
            ConsoleApiCalledType::Error => ConsoleLevel::Error,
            ConsoleApiCalledType::Debug => ConsoleLevel::Debug,
            _ => ConsoleLevel::Other,
        }
    }
}

/// Where a captured message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageOrigin {
    /// A `console.*` call made by page script.
    Console,
    /// An exception that escaped to the top level of the page.
    Exception,
}

/// A captured console message with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    /// Severity level (log, warn, error, etc.)
    pub level: ConsoleLevel,

    /// The formatted message text. Multiple arguments are joined with spaces.
    pub text: String,

    /// Console call or uncaught exception.
    pub origin: MessageOrigin,

    /// When the message was captured (system time, not page time).
    pub timestamp: SystemTime,

    /// Source location if available (e.g., "app.js:42:10").
    pub source: Option<String>,

    /// When the page emitted the message, in milliseconds since the epoch.
    ///
    /// Console calls and exceptions arrive on separate CDP streams; this is
    /// what puts them back in page order.
    #[serde(default)]
    pub page_timestamp: Option<f64>,
}

impl ConsoleMessage {
    /// Creates a new console message.
    #[must_use]
    pub fn new(level: ConsoleLevel, text: String) -> Self {
        Self {
            level,
            text,
            origin: MessageOrigin::Console,
            timestamp: SystemTime::now(),
            source: None,
            page_timestamp: None,
        }
    }

    /// Creates an error-level message for an uncaught page exception.
    #[must_use]
    pub fn exception(text: String) -> Self {
        Self {
            origin: MessageOrigin::Exception,
            ..Self::new(ConsoleLevel::Error, text)
        }
    }

    /// Creates a message with source location.
    #[must_use]
    pub fn with_source(mut self, source: String) -> Self {
        self.source = Some(source);
        self
    }

    /// Sets the page-side emission time, in milliseconds since the epoch.
    #[must_use]
    pub fn with_page_timestamp(mut self, millis: f64) -> Self {
        self.page_timestamp = Some(millis);
        self
    }
}

/// Thread-safe console message accumulator.
///
/// This type is cheaply cloneable (Arc) and allows concurrent access
/// from the CDP event tasks and the code reading results. Messages are kept
/// in the order the page emitted them and can be filtered by level.
#[derive(Debug, Clone)]
pub struct ConsoleCapture {
    messages: Arc<Mutex<Vec<ConsoleMessage>>>,
}

impl ConsoleCapture {
    /// Creates a new, empty console capture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a message to the capture buffer.
    ///
    /// A message with a page timestamp goes after every message emitted at or
    /// before that time, so a late delivery from one event stream still lands
    /// in page order. Messages without one are appended.
    pub fn push(&self, message: ConsoleMessage) {
        let mut messages = self.lock();
        let index = match message.page_timestamp {
            Some(emitted) => messages
                .iter()
                .rposition(|m| m.page_timestamp.is_none_or(|t| t <= emitted))
                .map_or(0, |i| i + 1),
            None => messages.len(),
        };
        messages.insert(index, message);
    }

    /// Returns all captured messages as a snapshot.
    #[must_use]
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.lock().clone()
    }

    /// Returns messages filtered by level.
    #[must_use]
    pub fn messages_with_level(&self, level: ConsoleLevel) -> Vec<ConsoleMessage> {
        self.messages()
            .into_iter()
            .filter(|m| m.level == level)
            .collect()
    }

    /// Returns all error-level messages, uncaught exceptions included.
    #[must_use]
    pub fn errors(&self) -> Vec<ConsoleMessage> {
        self.messages_with_level(ConsoleLevel::Error)
    }

    /// Returns all warning-level messages.
    #[must_use]
    pub fn warnings(&self) -> Vec<ConsoleMessage> {
        self.messages_with_level(ConsoleLevel::Warning)
    }

    /// Returns the count of error messages.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|m| m.level.is_error())
            .count()
    }

    /// Returns the count of warning or error messages.
    #[must_use]
    pub fn warning_or_error_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|m| m.level.is_warning_or_error())
            .count()
    }

    /// Returns true if any error messages were captured.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Clears all captured messages.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Returns the total number of messages captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no messages have been captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ConsoleMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ConsoleCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a CDP `EventConsoleApiCalled` into a `ConsoleMessage`.
///
/// Arguments are formatted with [`format_remote_value`] and joined with spaces.
pub(crate) fn parse_console_event(event: &EventConsoleApiCalled) -> ConsoleMessage {
    let level = ConsoleLevel::from(event);

    let text = event
        .args
        .iter()
        .map(format_remote_object)
        .collect::<Vec<_>>()
        .join(" ");

    let mut message =
        ConsoleMessage::new(level, text).with_page_timestamp(*event.timestamp.inner());

    if let Some(stack_trace) = &event.stack_trace {
        if let Some(frame) = stack_trace.call_frames.first() {
            let source = format!(
                "{}:{}:{}",
                frame.url, frame.line_number, frame.column_number
            );
            message = message.with_source(source);
        }
    }

    message
}

/// Parses a CDP `EventExceptionThrown` into an error-level `ConsoleMessage`.
pub(crate) fn parse_exception_event(event: &EventExceptionThrown) -> ConsoleMessage {
    let details = &event.exception_details;
    let exception = details.exception.as_ref();

    let text = exception_message(
        exception.and_then(|e| e.description.as_deref()),
        exception.and_then(|e| e.value.as_ref()),
        &details.text,
    );

    let mut message =
        ConsoleMessage::exception(text).with_page_timestamp(*event.timestamp.inner());
    if let Some(url) = details.url.as_deref().filter(|u| !u.is_empty()) {
        message = message.with_source(format!(
            "{}:{}:{}",
            url, details.line_number, details.column_number
        ));
    }
    message
}

/// Start of the first frame in a V8 stack trace.
const STACK_FRAME: &str = "\n    at ";

/// `"RangeError: msg"` -> `"msg"`. The name is whatever identifier precedes
/// the first `": "`, which for subclasses need not match the class name.
fn strip_error_name(head: &str) -> &str {
    match head.split_once(": ") {
        Some((name, message)) if is_identifier(name) => message,
        _ => head,
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn format_remote_object(arg: &RemoteObject) -> String {
    format_remote_value(arg.value.as_ref(), arg.description.as_deref())
}

/// Renders one console argument the way a developer would read it.
///
/// Strings are shown verbatim, other JSON values in JSON form, and objects
/// without a by-value representation fall back to their description.
pub(crate) fn format_remote_value(value: Option<&Value>, description: Option<&str>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => description.unwrap_or("<object>").to_string(),
        Some(other) => other.to_string(),
    }
}

/// Extracts the message of an uncaught exception.
///
/// For `Error` objects the description is `"TypeError: msg\n    at ..."`; the
/// stack and the leading error name are dropped, and a multi-line `msg` is
/// kept whole. Thrown primitives use their value. Anything else falls back to
/// the protocol's summary text (e.g. `"Uncaught"`).
pub(crate) fn exception_message(
    description: Option<&str>,
    value: Option<&Value>,
    text: &str,
) -> String {
    if let Some(description) = description {
        let head = description
            .find(STACK_FRAME)
            .map_or(description, |end| &description[..end]);
        return strip_error_name(head).to_string();
    }

    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => text.to_string(),
        Some(other) => other.to_string(),
    }
}
