mod duration;
mod instant;
mod iso8601;

/// A type alias we use for tests.
///
/// Most tests in this suite exercise fallible constructors, and the `?`
/// mark keeps the happy paths readable.
type Result = std::result::Result<(), tempora::Error>;
