use alloc::sync::Arc;

/// An error that can occur in this crate.
///
/// Errors here fall into three categories, reflecting the three ways an
/// input can be unacceptable:
///
/// * A value is out of this crate's representable range, or an operation
/// is mathematically undefined without a reference date (for example,
/// adding two durations when either carries years, months or weeks). See
/// [`Error::is_range`].
/// * Text does not match the ISO 8601 grammar this crate speaks. See
/// [`Error::is_format`]. A format error is a kind of range error, so
/// `is_range` also returns `true` for it.
/// * A parameter is structurally unacceptable, like rounding an instant
/// to a calendar unit or using a non-positive rounding increment. See
/// [`Error::is_invalid_arguments`].
///
/// # Design
///
/// This crate follows the "One True God Error Type Pattern," where only one
/// error type exists for a variety of different operations. Finer grained
/// error types tend to compose poorly once errors start flowing through
/// layered operations, and this crate's errors are terminal: they indicate
/// a programming or input error, never a transient failure worth matching
/// on and retrying.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// This is in an `Arc` to make an `Error` cloneable. It also makes
    /// clones cheap and keeps the size of `Error` itself to one word,
    /// which matters because nearly every fallible API in this crate
    /// returns a `Result<T, Error>`.
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

/// The underlying kind of a [`Error`].
#[derive(Debug)]
enum ErrorKind {
    /// A contextual message layered on top of another error.
    Adhoc(Message),
    /// A structurally unacceptable parameter.
    InvalidArguments(Message),
    /// A value outside the representable domain, or an operation that is
    /// undefined without a calendar reference point.
    Range(Message),
    /// Text that does not match a supported ISO 8601 grammar.
    Format(Message),
}

impl Error {
    /// Returns true when the root cause of this error is a value being out
    /// of this crate's supported range, or an operation being undefined
    /// for the values given.
    ///
    /// Format errors are a subtype of range errors, so this also returns
    /// true for them.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::Duration;
    ///
    /// // Mixed signs are rejected.
    /// assert!(Duration::new(1, 0, 0, 0, 0, 0, -3, 0, 0, 0)
    ///     .unwrap_err()
    ///     .is_range());
    /// // So is malformed text.
    /// assert!("P1M1Y".parse::<Duration>().unwrap_err().is_range());
    /// ```
    pub fn is_range(&self) -> bool {
        matches!(
            *self.root().kind(),
            ErrorKind::Range(_) | ErrorKind::Format(_),
        )
    }

    /// Returns true when the root cause of this error is text that does
    /// not match the ISO 8601 duration or timestamp grammar.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{Duration, Instant};
    ///
    /// assert!("PT".parse::<Duration>().unwrap_err().is_format());
    /// assert!(Instant::from("2024-13-01T00:00:00Z").unwrap_err().is_format());
    /// ```
    pub fn is_format(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::Format(_))
    }

    /// Returns true when the root cause of this error is a structurally
    /// unacceptable parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use tempora::{Instant, Unit};
    ///
    /// let instant = Instant::from_epoch_nanoseconds(0);
    /// // Rounding an instant to calendar units is not a thing.
    /// assert!(instant.round(Unit::Year).unwrap_err().is_invalid_arguments());
    /// ```
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(*self.root().kind(), ErrorKind::InvalidArguments(_))
    }
}

impl Error {
    /// Creates a new ad hoc error with no explicit category.
    ///
    /// Mostly useful as context layered over a categorized root error via
    /// `ErrorContext`.
    #[inline(never)]
    #[cold]
    pub(crate) fn adhoc(message: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(Message::from_args(message)))
    }

    /// Creates a new error indicating that a parameter is structurally
    /// unacceptable.
    #[inline(never)]
    #[cold]
    pub(crate) fn invalid_arguments(
        message: core::fmt::Arguments<'_>,
    ) -> Error {
        Error::from(ErrorKind::InvalidArguments(Message::from_args(message)))
    }

    /// Creates a new error indicating that a value is out of this crate's
    /// supported range, or that an operation is undefined for the values
    /// given.
    #[inline(never)]
    #[cold]
    pub(crate) fn range(message: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Range(Message::from_args(message)))
    }

    /// Creates a new error indicating that text does not match a supported
    /// ISO 8601 grammar.
    #[inline(never)]
    #[cold]
    pub(crate) fn format(message: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Format(Message::from_args(message)))
    }

    pub(crate) fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        {
            // OK because we just created this error, so the Arc has
            // exactly one reference.
            let inner = Arc::get_mut(&mut err.inner).unwrap();
            assert!(
                inner.cause.is_none(),
                "cause of consequent must be `None`"
            );
            inner.cause = Some(self);
        }
        err
    }

    /// Returns the root error in this chain.
    fn root(&self) -> &Error {
        // OK because `Error::chain` is guaranteed to yield at least one
        // error.
        self.chain().last().unwrap()
    }

    /// Returns a chain of error values.
    ///
    /// This starts with the most recent error added to the chain. That is,
    /// the highest level context. The last error in the chain is always
    /// the "root" cause: the error closest to the point where something
    /// has gone wrong.
    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    /// Returns the kind of this error.
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::Adhoc(ref msg) => msg.fmt(f),
            ErrorKind::InvalidArguments(ref msg) => msg.fmt(f),
            ErrorKind::Range(ref msg) => msg.fmt(f),
            ErrorKind::Format(ref msg) => msg.fmt(f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Arc::new(ErrorInner { kind, cause: None }) }
    }
}

/// An error message rendered from `core::fmt::Arguments` at the point of
/// error construction.
struct Message {
    message: alloc::boxed::Box<str>,
}

impl Message {
    fn from_args(message: core::fmt::Arguments<'_>) -> Message {
        use alloc::string::ToString;

        let message = message.to_string().into_boxed_str();
        Message { message }
    }
}

impl core::fmt::Display for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.message, f)
    }
}

impl core::fmt::Debug for Message {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.message, f)
    }
}

/// A simple trait to encapsulate automatic conversion to `Error`.
///
/// This trait basically exists to make `ErrorContext` work without needing
/// to rely on public `From` impls, which would otherwise become part of
/// this crate's API.
pub(crate) trait IntoError {
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

/// A trait for contextualizing error values.
///
/// This makes it easy to contextualize a `Result<T, Error>` without
/// calling `map_err` everywhere one wants to add context to an error.
///
/// This trick was borrowed from `anyhow`.
pub(crate) trait ErrorContext<T> {
    /// Contextualize the given consequent error with this (`self`) error
    /// as the cause.
    ///
    /// Note that this panics if the consequent error already has a cause.
    /// (Because the cause would otherwise be dropped. An error causal
    /// chain is just a linked list, not a tree.)
    #[allow(dead_code)]
    fn context(self, consequent: impl IntoError) -> Result<T, Error>;

    /// Like `context`, but hides error construction within a closure.
    ///
    /// The closure avoids paying the cost of contextual error creation in
    /// the happy path.
    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error>;
}

impl<T> ErrorContext<T> for Result<T, Error> {
    fn context(self, consequent: impl IntoError) -> Result<T, Error> {
        self.map_err(|err| err.context_impl(consequent.into_error()))
    }

    fn with_context<C: IntoError>(
        self,
        consequent: impl FnOnce() -> C,
    ) -> Result<T, Error> {
        self.map_err(|err| err.context_impl(consequent().into_error()))
    }
}

/// Constructs an uncategorized [`Error`] from a format string. Used for
/// contextual messages layered over a categorized root error.
macro_rules! err {
    ($($tt:tt)*) => {
        crate::error::Error::adhoc(format_args!($($tt)*))
    }
}

/// Constructs a range [`Error`] from a format string.
macro_rules! range_err {
    ($($tt:tt)*) => {
        crate::error::Error::range(format_args!($($tt)*))
    }
}

/// Constructs a format [`Error`] from a format string.
macro_rules! format_err {
    ($($tt:tt)*) => {
        crate::error::Error::format(format_args!($($tt)*))
    }
}

/// Constructs an invalid-arguments [`Error`] from a format string.
macro_rules! invalid_args_err {
    ($($tt:tt)*) => {
        crate::error::Error::invalid_arguments(format_args!($($tt)*))
    }
}

pub(crate) use {err, format_err, invalid_args_err, range_err};
