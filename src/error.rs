#[cfg(feature = "error-track_caller")]
use core::panic::Location;

use alloc::boxed::Box;

/// The Kind of Error
///
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An Error that does not fall into any other category.
    /// This Error is not used by lc-crypto-key.
    Other,
    /// An input was malformed, such as hex text with a non-hex digit or a key of the wrong length for a keyed digest.
    InvalidInput,
    /// A digest was requested with a length the algorithm cannot produce.
    ///
    /// Fixed-size digests accept exactly their digest size.
    /// Unbounded digests accept any non-zero length up to their declared maximum.
    InvalidDigestLength,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::Other => f.write_str("Other Error"),
            ErrorKind::InvalidInput => f.write_str("Invalid Input"),
            ErrorKind::InvalidDigestLength => f.write_str("Invalid Digest Length"),
        }
    }
}

#[derive(Debug)]
enum ErrorInner {
    None,
    Custom(Box<dyn core::error::Error + Send + Sync + 'static>),
    Message(&'static str),
}

/// The type of errors returned from this library.
///
/// ## Traits
/// The type implements [`core::error::Error`].
#[cfg_attr(
    feature = "std",
    doc = "When the `std` feature is available, [`From<Error>`] is implemented for [`std::io::Error`]."
)]
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: ErrorInner,
    #[cfg(feature = "error-track_caller")]
    #[allow(dead_code)] // Only used by `Debug`
    error_location: &'static Location<'static>,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.kind, f)?;

        match &self.inner {
            ErrorInner::None => Ok(()),
            ErrorInner::Custom(inner) => {
                f.write_str(": ")?;
                core::fmt::Display::fmt(inner, f)
            }
            ErrorInner::Message(msg) => {
                f.write_str(": ")?;
                f.write_str(msg)
            }
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match &self.inner {
            ErrorInner::Custom(inner) => Some(&**inner),
            _ => None,
        }
    }
}

pub struct Message<'a>(&'a ErrorInner);

impl<'a> core::fmt::Debug for Message<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            ErrorInner::Custom(b) => core::fmt::Debug::fmt(b, f),
            ErrorInner::Message(m) => core::fmt::Debug::fmt(m, f),
            ErrorInner::None => Ok(()),
        }
    }
}

impl<'a> core::fmt::Display for Message<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            ErrorInner::Custom(b) => core::fmt::Display::fmt(b, f),
            ErrorInner::Message(m) => f.write_str(m),
            ErrorInner::None => Ok(()),
        }
    }
}

impl Error {
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    fn from_kind_and_payload(kind: ErrorKind, inner: ErrorInner) -> Self {
        Self {
            kind,
            inner,
            #[cfg(feature = "error-track_caller")]
            error_location: Location::caller(),
        }
    }

    /// Constructs a new error with the specified `kind` and the specified `payload`.
    ///
    /// Note that this function allocates (even if the payload is a string).
    /// If you do not need a payload, convert from [`ErrorKind`] instead.
    /// If your payload is a string literal, use [`Error::new_with_message`] instead.
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    pub fn new<E: Into<Box<dyn core::error::Error + Send + Sync + 'static>>>(
        kind: ErrorKind,
        payload: E,
    ) -> Self {
        Self::from_kind_and_payload(kind, ErrorInner::Custom(payload.into()))
    }

    /// Constructs a new error with the specified `kind` and the specified `msg`.
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    pub fn new_with_message(kind: ErrorKind, msg: &'static str) -> Self {
        Self::from_kind_and_payload(kind, ErrorInner::Message(msg))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// This returns the inner error, if any.
    ///
    /// If this [`Error`] was constructed using [`Error::new`] it returns the inner error.
    /// If this [`Error`] was constructed using [`Error::new_with_message`] it returns a Box that contains the message.
    ///
    /// Otherwise, returns [`None`].
    pub fn into_inner(self) -> Option<Box<dyn core::error::Error + Send + Sync + 'static>> {
        match self.inner {
            ErrorInner::Custom(b) => Some(b),
            ErrorInner::Message(n) => Some(Box::from(n)),
            ErrorInner::None => None,
        }
    }

    /// Returns the message associated with this [`Error`].
    ///
    /// Returns [`Some`] only if a payload or message was provided.
    pub fn message(&self) -> Option<Message<'_>> {
        match &self.inner {
            ErrorInner::None => None,
            e => Some(Message(e)),
        }
    }
}

impl From<ErrorKind> for Error {
    #[cfg_attr(feature = "error-track_caller", track_caller)]
    fn from(value: ErrorKind) -> Self {
        Error::from_kind_and_payload(value, ErrorInner::None)
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(feature = "std")]
impl From<ErrorKind> for std::io::ErrorKind {
    fn from(value: ErrorKind) -> Self {
        match value {
            ErrorKind::InvalidInput | ErrorKind::InvalidDigestLength => Self::InvalidInput,
            ErrorKind::Other => Self::Other,
        }
    }
}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        let kind: std::io::ErrorKind = value.kind.into();

        if let Some(inner) = value.into_inner() {
            Self::new(kind, inner)
        } else {
            Self::from(kind)
        }
    }
}
