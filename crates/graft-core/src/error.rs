mod adhoc;
mod invalid_collection_item;
mod invalid_reference;
mod missing_manager;
mod unknown_entity_type;
mod validation;

use adhoc::AdhocError;
use invalid_collection_item::InvalidCollectionItemError;
use invalid_reference::InvalidReferenceError;
use missing_manager::MissingManagerError;
use std::sync::Arc;
use unknown_entity_type::UnknownEntityTypeError;
use validation::ValidationError;

/// Creates an [`Error`] from format arguments and returns it.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur during entity-graph assignment.
#[derive(Clone)]
pub struct Error {
    inner: Option<Arc<ErrorInner>>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added
    /// context is shown first, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;
        if err.inner.is_none() {
            err = Error::from(ErrorKind::Unknown);
        }
        let inner = err.inner.as_mut().unwrap();
        assert!(
            inner.cause.is_none(),
            "consequent error must not already have a cause"
        );
        Arc::get_mut(inner).unwrap().cause = Some(self);
        err
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.as_ref().and_then(|inner| inner.cause.as_ref())?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        self.inner
            .as_ref()
            .map(|inner| &inner.kind)
            .unwrap_or(&ErrorKind::Unknown)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

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
            let Some(ref inner) = self.inner else {
                return f.debug_struct("Error").field("kind", &"None").finish();
            };
            f.debug_struct("Error")
                .field("kind", &inner.kind)
                .field("cause", &inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Validation(ValidationError),
    InvalidReference(InvalidReferenceError),
    InvalidCollectionItem(InvalidCollectionItemError),
    MissingManager(MissingManagerError),
    UnknownEntityType(UnknownEntityTypeError),
    Unknown,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
            InvalidReference(err) => core::fmt::Display::fmt(err, f),
            InvalidCollectionItem(err) => core::fmt::Display::fmt(err, f),
            MissingManager(err) => core::fmt::Display::fmt(err, f),
            UnknownEntityType(err) => core::fmt::Display::fmt(err, f),
            Unknown => f.write_str("unknown graft error"),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Some(Arc::new(ErrorInner { kind, cause: None })),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn error_chain_display() {
        let root = Error::from_args(format_args!("root cause"));
        let top = Error::from_args(format_args!("top context"));

        let chained = root.context(top);
        assert_eq!(chained.to_string(), "top context: root cause");
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn not_nullable_display() {
        let err = Error::not_nullable("User", "email");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "you must pass a non-null value to property `User.email`"
        );
    }

    #[test]
    fn invalid_scalar_display() {
        let err = Error::invalid_scalar("User", "age", "int", Value::from("x"));
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "invalid value for `User.age`: expected int, got String(\"x\")"
        );
    }

    #[test]
    fn invalid_reference_display() {
        let err = Error::invalid_reference("Book", "author", Value::Bool(true));
        assert!(err.is_invalid_reference());
        assert_eq!(
            err.to_string(),
            "invalid reference value provided for `Book.author`: Bool(true)"
        );
    }

    #[test]
    fn invalid_collection_items_display() {
        let err = Error::invalid_collection_items(
            "Author",
            "books",
            vec![Value::Bool(true), Value::F64(1.5)],
        );
        assert!(err.is_invalid_collection_item());
        assert_eq!(
            err.to_string(),
            "invalid collection values provided for `Author.books`: [Bool(true), F64(1.5)]"
        );
    }

    #[test]
    fn missing_manager_display() {
        let err = Error::missing_manager("create embeddable value objects");
        assert!(err.is_missing_manager());
        assert_eq!(
            err.to_string(),
            "a persistence manager is required to create embeddable value objects; \
             provide one with `Assigner::with_manager`"
        );
    }

    #[test]
    fn unknown_entity_type_display() {
        let err = Error::unknown_entity_type("Ghost");
        assert!(err.is_unknown_entity_type());
        assert_eq!(err.to_string(), "unknown entity type `Ghost`");
    }
}
