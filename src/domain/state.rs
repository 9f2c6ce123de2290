use crate::domain::errors::AppError;

/// A fetched data slice as the view sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    Failed(AppError),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            Loadable::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => Loadable::Loaded(f(value)),
            Loadable::Failed(err) => Loadable::Failed(err),
        }
    }

    pub fn as_ref(&self) -> Loadable<&T> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Loaded(value) => Loadable::Loaded(value),
            Loadable::Failed(err) => Loadable::Failed(err.clone()),
        }
    }
}

impl<T> From<Result<T, AppError>> for Loadable<T> {
    fn from(result: Result<T, AppError>) -> Self {
        match result {
            Ok(value) => Loadable::Loaded(value),
            Err(err) => Loadable::Failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result() {
        let ok: Loadable<u8> = Ok(3).into();
        assert_eq!(ok.loaded(), Some(&3));
        let failed: Loadable<u8> = Err(AppError::Rejected("nope".into())).into();
        assert_eq!(failed.error(), Some(&AppError::Rejected("nope".into())));
        assert!(Loadable::<u8>::default().is_loading());
    }

    #[test]
    fn map_keeps_failure() {
        let failed: Loadable<u8> = Loadable::Failed(AppError::Cancelled);
        assert_eq!(failed.map(|v| v * 2), Loadable::Failed(AppError::Cancelled));
        assert_eq!(Loadable::Loaded(2u8).map(|v| v * 2), Loadable::Loaded(4));
    }
}
