//! Trait-based conversions between external error types and `FactoryError`.

use figment::Error as FigmentError;

use super::FactoryError;

impl From<FigmentError> for FactoryError {
    fn from(e: FigmentError) -> Self {
        Self::Fixture(Box::new(e))
    }
}
