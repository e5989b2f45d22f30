//! Stop storage port
//!
//! Read access to the stop catalogue used for nearest-stop resolution.
//! Writes happen in bulk through the importer.

use async_trait::async_trait;
use domain::Stop;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the stop catalogue
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StopRepository: Send + Sync {
    /// All stops in storage order
    ///
    /// Storage order is insertion order and decides ties between stops at an
    /// equal distance.
    async fn list(&self) -> Result<Vec<Stop>, ApplicationError>;

    /// Number of stored stops
    async fn count(&self) -> Result<u64, ApplicationError>;

    /// Check if the store can be queried
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn StopRepository) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn StopRepository>();
    }
}
