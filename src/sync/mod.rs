pub mod poll;
pub mod reconcile;
pub mod remote;

pub use reconcile::SyncReconciler;
