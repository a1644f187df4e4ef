//! Term meta form engine
//!
//! [`renderer`] turns a [`FieldSet`](contracts::shared::meta_fields::FieldSet)
//! into an admin form section, [`persister`] validates a submitted form
//! against the same set and writes the result to a [`store::TermMetaStore`].
//! Every form carries a nonce from [`nonce::NonceService`] that the
//! persister checks before touching the store.

pub mod nonce;
pub mod persister;
pub mod renderer;
pub mod store;

pub use nonce::NonceService;
pub use persister::{MetaError, MetaPersister, SaveContext, SaveReport};
pub use renderer::{ExistingValues, MetaFormRenderer, NonceField};
pub use store::{SqliteTermMetaStore, TermMetaStore};
