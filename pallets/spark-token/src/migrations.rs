//! Storage migrations for pallet-spark-token.
//!
//! Each migration is versioned and runs exactly once. To migrate storage:
//!
//! 1. **Increment `STORAGE_VERSION`** in `lib.rs` (e.g., from 1 to 2)
//! 2. **Create a new migration module** (e.g., `v2::MigrateToV2`)
//! 3. **Implement the migration logic** using `OnRuntimeUpgrade`
//! 4. **Add tests** to verify the migration works correctly
//! 5. **Wire up in runtime** via `Executive` type's migration tuple
//!
//! # Example: Adding a New Storage Item
//!
//! ```ignore
//! // In lib.rs, change:
//! const STORAGE_VERSION: StorageVersion = StorageVersion::new(2);
//!
//! // Add new storage, e.g. cumulative treasury outflow:
//! #[pallet::storage]
//! pub type TreasuryOutflow<T> = StorageValue<_, u128, ValueQuery>;
//!
//! // In migrations.rs, add:
//! pub mod v2 {
//!     use super::*;
//!
//!     pub struct MigrateToV2<T>(PhantomData<T>);
//!
//!     impl<T: Config> OnRuntimeUpgrade for MigrateToV2<T> {
//!         fn on_runtime_upgrade() -> Weight {
//!             let current = Pallet::<T>::on_chain_storage_version();
//!             if current < 2 {
//!                 // Past outflow is unknown; start counting from zero
//!                 TreasuryOutflow::<T>::put(0u128);
//!                 StorageVersion::new(2).put::<Pallet<T>>();
//!                 log::info!("Migrated pallet-spark-token storage to v2");
//!                 T::DbWeight::get().reads_writes(1, 2)
//!             } else {
//!                 log::info!("pallet-spark-token already at v2+, skipping migration");
//!                 T::DbWeight::get().reads(1)
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! # Wiring Migrations in Runtime
//!
//! In the runtime's `lib.rs`, add migrations to the `Executive` type:
//!
//! ```ignore
//! pub type Executive = frame_executive::Executive<
//!     Runtime,
//!     Block,
//!     frame_system::ChainContext<Runtime>,
//!     Runtime,
//!     AllPalletsWithSystem,
//!     (
//!         pallet_spark_token::migrations::v1::MigrateToV1<Runtime>,
//!         // later migrations follow, in order
//!     ),
//! >;
//! ```
//!
//! # Guidelines
//!
//! - **Never skip versions**: migrate sequentially (v1 → v2 → v3)
//! - **Idempotent migrations**: check the on-chain version before migrating
//! - **Accurate weights**: return the real `Weight` of the DB operations
//! - **try-runtime**: implement `pre_upgrade`/`post_upgrade` for dry runs

use frame_support::{pallet_prelude::*, traits::OnRuntimeUpgrade};
use sp_std::marker::PhantomData;

use crate::{Config, Pallet};

/// Migration to version 1 (initial release).
///
/// No-op: v1 is the initial storage version, so there is nothing to migrate
/// from v0. It exists to establish the pattern and the version bookkeeping
/// that later migrations build on.
pub mod v1 {
    use super::*;

    pub struct MigrateToV1<T>(PhantomData<T>);

    impl<T: Config> OnRuntimeUpgrade for MigrateToV1<T> {
        fn on_runtime_upgrade() -> Weight {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();

            if on_chain_version < 1 {
                // v0 → v1: initial release, no storage changes needed.
                log::info!(
                    target: "pallet-spark-token",
                    "Running migration v0 → v1 (no-op for initial release)"
                );

                StorageVersion::new(1).put::<Pallet<T>>();

                // 1 read (version check) + 1 write (version update)
                T::DbWeight::get().reads_writes(1, 1)
            } else {
                log::info!(
                    target: "pallet-spark-token",
                    "Storage already at v{on_chain_version:?}, skipping v1 migration"
                );

                T::DbWeight::get().reads(1)
            }
        }

        #[cfg(feature = "try-runtime")]
        fn pre_upgrade() -> Result<sp_std::vec::Vec<u8>, sp_runtime::TryRuntimeError> {
            let on_chain_version = Pallet::<T>::on_chain_storage_version();
            log::info!(
                target: "pallet-spark-token",
                "Pre-upgrade: on-chain storage version is {:?}",
                on_chain_version
            );

            Ok(on_chain_version.encode())
        }

        #[cfg(feature = "try-runtime")]
        fn post_upgrade(state: sp_std::vec::Vec<u8>) -> Result<(), sp_runtime::TryRuntimeError> {
            let pre_version: u16 = Decode::decode(&mut &state[..])
                .map_err(|_| sp_runtime::TryRuntimeError::Other("Failed to decode pre-state"))?;

            let post_version = Pallet::<T>::on_chain_storage_version();

            log::info!(
                target: "pallet-spark-token",
                "Post-upgrade: version changed from {} to {:?}",
                pre_version,
                post_version
            );

            if pre_version < 1 {
                frame_support::ensure!(
                    post_version >= 1,
                    sp_runtime::TryRuntimeError::Other("Migration to v1 did not complete")
                );
            }

            Ok(())
        }
    }
}
