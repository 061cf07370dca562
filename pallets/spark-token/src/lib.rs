#![cfg_attr(not(feature = "std"), no_std)]
// Allow deprecated constant weights until benchmarked WeightInfo lands
#![allow(deprecated)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::EnsureOrigin};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;

pub mod migrations;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Upper bound on token decimals accepted at installation.
pub const MAX_DECIMALS: u8 = 21;

/// Opaque payload forwarded to programmable recipients and echoed in
/// `Transferred` events.
pub type TransferData = BoundedVec<u8, ConstU32<256>>;

/// Synchronous notification hook for programmable recipient accounts.
///
/// When the destination of a transfer hosts executable logic, it is told
/// about the incoming funds inside the same atomic operation (the
/// `tokenFallback` convention). An `Err` from the hook fails the whole
/// transfer; a credited-but-not-notified state is never committed.
pub trait TokenFallback<AccountId> {
    /// Whether `account` hosts logic that must be notified of incoming transfers.
    fn is_programmable(account: &AccountId) -> bool;

    /// Notify `to` that `value` units arrived from `from`.
    fn token_fallback(to: &AccountId, from: &AccountId, value: u128, data: &[u8])
        -> DispatchResult;
}

/// Plain holding accounts everywhere: nothing is programmable, nobody is notified.
impl<AccountId> TokenFallback<AccountId> for () {
    fn is_programmable(_account: &AccountId) -> bool {
        false
    }

    fn token_fallback(
        _to: &AccountId,
        _from: &AccountId,
        _value: u128,
        _data: &[u8],
    ) -> DispatchResult {
        Ok(())
    }
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        /// Owner of the token contract. Resolves to the owner's account id so
        /// `mint` knows whom to credit.
        type OwnerOrigin: EnsureOrigin<Self::RuntimeOrigin, Success = Self::AccountId>;
        /// Detects programmable recipients and delivers their transfer callback.
        type TokenFallback: TokenFallback<Self::AccountId>;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Spark Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "SPK")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    /// Token decimals, fixed at installation (at most [`MAX_DECIMALS`])
    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply; grows on mint, never shrinks
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Account allowed to move funds between the treasury and users
    #[pallet::storage]
    #[pallet::getter(fn treasurer)]
    pub type Treasurer<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// The operational pool account treasury movements draw on
    #[pallet::storage]
    #[pallet::getter(fn treasury)]
    pub type Treasury<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens moved from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128, data: TransferData },
        /// New tokens minted to the owner
        Minted { to: T::AccountId, amount: u128 },
        /// Treasurer role reassigned
        TreasurerChanged { old_treasurer: Option<T::AccountId>, new_treasurer: T::AccountId },
        /// Treasury account reassigned
        TreasuryChanged { old_treasury: Option<T::AccountId>, new_treasury: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Holders cannot move this token themselves; all movement goes
        /// through the treasurer or the owner. Permanent policy, not a bug.
        NotTransferable,
        /// Caller is not the configured treasurer.
        NotTreasurer,
        /// Treasury operation attempted before a treasury account was set.
        TreasuryNotSet,
        InsufficientBalance,
        Overflow,
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Ordinary holder-to-holder transfer. Always rejected.
        #[pallet::call_index(0)]
        #[pallet::weight(10_000)]
        pub fn transfer(
            origin: OriginFor<T>,
            to: T::AccountId,
            value: u128,
            data: TransferData,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            log::debug!(
                target: "pallet-spark-token",
                "transfer rejected: {:?} -> {:?}, value {}, {} data bytes",
                who,
                to,
                value,
                data.len(),
            );
            Err(Error::<T>::NotTransferable.into())
        }

        /// Pays `value` out of the treasury to `user`. Treasurer only.
        #[pallet::call_index(1)]
        #[pallet::weight(10_000)]
        pub fn treasury_withdraw(
            origin: OriginFor<T>,
            user: T::AccountId,
            value: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_treasurer(&who)?;
            let treasury = Treasury::<T>::get().ok_or(Error::<T>::TreasuryNotSet)?;
            Self::do_transfer(&treasury, &user, value, &TransferData::default())
        }

        /// Collects `value` from `user` into the treasury. Treasurer only.
        #[pallet::call_index(2)]
        #[pallet::weight(10_000)]
        pub fn treasury_deposit(
            origin: OriginFor<T>,
            user: T::AccountId,
            value: u128,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            Self::ensure_treasurer(&who)?;
            let treasury = Treasury::<T>::get().ok_or(Error::<T>::TreasuryNotSet)?;
            Self::do_transfer(&user, &treasury, value, &TransferData::default())
        }

        /// Moves `value` between any two accounts, bypassing the
        /// non-transferability policy. Owner only.
        #[pallet::call_index(3)]
        #[pallet::weight(10_000)]
        pub fn operator_transfer(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            value: u128,
            data: TransferData,
        ) -> DispatchResult {
            T::OwnerOrigin::ensure_origin(origin)?;
            Self::do_transfer(&from, &to, value, &data)
        }

        /// Mints `amount` new units to the calling owner account.
        #[pallet::call_index(4)]
        #[pallet::weight(10_000)]
        pub fn mint(origin: OriginFor<T>, amount: u128) -> DispatchResult {
            let owner = T::OwnerOrigin::ensure_origin(origin)?;
            let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
            let credited =
                Balances::<T>::get(&owner).checked_add(amount).ok_or(Error::<T>::Overflow)?;
            TotalSupply::<T>::put(supply);
            Balances::<T>::insert(&owner, credited);
            Self::deposit_event(Event::Minted { to: owner, amount });
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(10_000)]
        pub fn set_treasurer(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            T::OwnerOrigin::ensure_origin(origin)?;
            let old_treasurer = Treasurer::<T>::get();
            Treasurer::<T>::put(&account);
            Self::deposit_event(Event::TreasurerChanged { old_treasurer, new_treasurer: account });
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(10_000)]
        pub fn set_treasury(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            T::OwnerOrigin::ensure_origin(origin)?;
            let old_treasury = Treasury::<T>::get();
            Treasury::<T>::put(&account);
            Self::deposit_event(Event::TreasuryChanged { old_treasury, new_treasury: account });
            Ok(())
        }
    }

    impl<T: Config> Pallet<T> {
        /// Rejects callers other than the configured treasurer. Uses a
        /// dedicated error so a misdirected treasury call is distinguishable
        /// from a generic origin failure; the denial is logged with both the
        /// caller and the expected treasurer.
        fn ensure_treasurer(who: &T::AccountId) -> DispatchResult {
            let treasurer = Treasurer::<T>::get();
            if treasurer.as_ref() != Some(who) {
                log::debug!(
                    target: "pallet-spark-token",
                    "treasury access denied: caller {:?}, expected treasurer {:?}",
                    who,
                    treasurer,
                );
                return Err(Error::<T>::NotTreasurer.into());
            }
            Ok(())
        }

        /// Moves `value` from `from` to `to`, notifying a programmable
        /// recipient before the event is deposited.
        ///
        /// Balance writes land before the `TokenFallback` hook runs; if the
        /// hook fails, the error propagates and transactional dispatch
        /// discards the writes, so a credited-but-not-notified state is
        /// never committed.
        fn do_transfer(
            from: &T::AccountId,
            to: &T::AccountId,
            value: u128,
            data: &TransferData,
        ) -> DispatchResult {
            let from_balance = Balances::<T>::get(from);
            ensure!(from_balance >= value, Error::<T>::InsufficientBalance);
            Balances::<T>::insert(from, from_balance - value);

            // Read back after the debit so a self-transfer nets to zero.
            let credited = Balances::<T>::get(to).checked_add(value).ok_or(Error::<T>::Overflow)?;
            Balances::<T>::insert(to, credited);

            if T::TokenFallback::is_programmable(to) {
                T::TokenFallback::token_fallback(to, from, value, data)?;
            }

            Self::deposit_event(Event::Transferred {
                from: from.clone(),
                to: to.clone(),
                amount: value,
                data: data.clone(),
            });
            log::debug!(
                target: "pallet-spark-token",
                "transferred {} from {:?} to {:?}",
                value,
                from,
                to,
            );
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals (at most 21)
        pub decimals: u8,
        /// Initial supply before scaling by `10^decimals`
        pub initial_supply: u128,
        /// Account credited with the full scaled initial supply
        pub initial_holder: Option<T::AccountId>,
        /// Initial treasurer
        pub treasurer: Option<T::AccountId>,
        /// Initial treasury account
        pub treasury: Option<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            // Set token metadata
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            assert!(self.decimals <= MAX_DECIMALS, "Decimals cannot be more than 21");
            Decimals::<T>::put(self.decimals);

            // Supply is specified in whole tokens and scaled to base units here
            let total_supply = self
                .initial_supply
                .checked_mul(10u128.pow(u32::from(self.decimals)))
                .expect("Initial supply overflows u128 when scaled");
            TotalSupply::<T>::put(total_supply);

            if total_supply > 0 {
                let holder = self
                    .initial_holder
                    .clone()
                    .expect("Non-zero initial supply requires an initial holder");
                Balances::<T>::insert(holder, total_supply);
            }

            if let Some(treasurer) = &self.treasurer {
                Treasurer::<T>::put(treasurer);
            }
            if let Some(treasury) = &self.treasury {
                Treasury::<T>::put(treasury);
            }

            log::debug!(target: "pallet-spark-token", "installed: total_supply={total_supply}");
        }
    }
}
