use crate as pallet_spark_token;
use crate::TokenFallback;
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage, DispatchError, DispatchResult,
};
use std::{cell::RefCell, collections::BTreeSet};

type Block = frame_system::mocking::MockBlock<Test>;

pub const OWNER: u64 = 1;
pub const TREASURER: u64 = 2;
pub const TREASURY: u64 = 3;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        SparkToken: pallet_spark_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = ();
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

parameter_types! {
    pub const OwnerAccount: u64 = OWNER;
}

pub struct EnsureOwner;
impl frame_support::traits::EnsureOrigin<RuntimeOrigin> for EnsureOwner {
    type Success = u64;

    fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
        match o.clone().into() {
            Ok(frame_system::RawOrigin::Signed(account)) if account == OwnerAccount::get() => {
                Ok(account)
            }
            _ => Err(o),
        }
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
        Ok(RuntimeOrigin::signed(OwnerAccount::get()))
    }
}

thread_local! {
    static PROGRAMMABLE: RefCell<BTreeSet<u64>> = RefCell::new(BTreeSet::new());
    static FAIL_FALLBACK: RefCell<bool> = RefCell::new(false);
    static FALLBACK_CALLS: RefCell<Vec<(u64, u64, u128, Vec<u8>)>> = RefCell::new(Vec::new());
}

/// Marks `account` as programmable for the rest of the test.
pub fn make_programmable(account: u64) {
    PROGRAMMABLE.with(|p| p.borrow_mut().insert(account));
}

/// Makes every subsequent fallback delivery fail.
pub fn set_fallback_failure(fail: bool) {
    FAIL_FALLBACK.with(|f| *f.borrow_mut() = fail);
}

/// Fallback deliveries recorded so far, as `(to, from, value, data)`.
pub fn fallback_calls() -> Vec<(u64, u64, u128, Vec<u8>)> {
    FALLBACK_CALLS.with(|c| c.borrow().clone())
}

fn reset_fallback_state() {
    PROGRAMMABLE.with(|p| p.borrow_mut().clear());
    FAIL_FALLBACK.with(|f| *f.borrow_mut() = false);
    FALLBACK_CALLS.with(|c| c.borrow_mut().clear());
}

pub struct MockFallback;
impl TokenFallback<u64> for MockFallback {
    fn is_programmable(account: &u64) -> bool {
        PROGRAMMABLE.with(|p| p.borrow().contains(account))
    }

    fn token_fallback(to: &u64, from: &u64, value: u128, data: &[u8]) -> DispatchResult {
        FALLBACK_CALLS.with(|c| c.borrow_mut().push((*to, *from, value, data.to_vec())));
        if FAIL_FALLBACK.with(|f| *f.borrow()) {
            return Err(DispatchError::Other("tokenFallback rejected"));
        }
        Ok(())
    }
}

impl pallet_spark_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type OwnerOrigin = EnsureOwner;
    type TokenFallback = MockFallback;
}

// Build genesis storage according to the mock runtime. 100 whole tokens at
// 2 decimals, so the owner starts with 10_000 base units.
pub fn new_test_ext() -> sp_io::TestExternalities {
    reset_fallback_state();

    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_spark_token::GenesisConfig::<Test> {
        token_name: b"Spark Token".to_vec(),
        token_symbol: b"SPK".to_vec(),
        decimals: 2,
        initial_supply: 100,
        initial_holder: Some(OWNER),
        treasurer: Some(TREASURER),
        treasury: Some(TREASURY),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    t.into()
}

/// Externalities with zero supply and no treasury roles configured.
pub fn new_test_ext_bare() -> sp_io::TestExternalities {
    reset_fallback_state();

    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_spark_token::GenesisConfig::<Test> {
        token_name: b"Spark Token".to_vec(),
        token_symbol: b"SPK".to_vec(),
        decimals: 2,
        initial_supply: 0,
        initial_holder: None,
        treasurer: None,
        treasury: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    t.into()
}
