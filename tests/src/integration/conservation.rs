//! # Conservation Under Random Workloads
//!
//! Seeded random sequences of transfers, approvals and delegated transfers.
//! After every call the ledger must still sum to the supply; after every
//! rejected call nothing may have changed.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::fixtures::{account, amount, deploy, Deployment};
    use tic_token::prelude::*;

    const ACCOUNTS: u8 = 6;
    const STEPS: usize = 2_000;

    fn random_account(rng: &mut StdRng) -> AccountId {
        account(rng.gen_range(0..ACCOUNTS))
    }

    fn random_value(rng: &mut StdRng) -> Amount {
        // Mostly small values with the occasional overdraw attempt.
        if rng.gen_bool(0.1) {
            amount(rng.gen_range(0..2_000_000))
        } else {
            amount(rng.gen_range(0..5_000))
        }
    }

    fn step(d: &Deployment, rng: &mut StdRng) -> Result<Receipt, TokenError> {
        let caller = random_account(rng);
        let value = random_value(rng);
        match rng.gen_range(0..3) {
            0 => d.token.transfer(caller, random_account(rng), value),
            1 => d.token.approve(caller, random_account(rng), value),
            _ => {
                let owner = random_account(rng);
                d.token
                    .transfer_from(caller, owner, random_account(rng), value)
            }
        }
    }

    fn run(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let d = deploy();

        for _ in 0..STEPS {
            let before = d.token.snapshot();
            let events_before = d.log.len();

            match step(&d, &mut rng) {
                Ok(receipt) => {
                    assert_eq!(receipt.logs.len(), 1);
                    assert_eq!(d.log.len(), events_before + 1);
                }
                Err(_) => {
                    assert_eq!(d.token.snapshot(), before, "seed {seed}");
                    assert_eq!(d.log.len(), events_before, "seed {seed}");
                }
            }

            assert!(
                d.token.with_state(check_conservation_invariant),
                "seed {seed}"
            );
        }

        let total: Amount = (0..ACCOUNTS)
            .map(|i| d.token.balance_of(account(i)))
            .fold(Amount::zero(), |acc, b| acc + b);
        assert_eq!(total, d.token.total_supply());

        let stats = d.token.stats();
        assert_eq!(stats.committed() + stats.rejected(), STEPS as u64);
        assert_eq!(stats.committed(), d.token.next_sequence());
    }

    #[test]
    fn test_conservation_seed_1() {
        run(1);
    }

    #[test]
    fn test_conservation_seed_42() {
        run(42);
    }

    #[test]
    fn test_conservation_seed_20240101() {
        run(20_240_101);
    }

    #[test]
    fn test_dry_run_agrees_with_real_call() {
        let mut rng = StdRng::seed_from_u64(7);
        let d = deploy();

        for _ in 0..500 {
            let spender = random_account(&mut rng);
            let owner = random_account(&mut rng);
            let to = random_account(&mut rng);
            let value = random_value(&mut rng);

            let predicted = d.token.call_transfer_from(spender, owner, to, value);
            let actual = d.token.transfer_from(spender, owner, to, value).map(|_| true);
            assert_eq!(predicted, actual);

            // Keep allowances flowing so some delegated calls succeed.
            d.token
                .approve(owner, spender, random_value(&mut rng))
                .unwrap();
            if rng.gen_bool(0.5) {
                let _ = d.token.transfer(account(0), owner, amount(1_000));
            }
        }
    }
}
