use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::{Mutex, PoisonError};

use crate::{Config, SEED_ENV};

/// Randomized-data source handed to templates and `*_with` setters.
///
/// Builders never look inside it; they only pass `&mut Faker` along. It
/// implements [`RngCore`], so everything from [`rand::Rng`] works on it:
///
/// ```rust
/// use prefab_core::Faker;
/// use prefab_core::rand::Rng;
///
/// let mut faker = Faker::seeded(7);
/// let age: u8 = faker.gen_range(18..=99);
/// assert!((18..=99).contains(&age));
/// ```
#[derive(Clone)]
pub struct Faker {
    seed: u64,
    rng: StdRng,
}

impl Faker {
    /// The next faker from the process-wide [`Seeder`].
    ///
    /// The seeder starts from `PREFAB_SEED`, or from a random master seed
    /// that is logged once. Replaying that master seed gives every faker made
    /// here the same seed again, in creation order.
    pub fn new() -> Self {
        let mut seeder = SEEDER.lock().unwrap_or_else(PoisonError::into_inner);
        seeder
            .get_or_insert_with(|| Seeder::from_config(&Config::from_env()))
            .next_faker()
    }

    /// A faker that always produces the same sequence for the same `seed`.
    pub fn seeded(seed: u64) -> Self {
        log::trace!("faker seeded with {seed}");
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this faker started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// One element of `items`, or `None` when it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// A string of `len` random ASCII letters and digits.
    pub fn alphanumeric(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

impl Default for Faker {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Faker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Faker").field("seed", &self.seed).finish()
    }
}

static SEEDER: Mutex<Option<Seeder>> = Mutex::new(None);

/// Hands out faker seeds drawn from one master seed.
///
/// ```rust
/// use prefab_core::Seeder;
///
/// let mut first = Seeder::new(42);
/// let mut again = Seeder::new(42);
/// let seeds: Vec<u64> = (0..3).map(|_| first.next_faker().seed()).collect();
/// let replay: Vec<u64> = (0..3).map(|_| again.next_faker().seed()).collect();
/// assert_eq!(seeds, replay);
/// assert_ne!(seeds[0], seeds[1]);
/// ```
#[derive(Clone)]
pub struct Seeder {
    master: u64,
    rng: StdRng,
}

impl Seeder {
    /// A seeder whose fakers depend only on `master` and their order.
    pub fn new(master: u64) -> Self {
        Self {
            master,
            rng: StdRng::seed_from_u64(master),
        }
    }

    /// A seeder starting from `config.seed`, or from a random master seed.
    pub fn from_config(config: &Config) -> Self {
        let master = config.seed.unwrap_or_else(rand::random);
        log::debug!("master seed {master} (set {SEED_ENV}={master} to replay)");
        Self::new(master)
    }

    /// The seed everything else is derived from.
    pub fn master(&self) -> u64 {
        self.master
    }

    /// A faker with the next derived seed.
    pub fn next_faker(&mut self) -> Faker {
        Faker::seeded(self.rng.next_u64())
    }
}

impl core::fmt::Debug for Seeder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Seeder").field("master", &self.master).finish()
    }
}

impl RngCore for Faker {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}
