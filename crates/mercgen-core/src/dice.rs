//! Dice source shared by every generation stage.
//!
//! Stages call the dice in a fixed order, so a seeded `StdRng` reproduces a
//! run exactly. `ScriptedDice` replays a fixed sequence of results for tests
//! that need a particular roll.

use std::collections::VecDeque;

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// Sum of `count` rolls of a `sides`-sided die.
    fn dice(&mut self, count: u32, sides: u32) -> i32;

    /// Uniform integer in `0..bound`; `0` when `bound` is zero.
    fn random_int(&mut self, bound: u32) -> u32;

    fn d6(&mut self, count: u32) -> i32 {
        self.dice(count, 6)
    }
}

fn roll_with(rng: &mut impl Rng, count: u32, sides: u32) -> i32 {
    if sides == 0 {
        return 0;
    }
    (0..count).map(|_| rng.gen_range(1..=sides) as i32).sum()
}

fn pick_with(rng: &mut impl Rng, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}

impl Dice for StdRng {
    fn dice(&mut self, count: u32, sides: u32) -> i32 {
        roll_with(self, count, sides)
    }

    fn random_int(&mut self, bound: u32) -> u32 {
        pick_with(self, bound)
    }
}

impl Dice for ThreadRng {
    fn dice(&mut self, count: u32, sides: u32) -> i32 {
        roll_with(self, count, sides)
    }

    fn random_int(&mut self, bound: u32) -> u32 {
        pick_with(self, bound)
    }
}

/// Returns queued results in order, then falls back to a seeded RNG.
///
/// A queued value answers either kind of call: `dice` returns it as the
/// whole sum, `random_int` reduces it modulo the bound.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
    fallback: StdRng,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: StdRng::seed_from_u64(0),
        }
    }

    pub fn push(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn dice(&mut self, count: u32, sides: u32) -> i32 {
        match self.rolls.pop_front() {
            Some(roll) => roll,
            None => roll_with(&mut self.fallback, count, sides),
        }
    }

    fn random_int(&mut self, bound: u32) -> u32 {
        match self.rolls.pop_front() {
            Some(_) if bound == 0 => 0,
            Some(roll) => roll.rem_euclid(bound as i32) as u32,
            None => pick_with(&mut self.fallback, bound),
        }
    }
}
